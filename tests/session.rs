#[cfg(test)]
mod tests {
    use minkamp::libs::auth::AuthError;
    use minkamp::libs::plan::{PlayerPlan, SubstitutionPlan};
    use minkamp::libs::session::{CurrentUser, Session, SESSION_FILE_NAME};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct SessionTestContext {
        _temp_dir: TempDir,
        path: PathBuf,
    }

    impl SessionTestContext {
        fn session(&self) -> Session {
            Session::load_from(&self.path).unwrap()
        }
    }

    impl TestContext for SessionTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let path = temp_dir.path().join(SESSION_FILE_NAME);
            SessionTestContext { _temp_dir: temp_dir, path }
        }
    }

    fn draft() -> SubstitutionPlan<i64> {
        let mut plan = SubstitutionPlan::new();
        plan.insert(4, PlayerPlan::new("Ola", vec![true, false, true]));
        plan.insert(9, PlayerPlan::new("Kari", vec![false, true, true]));
        plan
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_empty_session_requires_login(ctx: &mut SessionTestContext) {
        let session = ctx.session();

        assert_eq!(session.current_user(), None);
        assert_eq!(session.selected_match(), None);

        let err = session.require_user().unwrap_err();
        assert_eq!(err.downcast_ref::<AuthError>(), Some(&AuthError::NotLoggedIn));
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_login_persists_across_loads(ctx: &mut SessionTestContext) {
        let mut session = ctx.session();
        session.login(3, "trener").unwrap();
        session.select_match(12).unwrap();
        session.save().unwrap();

        let reloaded = ctx.session();
        let expected = CurrentUser {
            id: 3,
            username: "trener".to_string(),
        };
        assert_eq!(reloaded.current_user(), Some(expected.clone()));
        assert_eq!(reloaded.require_user().unwrap(), expected);
        assert_eq!(reloaded.selected_match(), Some(12));
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_login_drops_previous_state(ctx: &mut SessionTestContext) {
        let mut session = ctx.session();
        session.login(3, "trener").unwrap();
        session.select_match(12).unwrap();
        session.set_draft_plan(12, &draft()).unwrap();

        session.login(5, "assistent").unwrap();
        assert_eq!(session.current_user().map(|u| u.id), Some(5));
        assert_eq!(session.selected_match(), None);
        assert_eq!(session.draft_plan(12), None);
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_draft_plan_round_trip(ctx: &mut SessionTestContext) {
        let mut session = ctx.session();
        session.set_draft_plan(12, &draft()).unwrap();
        session.save().unwrap();

        let mut reloaded = ctx.session();
        assert_eq!(reloaded.draft_plan(12), Some(draft()));
        assert_eq!(reloaded.draft_plan(13), None);

        assert!(reloaded.discard_draft_plan(12));
        assert!(!reloaded.discard_draft_plan(12));
        assert_eq!(reloaded.draft_plan(12), None);
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_typed_values_and_clear(ctx: &mut SessionTestContext) {
        let mut session = ctx.session();
        session.set("note", "bortekamp").unwrap();

        assert_eq!(session.get::<String>("note"), Some("bortekamp".to_string()));
        assert_eq!(session.get::<i64>("note"), None);

        session.login(3, "trener").unwrap();
        session.clear();
        session.save().unwrap();
        assert_eq!(ctx.session().current_user(), None);
    }
}
