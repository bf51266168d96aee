#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use minkamp::db::db::Db;
    use minkamp::db::matches::{Match, Matches};
    use minkamp::db::settings::{Settings, MIN_ON_FIELD_KEY};
    use minkamp::db::users::Users;
    use minkamp::libs::config::PlanConfig;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct SettingsTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
        user_id: i64,
    }

    impl SettingsTestContext {
        fn settings(&self) -> Settings {
            Settings::from_db(Db::open(&self.db_path).unwrap())
        }
    }

    impl TestContext for SettingsTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("minkamp.db");
            let user_id = Users::from_db(Db::open(&db_path).unwrap())
                .create("trener", "fotball1")
                .unwrap();
            SettingsTestContext {
                _temp_dir: temp_dir,
                db_path,
                user_id,
            }
        }
    }

    #[test_context(SettingsTestContext)]
    #[test]
    fn test_user_value_overrides_global(ctx: &mut SettingsTestContext) {
        let mut settings = ctx.settings();

        assert_eq!(settings.get("theme", Some(ctx.user_id)).unwrap(), None);

        settings.set("theme", "dark", None).unwrap();
        assert_eq!(settings.get("theme", Some(ctx.user_id)).unwrap(), Some("dark".to_string()));
        assert_eq!(settings.get("theme", None).unwrap(), Some("dark".to_string()));

        settings.set("theme", "light", Some(ctx.user_id)).unwrap();
        assert_eq!(settings.get("theme", Some(ctx.user_id)).unwrap(), Some("light".to_string()));
        assert_eq!(settings.get("theme", None).unwrap(), Some("dark".to_string()));

        assert!(settings.delete("theme", Some(ctx.user_id)).unwrap());
        assert!(!settings.delete("theme", Some(ctx.user_id)).unwrap());
        assert_eq!(settings.get("theme", Some(ctx.user_id)).unwrap(), Some("dark".to_string()));
    }

    #[test_context(SettingsTestContext)]
    #[test]
    fn test_plan_limits(ctx: &mut SettingsTestContext) {
        let mut settings = ctx.settings();
        let defaults = PlanConfig::default();

        assert_eq!(settings.plan_limits(ctx.user_id, &defaults).unwrap(), (7, 11));

        settings.set_plan_limits(ctx.user_id, 5, 8).unwrap();
        assert_eq!(settings.plan_limits(ctx.user_id, &defaults).unwrap(), (5, 8));
        assert_eq!(settings.plan_limits(ctx.user_id + 1, &defaults).unwrap(), (7, 11));

        settings.set(MIN_ON_FIELD_KEY, "many", Some(ctx.user_id)).unwrap();
        assert_eq!(settings.plan_limits(ctx.user_id, &defaults).unwrap(), (7, 8));
    }

    #[test_context(SettingsTestContext)]
    #[test]
    fn test_set_plan_limits_rejects_bad_range(ctx: &mut SettingsTestContext) {
        let mut settings = ctx.settings();

        assert!(settings.set_plan_limits(ctx.user_id, 0, 5).is_err());
        assert!(settings.set_plan_limits(ctx.user_id, 9, 8).is_err());
        assert_eq!(settings.plan_limits(ctx.user_id, &PlanConfig::default()).unwrap(), (7, 11));
    }

    #[test_context(SettingsTestContext)]
    #[test]
    fn test_formation_per_match(ctx: &mut SettingsTestContext) {
        let date = NaiveDate::from_ymd_opt(2025, 5, 3).unwrap();
        let match_id = Matches::from_db(Db::open(&ctx.db_path).unwrap())
            .create(&Match::new(ctx.user_id, date, "Brann", true, &PlanConfig::default()))
            .unwrap();
        let mut settings = ctx.settings();

        assert_eq!(settings.formation(match_id).unwrap(), None);

        settings.set_formation(match_id, " 4-3-3 ").unwrap();
        assert_eq!(settings.formation(match_id).unwrap(), Some("4-3-3".to_string()));

        assert!(settings.set_formation(match_id, "2-2-6").is_err());
        assert_eq!(settings.formation(match_id).unwrap(), Some("4-3-3".to_string()));
        assert_eq!(settings.formation(match_id + 1).unwrap(), None);
    }
}
