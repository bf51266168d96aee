#[cfg(test)]
mod tests {
    use minkamp::db::db::Db;
    use minkamp::db::users::Users;
    use minkamp::libs::auth::{self, AuthError, MIN_PASSWORD_LENGTH};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct UserTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl UserTestContext {
        fn users(&self) -> Users {
            Users::from_db(Db::open(&self.db_path).unwrap())
        }
    }

    impl TestContext for UserTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("minkamp.db");
            UserTestContext {
                _temp_dir: temp_dir,
                db_path,
            }
        }
    }

    #[test]
    fn test_password_hashing() {
        let stored = auth::hash_password("hemmelig");

        assert!(auth::verify_password("hemmelig", &stored));
        assert!(!auth::verify_password("Hemmelig", &stored));
        assert_ne!(stored.hash, "hemmelig");

        let again = auth::hash_password("hemmelig");
        assert_ne!(stored.salt, again.salt);
        assert_ne!(stored.hash, again.hash);
        assert_eq!(auth::hash_with_salt("hemmelig", &stored.salt), stored.hash);
    }

    #[test]
    fn test_credential_rules() {
        assert_eq!(auth::validate_credentials("  ", "longenough"), Err(AuthError::EmptyUsername));
        assert_eq!(
            auth::validate_credentials("coach", "abc"),
            Err(AuthError::PasswordTooShort(MIN_PASSWORD_LENGTH))
        );
        assert_eq!(auth::validate_credentials("coach", "abcdef"), Ok(()));
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_register_and_authenticate(ctx: &mut UserTestContext) {
        let mut users = ctx.users();

        let id = users.create(" trener ", "fotball1").unwrap();
        assert!(id > 0);

        let user = users.authenticate("trener", "fotball1").unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.username, "trener");

        let wrong = users.authenticate("trener", "feil-passord").unwrap_err();
        assert_eq!(wrong.downcast_ref::<AuthError>(), Some(&AuthError::InvalidCredentials));

        let unknown = users.authenticate("ingen", "fotball1").unwrap_err();
        assert_eq!(unknown.downcast_ref::<AuthError>(), Some(&AuthError::InvalidCredentials));
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_username_must_be_unique(ctx: &mut UserTestContext) {
        let mut users = ctx.users();
        users.create("trener", "fotball1").unwrap();

        let err = users.create("trener", "annet-passord").unwrap_err();
        assert_eq!(
            err.downcast_ref::<AuthError>(),
            Some(&AuthError::UsernameTaken("trener".to_string()))
        );
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_lookup(ctx: &mut UserTestContext) {
        let mut users = ctx.users();
        let id = users.create("trener", "fotball1").unwrap();

        assert_eq!(users.get(id).unwrap().unwrap().username, "trener");
        assert_eq!(users.get_by_username("trener").unwrap().unwrap().id, id);
        assert!(users.get(id + 100).unwrap().is_none());
        assert!(users.get_by_username("ingen").unwrap().is_none());
    }
}
