#[cfg(test)]
mod tests {
    use minkamp::db::db::Db;
    use minkamp::db::migrations::{get_db_version, needs_migration, MigrationManager};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct MigrationTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("minkamp.db");
            MigrationTestContext {
                _temp_dir: temp_dir,
                db_path,
            }
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migrations_run_on_open(ctx: &mut MigrationTestContext) {
        let db = Db::open(&ctx.db_path).unwrap();

        let version = get_db_version(&db.conn).unwrap();
        assert_eq!(version, MigrationManager::new().latest_version());
        assert!(!needs_migration(&db.conn).unwrap());

        for table in ["users", "players", "matches", "squads", "plans", "playing_time", "settings"] {
            let count: i64 = db
                .conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "missing table {}", table);
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_history(ctx: &mut MigrationTestContext) {
        let mut conn = Db::open_without_migrations(&ctx.db_path).unwrap();
        let manager = MigrationManager::new();
        assert!(needs_migration(&conn).unwrap());

        manager.run_migrations(&mut conn).unwrap();
        let history = manager.get_migration_history(&conn).unwrap();

        assert_eq!(history.len() as u32, manager.latest_version());
        for (i, (version, _, _)) in history.iter().enumerate() {
            assert_eq!(*version as usize, i + 1);
        }
        assert!(manager.is_migration_applied(&conn, 1).unwrap());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_idempotency(ctx: &mut MigrationTestContext) {
        let mut conn = Db::open_without_migrations(&ctx.db_path).unwrap();
        let manager = MigrationManager::new();

        manager.run_migrations(&mut conn).unwrap();
        let version1 = get_db_version(&conn).unwrap();

        manager.run_migrations(&mut conn).unwrap();
        let version2 = get_db_version(&conn).unwrap();

        assert_eq!(version1, version2);
        drop(conn);

        let reopened = Db::open(&ctx.db_path).unwrap();
        assert_eq!(get_db_version(&reopened.conn).unwrap(), version1);
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_rollback_forgets_newer_migrations(ctx: &mut MigrationTestContext) {
        let mut conn = Db::open_without_migrations(&ctx.db_path).unwrap();
        let manager = MigrationManager::new();
        manager.run_migrations(&mut conn).unwrap();

        manager.rollback_to(&mut conn, 2).unwrap();
        assert_eq!(get_db_version(&conn).unwrap(), 2);
        assert!(needs_migration(&conn).unwrap());
        assert!(!manager.is_migration_applied(&conn, 3).unwrap());

        manager.run_migrations(&mut conn).unwrap();
        assert_eq!(get_db_version(&conn).unwrap(), manager.latest_version());
    }
}
