#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use minkamp::db::db::Db;
    use minkamp::db::matches::{Match, Matches};
    use minkamp::db::players::{Player, PlayerUpdate, Players};
    use minkamp::db::squads::Squads;
    use minkamp::db::users::Users;
    use minkamp::libs::config::PlanConfig;
    use minkamp::libs::position::Position;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct PlayerTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
        user_id: i64,
    }

    impl PlayerTestContext {
        fn db(&self) -> Db {
            Db::open(&self.db_path).unwrap()
        }

        fn players(&self) -> Players {
            Players::from_db(self.db())
        }

        fn squads(&self) -> Squads {
            Squads::from_db(self.db())
        }

        fn add_match(&self) -> i64 {
            let date = NaiveDate::from_ymd_opt(2025, 5, 3).unwrap();
            let m = Match::new(self.user_id, date, "Brann", true, &PlanConfig::default());
            Matches::from_db(self.db()).create(&m).unwrap()
        }
    }

    impl TestContext for PlayerTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("minkamp.db");
            let user_id = Users::from_db(Db::open(&db_path).unwrap())
                .create("trener", "fotball1")
                .unwrap();
            PlayerTestContext {
                _temp_dir: temp_dir,
                db_path,
                user_id,
            }
        }
    }

    #[test_context(PlayerTestContext)]
    #[test]
    fn test_player_crud(ctx: &mut PlayerTestContext) {
        let mut players = ctx.players();

        let id = players
            .create(&Player::new(ctx.user_id, " Ola Nordmann ", Position::Defense, Some(4)))
            .unwrap();
        let stored = players.get(id).unwrap().unwrap();
        assert_eq!(stored.name, "Ola Nordmann");
        assert_eq!(stored.position, Position::Defense);
        assert_eq!(stored.number, Some(4));
        assert!(stored.active);

        let update = PlayerUpdate {
            position: Some(Position::Attack),
            number: Some(None),
            ..Default::default()
        };
        let updated = players.update(id, &update).unwrap();
        assert_eq!(updated.name, "Ola Nordmann");
        assert_eq!(updated.position, Position::Attack);
        assert_eq!(updated.number, None);
        let reloaded = players.get(id).unwrap().unwrap();
        assert_eq!(reloaded.position, Position::Attack);
        assert_eq!(reloaded.number, None);
    }

    #[test_context(PlayerTestContext)]
    #[test]
    fn test_find_by_id_or_name(ctx: &mut PlayerTestContext) {
        let mut players = ctx.players();
        let id = players
            .create(&Player::new(ctx.user_id, "Kari", Position::Midfield, None))
            .unwrap();

        assert_eq!(players.find(ctx.user_id, &id.to_string()).unwrap().name, "Kari");
        assert_eq!(players.find(ctx.user_id, "kari").unwrap().id, Some(id));
        assert!(players.find(ctx.user_id, "Per").is_err());
        assert!(players.find(ctx.user_id + 1, &id.to_string()).is_err());
    }

    #[test_context(PlayerTestContext)]
    #[test]
    fn test_list_sorted_by_position_then_name(ctx: &mut PlayerTestContext) {
        let mut players = ctx.players();
        let roster = vec![
            Player::new(ctx.user_id, "Siri", Position::Attack, None),
            Player::new(ctx.user_id, "anna", Position::Defense, None),
            Player::new(ctx.user_id, "Mats", Position::Goalkeeper, Some(1)),
            Player::new(ctx.user_id, "Bjørn", Position::Defense, None),
        ];
        assert_eq!(players.create_many(&roster).unwrap(), 4);

        let names: Vec<String> = players.list(ctx.user_id, false).unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Mats", "anna", "Bjørn", "Siri"]);
    }

    #[test_context(PlayerTestContext)]
    #[test]
    fn test_deactivate_hides_player(ctx: &mut PlayerTestContext) {
        let mut players = ctx.players();
        let id = players
            .create(&Player::new(ctx.user_id, "Per", Position::Midfield, None))
            .unwrap();

        players.deactivate(id).unwrap();
        assert!(players.list(ctx.user_id, false).unwrap().is_empty());
        assert_eq!(players.list(ctx.user_id, true).unwrap().len(), 1);
        assert!(!players.get(id).unwrap().unwrap().active);

        players.reactivate(id).unwrap();
        assert_eq!(players.list(ctx.user_id, false).unwrap().len(), 1);

        assert!(players.deactivate(id + 100).is_err());
    }

    #[test_context(PlayerTestContext)]
    #[test]
    fn test_squad_selection(ctx: &mut PlayerTestContext) {
        let mut players = ctx.players();
        let keeper = players
            .create(&Player::new(ctx.user_id, "Mats", Position::Goalkeeper, None))
            .unwrap();
        let back = players
            .create(&Player::new(ctx.user_id, "Anna", Position::Defense, None))
            .unwrap();
        let forward = players
            .create(&Player::new(ctx.user_id, "Siri", Position::Attack, None))
            .unwrap();
        let match_id = ctx.add_match();
        let mut squads = ctx.squads();

        let entries = squads.get(match_id, ctx.user_id).unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| !e.selected));

        squads.replace(match_id, &[forward, keeper, keeper]).unwrap();
        let selected: Vec<Option<i64>> = squads.selected(match_id).unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(selected, vec![Some(keeper), Some(forward)]);

        squads.set_player(match_id, back, true).unwrap();
        squads.set_player(match_id, forward, false).unwrap();
        let selected: Vec<String> = squads.selected(match_id).unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(selected, vec!["Mats", "Anna"]);

        let entries = squads.get(match_id, ctx.user_id).unwrap();
        let flags: Vec<(String, bool)> = entries.into_iter().map(|e| (e.player.name, e.selected)).collect();
        assert_eq!(
            flags,
            vec![
                ("Mats".to_string(), true),
                ("Anna".to_string(), true),
                ("Siri".to_string(), false)
            ]
        );
    }
}
