#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use minkamp::db::db::Db;
    use minkamp::db::matches::{Match, Matches};
    use minkamp::db::plans::{plan_records, Plans, SubstitutionRecord};
    use minkamp::db::players::{Player, Players};
    use minkamp::db::playing_time::PlayingTimes;
    use minkamp::db::users::Users;
    use minkamp::libs::config::PlanConfig;
    use minkamp::libs::plan::{compute_playing_time, PlayerPlan, PlayingTime, SubstitutionPlan};
    use minkamp::libs::position::Position;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct PlanTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
        user_id: i64,
        match_id: i64,
        ola: i64,
        kari: i64,
    }

    impl PlanTestContext {
        fn db(&self) -> Db {
            Db::open(&self.db_path).unwrap()
        }

        fn plans(&self) -> Plans {
            Plans::from_db(self.db())
        }

        fn playing_times(&self) -> PlayingTimes {
            PlayingTimes::from_db(self.db())
        }

        fn player(&self, id: i64) -> Player {
            Players::from_db(self.db()).get(id).unwrap().unwrap()
        }

        fn sample_plan(&self) -> SubstitutionPlan<i64> {
            let mut plan = SubstitutionPlan::new();
            plan.insert(self.ola, PlayerPlan::new("Ola", vec![true, true, false, true]));
            plan.insert(self.kari, PlayerPlan::new("Kari", vec![false, true, true, true]));
            plan
        }

        fn add_match(&self, periods: u32) -> i64 {
            let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
            let mut m = Match::new(self.user_id, date, "Odd", true, &PlanConfig::default());
            m.period_count = periods;
            m.period_length = 15;
            Matches::from_db(self.db()).create(&m).unwrap()
        }
    }

    impl TestContext for PlanTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("minkamp.db");
            let user_id = Users::from_db(Db::open(&db_path).unwrap())
                .create("trener", "fotball1")
                .unwrap();

            let mut players = Players::from_db(Db::open(&db_path).unwrap());
            let ola = players.create(&Player::new(user_id, "Ola", Position::Defense, None)).unwrap();
            let kari = players.create(&Player::new(user_id, "Kari", Position::Attack, None)).unwrap();

            let date = NaiveDate::from_ymd_opt(2025, 5, 3).unwrap();
            let mut m = Match::new(user_id, date, "Brann", true, &PlanConfig::default());
            m.period_count = 4;
            m.period_length = 15;
            let match_id = Matches::from_db(Db::open(&db_path).unwrap()).create(&m).unwrap();

            PlanTestContext {
                _temp_dir: temp_dir,
                db_path,
                user_id,
                match_id,
                ola,
                kari,
            }
        }
    }

    #[test]
    fn test_plan_records_cover_every_cell() {
        let plan = SubstitutionPlan::from_sequences([(7_i64, vec![true, false]), (3, vec![false])]);
        let records = plan_records(1, &plan, 2);

        let cells: Vec<(i64, u32, bool)> = records.iter().map(|r| (r.player_id, r.period, r.on_field)).collect();
        assert_eq!(cells, vec![(3, 0, false), (3, 1, false), (7, 0, true), (7, 1, false)]);
        assert!(records.iter().all(|r| r.match_id == 1 && r.id.is_none()));
    }

    #[test_context(PlanTestContext)]
    #[test]
    fn test_save_and_load_plan(ctx: &mut PlanTestContext) {
        let mut plans = ctx.plans();
        let plan = ctx.sample_plan();

        plans.save_plan(ctx.match_id, &plan, 4).unwrap();
        assert_eq!(plans.fetch(ctx.match_id).unwrap().len(), 8);
        assert_eq!(plans.load_plan(ctx.match_id, 4).unwrap(), plan);

        let mut changed = plan.clone();
        changed.set(&ctx.kari, 0, true);
        plans.save_plan(ctx.match_id, &changed, 4).unwrap();
        assert_eq!(plans.fetch(ctx.match_id).unwrap().len(), 8);
        assert_eq!(plans.load_plan(ctx.match_id, 4).unwrap(), changed);
    }

    #[test_context(PlanTestContext)]
    #[test]
    fn test_load_plan_resizes_to_period_count(ctx: &mut PlanTestContext) {
        let mut plans = ctx.plans();
        plans.save_plan(ctx.match_id, &ctx.sample_plan(), 4).unwrap();

        let shorter = plans.load_plan(ctx.match_id, 2).unwrap();
        assert_eq!(shorter.get(&ctx.ola).unwrap().on_field, vec![true, true]);

        let longer = plans.load_plan(ctx.match_id, 6).unwrap();
        assert_eq!(
            longer.get(&ctx.kari).unwrap().on_field,
            vec![false, true, true, true, false, false]
        );
    }

    #[test_context(PlanTestContext)]
    #[test]
    fn test_load_plan_for_squad(ctx: &mut PlanTestContext) {
        let mut plans = ctx.plans();
        let mut plan = SubstitutionPlan::new();
        plan.insert(ctx.ola, PlayerPlan::new("Ola", vec![true, false, true, false]));
        plans.save_plan(ctx.match_id, &plan, 4).unwrap();

        let squad = vec![ctx.player(ctx.kari)];
        let loaded = plans.load_plan_for_squad(ctx.match_id, &squad, 4).unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.get(&ctx.ola).is_none());
        assert_eq!(loaded.get(&ctx.kari).unwrap().on_field, vec![false; 4]);

        let squad = vec![ctx.player(ctx.ola), ctx.player(ctx.kari)];
        let loaded = plans.load_plan_for_squad(ctx.match_id, &squad, 4).unwrap();
        assert_eq!(loaded.get(&ctx.ola).unwrap().on_field, vec![true, false, true, false]);
        assert_eq!(loaded.get(&ctx.ola).unwrap().name, "Ola");
    }

    #[test_context(PlanTestContext)]
    #[test]
    fn test_set_and_delete_cells(ctx: &mut PlanTestContext) {
        let mut plans = ctx.plans();

        plans.set(ctx.match_id, ctx.ola, 2, true).unwrap();
        plans.set(ctx.match_id, ctx.ola, 2, false).unwrap();
        plans.set(ctx.match_id, ctx.kari, 0, true).unwrap();

        let records = plans.fetch(ctx.match_id).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!((records[0].player_id, records[0].on_field), (ctx.kari, true));
        assert_eq!((records[1].player_id, records[1].on_field), (ctx.ola, false));

        assert_eq!(plans.delete(ctx.match_id).unwrap(), 2);
        assert!(plans.fetch(ctx.match_id).unwrap().is_empty());
    }

    #[test_context(PlanTestContext)]
    #[test]
    fn test_replace_skips_records_of_other_matches(ctx: &mut PlanTestContext) {
        let other_match = ctx.add_match(4);
        let mut plans = ctx.plans();

        let records = vec![
            SubstitutionRecord::new(ctx.match_id, ctx.ola, 0, true),
            SubstitutionRecord::new(other_match, ctx.kari, 0, true),
        ];
        plans.replace(ctx.match_id, &records).unwrap();

        let stored = plans.fetch(ctx.match_id).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].player_id, ctx.ola);
        assert!(plans.fetch(other_match).unwrap().is_empty());
    }

    #[test_context(PlanTestContext)]
    #[test]
    fn test_store_computed_playing_time(ctx: &mut PlanTestContext) {
        let plan = ctx.sample_plan();
        let mut playing_times = ctx.playing_times();

        playing_times
            .store_computed(ctx.match_id, &compute_playing_time(&plan, 4, 15))
            .unwrap();

        let minutes: Vec<(String, u32)> = playing_times
            .fetch(ctx.match_id)
            .unwrap()
            .into_iter()
            .map(|r| (r.player_name, r.minutes))
            .collect();
        assert_eq!(minutes, vec![("Kari".to_string(), 45), ("Ola".to_string(), 45)]);

        let mut benched = plan.clone();
        benched.insert(ctx.ola, PlayerPlan::new("Ola", vec![false; 4]));
        playing_times
            .store_computed(ctx.match_id, &compute_playing_time(&benched, 4, 15))
            .unwrap();
        assert_eq!(playing_times.fetch_player(ctx.match_id, ctx.ola).unwrap(), Some(0));
        assert_eq!(playing_times.fetch(ctx.match_id).unwrap().len(), 2);
    }

    #[test_context(PlanTestContext)]
    #[test]
    fn test_playing_time_upsert_update_delete(ctx: &mut PlanTestContext) {
        let mut playing_times = ctx.playing_times();

        assert!(playing_times.update(ctx.match_id, ctx.ola, 30).is_err());

        playing_times.upsert(ctx.match_id, ctx.ola, 30).unwrap();
        playing_times.upsert(ctx.match_id, ctx.ola, 45).unwrap();
        assert_eq!(playing_times.fetch_player(ctx.match_id, ctx.ola).unwrap(), Some(45));

        playing_times.update(ctx.match_id, ctx.ola, 60).unwrap();
        assert_eq!(playing_times.fetch_player(ctx.match_id, ctx.ola).unwrap(), Some(60));

        playing_times.upsert(ctx.match_id, ctx.kari, 15).unwrap();
        assert_eq!(playing_times.delete(ctx.match_id, Some(ctx.ola)).unwrap(), 1);
        assert_eq!(playing_times.fetch_player(ctx.match_id, ctx.ola).unwrap(), None);
        assert_eq!(playing_times.delete(ctx.match_id, None).unwrap(), 1);
        assert!(playing_times.fetch(ctx.match_id).unwrap().is_empty());
    }

    #[test_context(PlanTestContext)]
    #[test]
    fn test_season_totals(ctx: &mut PlanTestContext) {
        let second_match = ctx.add_match(2);
        let mut playing_times = ctx.playing_times();

        playing_times.upsert(ctx.match_id, ctx.ola, 45).unwrap();
        playing_times.upsert(second_match, ctx.ola, 30).unwrap();

        let totals = playing_times.season_totals(ctx.user_id).unwrap();
        assert_eq!(totals.len(), 2);

        let kari = &totals[0];
        assert_eq!(kari.name, "Kari");
        assert_eq!(kari.position, Position::Attack);
        assert_eq!((kari.matches, kari.minutes, kari.possible_minutes), (0, 0, 0));
        assert_eq!(kari.percent, 0.0);

        let ola = &totals[1];
        assert_eq!(ola.name, "Ola");
        assert_eq!(ola.matches, 2);
        assert_eq!(ola.minutes, 75);
        assert_eq!(ola.possible_minutes, 90);
        assert_eq!(ola.percent, 83.3);
    }

    #[test_context(PlanTestContext)]
    #[test]
    fn test_save_with_playing_time_writes_both_tables(ctx: &mut PlanTestContext) {
        let plan = ctx.sample_plan();
        let times = compute_playing_time(&plan, 4, 15);

        ctx.plans().save_with_playing_time(ctx.match_id, &plan, 4, &times).unwrap();

        assert_eq!(ctx.plans().load_plan(ctx.match_id, 4).unwrap(), plan);
        let mut playing_times = ctx.playing_times();
        assert_eq!(playing_times.fetch_player(ctx.match_id, ctx.ola).unwrap(), Some(45));
        assert_eq!(playing_times.fetch_player(ctx.match_id, ctx.kari).unwrap(), Some(45));
    }

    #[test_context(PlanTestContext)]
    #[test]
    fn test_failed_save_keeps_previous_plan_and_minutes(ctx: &mut PlanTestContext) {
        let plan = ctx.sample_plan();
        ctx.plans()
            .save_with_playing_time(ctx.match_id, &plan, 4, &compute_playing_time(&plan, 4, 15))
            .unwrap();

        let mut benched = plan.clone();
        benched.insert(ctx.ola, PlayerPlan::new("Ola", vec![false; 4]));
        let mut times = compute_playing_time(&benched, 4, 15);
        times.insert(
            9999,
            PlayingTime {
                periods_played: 1,
                total_minutes: 15,
                percent: 25.0,
            },
        );

        assert!(ctx.plans().save_with_playing_time(ctx.match_id, &benched, 4, &times).is_err());

        assert_eq!(ctx.plans().load_plan(ctx.match_id, 4).unwrap(), plan);
        assert_eq!(ctx.playing_times().fetch_player(ctx.match_id, ctx.ola).unwrap(), Some(45));
        assert_eq!(ctx.playing_times().fetch(ctx.match_id).unwrap().len(), 2);
    }

    #[test_context(PlanTestContext)]
    #[test]
    fn test_clear_with_playing_time(ctx: &mut PlanTestContext) {
        let plan = ctx.sample_plan();
        ctx.plans()
            .save_with_playing_time(ctx.match_id, &plan, 4, &compute_playing_time(&plan, 4, 15))
            .unwrap();

        assert_eq!(ctx.plans().clear_with_playing_time(ctx.match_id).unwrap(), 8);
        assert!(ctx.plans().fetch(ctx.match_id).unwrap().is_empty());
        assert!(ctx.playing_times().fetch(ctx.match_id).unwrap().is_empty());
    }
}
