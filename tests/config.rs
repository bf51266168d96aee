#[cfg(test)]
mod tests {
    use minkamp::libs::config::{Config, ConfigError, PlanConfig, CONFIG_FILE_NAME};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(values: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = values.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let plan = PlanConfig::default();

        assert_eq!((plan.min_on_field, plan.max_on_field), (7, 11));
        assert_eq!(plan.players_on_field, 7);
        assert_eq!(plan.period_length_minutes, 5);
        assert_eq!(plan.match_minutes, 60);
        assert_eq!(plan.max_periods, 12);
        assert_eq!(plan.validate(), Ok(()));
        assert_eq!(Config::default().db_path, None);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_range = PlanConfig {
            min_on_field: 9,
            max_on_field: 8,
            ..Default::default()
        };
        assert_eq!(bad_range.validate(), Err(ConfigError::InvalidOnFieldRange { min: 9, max: 8 }));

        let bad_suggestion = PlanConfig {
            players_on_field: 12,
            ..Default::default()
        };
        assert_eq!(bad_suggestion.validate(), Err(ConfigError::InvalidPlayersOnField(12)));

        let no_length = PlanConfig {
            period_length_minutes: 0,
            ..Default::default()
        };
        assert_eq!(no_length.validate(), Err(ConfigError::InvalidPeriodLength));

        let bad_match = PlanConfig {
            min_match_minutes: 100,
            ..Default::default()
        };
        assert_eq!(bad_match.validate(), Err(ConfigError::InvalidMatchLength { min: 100, max: 90 }));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(lookup(&[
                ("MINKAMP_DB_PATH", "/tmp/lag.db"),
                ("MINKAMP_PLAYERS_ON_FIELD", " 9 "),
                ("MINKAMP_PERIOD_LENGTH", "10"),
            ]))
            .unwrap();

        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/lag.db")));
        assert_eq!(config.plan.players_on_field, 9);
        assert_eq!(config.plan.period_length_minutes, 10);
        assert_eq!(config.plan.min_on_field, 7);
    }

    #[test]
    fn test_invalid_override_is_reported() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(lookup(&[("MINKAMP_MAX_ON_FIELD", "eleven")]))
            .unwrap_err();

        assert_eq!(
            err,
            ConfigError::InvalidOverride {
                key: "MINKAMP_MAX_ON_FIELD".to_string(),
                value: "eleven".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_db_path_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[("MINKAMP_DB_PATH", "")])).unwrap();
        assert_eq!(config.db_path, None);
    }

    #[test]
    fn test_save_and_read() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);

        assert_eq!(Config::read_from(&path).unwrap(), Config::default());

        let mut config = Config::default();
        config.plan.min_on_field = 5;
        config.plan.players_on_field = 8;
        config.db_path = Some(temp_dir.path().join("lag.db"));
        config.save_to(&path).unwrap();

        assert_eq!(Config::read_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{"plan": {"max_on_field": 9}}"#).unwrap();

        let config = Config::read_from(&path).unwrap();
        assert_eq!(config.plan.max_on_field, 9);
        assert_eq!(config.plan.min_on_field, 7);
        assert_eq!(config.db_path, None);
    }
}
