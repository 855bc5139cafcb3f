use super::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_empty_toml_produces_defaults() {
    let cfg = parse_config("").expect("Should parse empty TOML");
    assert_eq!(cfg, DaemonConfig::default());
    assert_eq!(cfg.catalog.seed_size, DEFAULT_SEED_SIZE);
}

#[test]
fn test_resolve_defaults() {
    let settings = DaemonConfig::default()
        .resolve(&ConfigOverrides::default())
        .unwrap();
    assert_eq!(settings.seed_size, DEFAULT_SEED_SIZE);
    assert_eq!(settings.batch, BatchConfig::default());
}

#[test]
fn test_file_values_are_used() {
    let cfg = parse_config(
        r#"
[catalog]
seed_size = 50

[batch]
add_interval = "2s"
get_interval = "250ms"
max_pending = 8
"#,
    )
    .unwrap();
    let settings = cfg.resolve(&ConfigOverrides::default()).unwrap();
    assert_eq!(settings.seed_size, 50);
    assert_eq!(settings.batch.add_interval, Duration::from_secs(2));
    assert_eq!(settings.batch.get_interval, Duration::from_millis(250));
    assert_eq!(settings.batch.update_interval, Duration::from_secs(1));
    assert_eq!(settings.batch.max_pending, Some(8));
}

#[test]
fn test_overrides_win_over_file() {
    let cfg = parse_config("[batch]\nadd_interval = \"2s\"\n[catalog]\nseed_size = 50\n").unwrap();
    let overrides = ConfigOverrides {
        seed_size: Some(7),
        add_interval: Some(Duration::from_millis(500)),
        ..ConfigOverrides::default()
    };
    let settings = cfg.resolve(&overrides).unwrap();
    assert_eq!(settings.seed_size, 7);
    assert_eq!(settings.batch.add_interval, Duration::from_millis(500));
}

#[test]
fn test_zero_max_pending_disables_bound() {
    let cfg = parse_config("[batch]\nmax_pending = 0\n").unwrap();
    let settings = cfg.resolve(&ConfigOverrides::default()).unwrap();
    assert_eq!(settings.batch.max_pending, None);
}

#[test]
fn test_invalid_duration_is_reported() {
    let cfg = parse_config("[batch]\nget_interval = \"soon\"\n").unwrap();
    let err = cfg.resolve(&ConfigOverrides::default()).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidDuration {
            field: "batch.get_interval",
            ..
        }
    ));
}

#[test]
fn test_unknown_field_is_rejected() {
    assert!(parse_config("[batch]\nflush_everything = true\n").is_err());
}

#[test]
fn test_load_from_explicit_path() {
    let dir = tempdir().expect("tempdir");
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "[catalog]\nseed_size = 12\n").expect("write config");

    let cfg = load_config(Some(&config_path)).unwrap();
    assert_eq!(cfg.catalog.seed_size, 12);
}

#[test]
fn test_load_missing_explicit_path_fails() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("nope.toml");
    assert!(matches!(
        load_config(Some(&missing)),
        Err(ConfigError::NotFound(_))
    ));
}

#[test]
fn test_roundtrip_serialization() {
    let cfg = DaemonConfig {
        catalog: CatalogSection { seed_size: 3 },
        batch: BatchSection {
            add_interval: Some("5s".to_string()),
            ..BatchSection::default()
        },
    };
    let serialized = toml::to_string(&cfg).expect("Should serialize");
    assert_eq!(parse_config(&serialized).unwrap(), cfg);
}
