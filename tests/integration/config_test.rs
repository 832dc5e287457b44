use progress_table::Config;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_config_load_nonexistent_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&temp_dir.path().join("missing.json")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.json");

    let config = Config {
        refresh_interval_ms: 120,
        fill_symbol: '#',
    };
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.refresh_interval(), Duration::from_millis(120));
}

#[test]
fn test_config_empty_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, "").unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_config_corrupted_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, b"\x00\x01not json").unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}
