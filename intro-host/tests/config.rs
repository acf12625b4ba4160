//! # 配置文件加载测试

use std::fs;

use intro_host::{OutputFormat, Preview, PreviewConfig};
use tempfile::TempDir;

#[test]
fn test_missing_file_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    let config = PreviewConfig::load(dir.path().join("missing.json"));
    assert_eq!(config, PreviewConfig::default());
}

#[test]
fn test_invalid_json_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("intro.json");
    fs::write(&path, "{ not json").unwrap();

    assert_eq!(PreviewConfig::load(&path), PreviewConfig::default());
}

#[test]
fn test_partial_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("intro.json");
    fs::write(&path, r#"{ "fps": 30, "format": "json" }"#).unwrap();

    let config = PreviewConfig::load(&path);
    assert_eq!(config.fps, 30);
    assert_eq!(config.format, OutputFormat::Json);
    assert_eq!(config.screen.height, 731.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("intro.json");

    let mut config = PreviewConfig::default();
    config.screen.width = 360.0;
    config.screen.height = 640.0;
    config.print_every = 2;
    config.save(&path).unwrap();

    let loaded = PreviewConfig::load(&path);
    assert_eq!(loaded, config);
}

#[test]
fn test_loaded_height_drives_logo() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("intro.json");
    fs::write(&path, r#"{ "screen": { "width": 400, "height": 800 } }"#).unwrap();

    let preview = Preview::new(PreviewConfig::load(&path)).unwrap();
    let first = preview.sample(std::time::Duration::ZERO);

    // 开场时标志高度等于屏幕高度
    assert_eq!(first.values.logo_height, 800.0);
    assert_eq!(first.frame.logo.height, 1600.0);
}
