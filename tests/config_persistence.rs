use std::path::PathBuf;

use lassoplot::{HudConfig, Key, PersistedConfig, PointLook, ScatterSelectConfig, SelectionConfig};

fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("lassoplot-test-{}", std::process::id()))
        .join(name)
}

fn custom() -> PersistedConfig {
    PersistedConfig {
        selection: SelectionConfig {
            alpha_other: 0.4,
            expand_selected: None,
            click_tolerance: 0.05,
            additive_key: Key::Other("a".to_string()),
        },
        hud: HudConfig {
            size: 0.08,
            ..HudConfig::default()
        },
        look: PointLook {
            color: [10, 20, 30],
            radius: 5.0,
        },
    }
}

#[test]
fn yaml_round_trip() {
    let path = scratch_file("nested/selection.yaml");
    let cfg = custom();
    cfg.save_to_path(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("alpha_other"));
    assert_eq!(PersistedConfig::load_from_path(&path).unwrap(), cfg);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn json_round_trip() {
    let path = scratch_file("selection.json");
    let cfg = custom();
    cfg.save_to_path(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.trim_start().starts_with('{'));
    assert_eq!(PersistedConfig::load_from_path(&path).unwrap(), cfg);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_file_is_an_error() {
    let path = scratch_file("does-not-exist.yaml");
    let err = PersistedConfig::load_from_path(&path).unwrap_err();
    assert!(err.contains("Failed to read"));
}

#[test]
fn malformed_file_is_an_error() {
    let path = scratch_file("broken.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ not json").unwrap();
    let err = PersistedConfig::load_from_path(&path).unwrap_err();
    assert!(err.contains("Deserialization error"));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn persisted_settings_overlay_window_config() {
    let mut cfg = ScatterSelectConfig {
        title: "kept".to_string(),
        ..Default::default()
    };
    cfg.apply_persisted(custom());
    assert_eq!(cfg.title, "kept");
    assert_eq!(cfg.look.radius, 5.0);
    assert_eq!(cfg.persisted(), custom());
}
