extern crate glsandbox;

use std::fs;
use std::path::PathBuf;

use glsandbox::prelude::*;

#[test]
fn load_file() {
    let path = std::env::temp_dir().join(format!("glsandbox-settings-{}.json", std::process::id()));
    fs::write(
        &path,
        r#"{
            "window": { "title": "Sandbox", "size": { "x": 1024, "y": 768 } },
            "render": { "clear_color": [0.0, 0.0, 0.0, 1.0] },
            "shader": "res/shaders/Other.shader",
            "headless_frames": 10
        }"#,
    )
    .unwrap();

    let settings = Settings::load(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(settings.window.title, "Sandbox");
    assert_eq!(settings.window.size, Vector2::new(1024, 768));
    assert!(settings.window.vsync);
    assert_eq!(settings.render.clear_color, [0.0, 0.0, 0.0, 1.0]);
    assert_eq!(settings.scene, SceneKind::Basic);
    assert_eq!(settings.shader, PathBuf::from("res/shaders/Other.shader"));
    assert_eq!(settings.headless_frames, Some(10));
}

#[test]
fn missing_file() {
    let err = Settings::load("does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("exist.json"));
}
