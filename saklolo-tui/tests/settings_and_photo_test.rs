use std::fs;

use saklolo::config::{Settings, SettingsOverrides};
use saklolo::photo::PhotoPreview;
use saklolo_types::ColorScheme;

#[test]
fn explicit_settings_file_is_read_and_cli_wins() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saklolo.toml");
    fs::write(
        &path,
        "server_url = \"https://relief.example/api\"\ncolor_scheme = \"solarized\"\nusername = \"maria\"\n",
    )
    .unwrap();

    let settings = Settings::load(
        Some(&path),
        SettingsOverrides {
            username: Some("jun".to_string()),
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(settings.server_url, "https://relief.example/api");
    assert_eq!(settings.color_scheme(), ColorScheme::Solarized);
    assert_eq!(settings.username.as_deref(), Some("jun"));
}

#[test]
fn missing_explicit_settings_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Settings::load(Some(&dir.path().join("nope.toml")), SettingsOverrides::default());
    assert!(result.is_err());
}

#[test]
fn staged_photo_is_released_when_preview_is_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flood.gif");
    // GIF89a header with a 2x3 logical screen
    fs::write(&path, b"GIF89a\x02\x00\x03\x00\x00\x00\x00").unwrap();

    let preview = PhotoPreview::stage(&path).unwrap();
    assert_eq!(preview.mime_type(), "image/gif");
    assert_eq!(preview.dimensions(), Some((2, 3)));
    let staged = preview.staged_path().to_path_buf();
    assert!(staged.exists());
    assert_ne!(staged, path);

    drop(preview);
    assert!(!staged.exists());
    assert!(path.exists());
}
