use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, File};
use saklolo_types::ColorScheme;
use serde::Deserialize;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000/api";
pub const ENV_PREFIX: &str = "SAKLOLO_";
const SETTINGS_FILE: &str = "settings.toml";

/// Client settings after all layers have been merged
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    pub server_url: String,
    /// Kept as text so a typo in the file falls back to the default palette
    /// instead of refusing to start
    pub color_scheme: String,
    pub log_file: PathBuf,
    #[serde(default)]
    pub session_token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Values given on the command line. These win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub server_url: Option<String>,
    pub color_scheme: Option<String>,
    pub session_token: Option<String>,
    pub username: Option<String>,
}

impl Settings {
    /// Load settings with priority:
    /// 1. CLI overrides (highest priority)
    /// 2. `SAKLOLO_*` environment variables
    /// 3. Settings file (`--config` path, or `~/.saklolo/settings.toml`)
    /// 4. Built-in defaults
    pub fn load(config_file: Option<&Path>, overrides: SettingsOverrides) -> Result<Self> {
        let env: HashMap<String, String> = std::env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect();
        let default_file = config_dir().map(|dir| dir.join(SETTINGS_FILE));
        Self::build(config_file, default_file.as_deref(), &env, overrides)
    }

    fn build(
        explicit_file: Option<&Path>,
        default_file: Option<&Path>,
        env: &HashMap<String, String>,
        overrides: SettingsOverrides,
    ) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("server_url", DEFAULT_SERVER_URL)?
            .set_default("color_scheme", ColorScheme::Default.as_str())?
            .set_default("log_file", "saklolo.log")?;

        // An explicitly requested file must exist; the default one is optional
        if let Some(path) = explicit_file {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        } else if let Some(path) = default_file {
            if path.exists() {
                builder = builder.add_source(File::from(path.to_path_buf()).required(false));
            }
        }

        for key in ["server_url", "color_scheme", "log_file", "session_token", "username"] {
            let var = format!("{}{}", ENV_PREFIX, key.to_uppercase());
            if let Some(value) = env.get(&var) {
                builder = builder.set_override(key, value.as_str())?;
            }
        }

        if let Some(url) = overrides.server_url {
            builder = builder.set_override("server_url", url)?;
        }
        if let Some(scheme) = overrides.color_scheme {
            builder = builder.set_override("color_scheme", scheme)?;
        }
        if let Some(token) = overrides.session_token {
            builder = builder.set_override("session_token", token)?;
        }
        if let Some(username) = overrides.username {
            builder = builder.set_override("username", username)?;
        }

        let settings: Settings = builder
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Failed to parse settings")?;

        Ok(settings)
    }

    pub fn color_scheme(&self) -> ColorScheme {
        ColorScheme::parse(&self.color_scheme).unwrap_or_else(|| {
            log::warn!("Unknown color scheme '{}', using Default", self.color_scheme);
            ColorScheme::Default
        })
    }
}

/// The `~/.saklolo` directory
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".saklolo"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_without_any_sources() {
        let settings = Settings::build(None, None, &HashMap::new(), SettingsOverrides::default()).unwrap();
        assert_eq!(settings.server_url, DEFAULT_SERVER_URL);
        assert_eq!(settings.color_scheme(), ColorScheme::Default);
        assert_eq!(settings.log_file, PathBuf::from("saklolo.log"));
        assert_eq!(settings.session_token, None);
    }

    #[test]
    fn file_then_env_then_cli_take_priority() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(
            &path,
            "server_url = \"https://file.example/api\"\ncolor_scheme = \"Light\"\nusername = \"from-file\"\n",
        )
        .unwrap();

        let from_file = Settings::build(None, Some(&path), &HashMap::new(), SettingsOverrides::default()).unwrap();
        assert_eq!(from_file.server_url, "https://file.example/api");
        assert_eq!(from_file.color_scheme(), ColorScheme::Light);
        assert_eq!(from_file.username.as_deref(), Some("from-file"));

        let vars = env(&[("SAKLOLO_SERVER_URL", "https://env.example/api")]);
        let from_env = Settings::build(None, Some(&path), &vars, SettingsOverrides::default()).unwrap();
        assert_eq!(from_env.server_url, "https://env.example/api");
        assert_eq!(from_env.color_scheme(), ColorScheme::Light);

        let overrides = SettingsOverrides {
            server_url: Some("https://cli.example/api".to_string()),
            color_scheme: Some("solarized".to_string()),
            ..Default::default()
        };
        let from_cli = Settings::build(None, Some(&path), &vars, overrides).unwrap();
        assert_eq!(from_cli.server_url, "https://cli.example/api");
        assert_eq!(from_cli.color_scheme(), ColorScheme::Solarized);
    }

    #[test]
    fn missing_default_file_is_ignored_but_explicit_file_is_required() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        assert!(Settings::build(None, Some(&missing), &HashMap::new(), SettingsOverrides::default()).is_ok());
        assert!(Settings::build(Some(&missing), None, &HashMap::new(), SettingsOverrides::default()).is_err());
    }

    #[test]
    fn unknown_color_scheme_falls_back_to_default() {
        let vars = env(&[("SAKLOLO_COLOR_SCHEME", "neon")]);
        let settings = Settings::build(None, None, &vars, SettingsOverrides::default()).unwrap();
        assert_eq!(settings.color_scheme(), ColorScheme::Default);
    }
}
