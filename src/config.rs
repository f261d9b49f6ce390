//! Application configuration
//!
//! Values come from `wayfinder.toml` when present, then `WAYFINDER_*`
//! environment variables (a `.env` file is loaded first), then CLI flags.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "wayfinder.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSection,
    pub data: DataSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4567,
        }
    }
}

/// Dataset locations. Relative file names resolve against `dir`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataSection {
    pub dir: PathBuf,
    pub buildings: PathBuf,
    pub paths: PathBuf,
    pub characters: PathBuf,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            buildings: PathBuf::from("campus_buildings.csv"),
            paths: PathBuf::from("campus_paths.csv"),
            characters: PathBuf::from("marvel.csv"),
        }
    }
}

impl DataSection {
    pub fn buildings_file(&self) -> PathBuf {
        self.dir.join(&self.buildings)
    }

    pub fn paths_file(&self) -> PathBuf {
        self.dir.join(&self.paths)
    }

    pub fn characters_file(&self) -> PathBuf {
        self.dir.join(&self.characters)
    }
}

impl AppConfig {
    /// Load from `path`, or from `wayfinder.toml` in the working directory
    /// if it exists, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Ok(env_file) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", env_file.display());
        }

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Override fields from `WAYFINDER_HOST`, `WAYFINDER_PORT` and
    /// `WAYFINDER_DATA_DIR` as reported by `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(host) = lookup("WAYFINDER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("WAYFINDER_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("WAYFINDER_PORT is not a port number: {:?}", port))?;
        }
        if let Some(dir) = lookup("WAYFINDER_DATA_DIR") {
            self.data.dir = PathBuf::from(dir);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 4567);
        assert_eq!(config.data.buildings_file(), PathBuf::from("data/campus_buildings.csv"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 8080

            [data]
            dir = "/srv/campus"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.data.paths_file(), PathBuf::from("/srv/campus/campus_paths.csv"));
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("wayfinder.toml");
        std::fs::write(&file, "[server]\nhost = \"0.0.0.0\"\nport = 80\n").unwrap();

        let mut config = AppConfig::from_file(&file).unwrap();
        config
            .apply_env(|key| match key {
                "WAYFINDER_PORT" => Some("9000".to_string()),
                "WAYFINDER_DATA_DIR" => Some("other".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.data.dir, PathBuf::from("other"));
    }

    #[test]
    fn test_bad_port_is_error() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env(|key| (key == "WAYFINDER_PORT").then(|| "eighty".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("WAYFINDER_PORT"));
    }
}
