use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub agility: Option<AgilityConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgilityConfig {
    pub endpoint: String,
    pub api_key: String,
}

fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".sprig")
        .join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig =
        toml::from_str(&contents).with_context(|| "Failed to parse config.toml")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert!(config.agility.is_none());
    }

    #[test]
    fn parses_agility_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[agility]\nendpoint = \"https://agility.example.com/api\"\napi_key = \"secret\"\n",
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        let agility = config.agility.unwrap();
        assert_eq!(agility.endpoint, "https://agility.example.com/api");
        assert_eq!(agility.api_key, "secret");
    }

    #[test]
    fn rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[agility\nendpoint =").unwrap();
        assert!(load_config_from(&path).is_err());
    }
}
