use crate::errors::{ConfabError, ConfabResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, sync::RwLock};

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub endpoint: String,
    pub show_typing_indicator: bool,
    pub sanitize_output: bool,
    pub transcript_path: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000/".to_string(),
            show_typing_indicator: true,
            sanitize_output: true,
            transcript_path: "confab_transcript.html".to_string(),
            log_level: "info".to_string(),
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

pub fn initialize_config() -> ConfabResult<()> {
    let config_path = get_config_path()?;

    // If config exists, load it
    if config_path.exists() {
        let config_str = fs::read_to_string(&config_path)
            .map_err(|e| ConfabError::config_error(format!("Failed to read config file: {}", e)))?;

        let mut config: Config = serde_json::from_str(&config_str)
            .map_err(|e| ConfabError::config_error(format!("Failed to parse config: {}", e)))?;

        // Environment wins over the file but is never written back
        if let Ok(endpoint) = env::var("CONFAB_ENDPOINT") {
            config.endpoint = endpoint;
        }

        validate_config(&config)?;

        *CONFIG.write().unwrap() = config;
    } else {
        // Create default config
        let mut config = Config::default();

        if let Ok(endpoint) = env::var("CONFAB_ENDPOINT") {
            config.endpoint = endpoint;
        }

        validate_config(&config)?;

        // Save default config
        fs::create_dir_all(config_path.parent().unwrap()).map_err(|e| {
            ConfabError::config_error(format!("Failed to create config directory: {}", e))
        })?;

        let config_str = serde_json::to_string_pretty(&config)
            .map_err(|e| ConfabError::config_error(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, config_str)
            .map_err(|e| ConfabError::config_error(format!("Failed to write config file: {}", e)))?;

        *CONFIG.write().unwrap() = config;
    }

    Ok(())
}

fn get_config_path() -> ConfabResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| ConfabError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("confab").join("config.json"))
}

fn validate_config(config: &Config) -> ConfabResult<()> {
    if config.endpoint.is_empty() {
        return Err(ConfabError::config_error("Reply endpoint is required"));
    }

    if !config.endpoint.starts_with("http://") && !config.endpoint.starts_with("https://") {
        return Err(ConfabError::config_error(
            "Reply endpoint must be an http:// or https:// URL",
        ));
    }

    if !LOG_LEVELS.contains(&config.log_level.as_str()) {
        return Err(ConfabError::config_error(
            "log_level must be one of error, warn, info, debug, trace",
        ));
    }

    if config.transcript_path.is_empty() {
        return Err(ConfabError::config_error("Transcript path is required"));
    }

    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap().clone()
}

pub fn update_config(updated_config: Config) -> ConfabResult<()> {
    validate_config(&updated_config)?;

    let config_path = get_config_path()?;
    let config_str = serde_json::to_string_pretty(&updated_config)
        .map_err(|e| ConfabError::config_error(format!("Failed to serialize config: {}", e)))?;

    fs::write(&config_path, config_str)
        .map_err(|e| ConfabError::config_error(format!("Failed to write config file: {}", e)))?;

    *CONFIG.write().unwrap() = updated_config;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_config_default_is_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_empty_endpoint() {
        let mut config = Config::default();
        config.endpoint = "".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_bad_scheme() {
        let mut config = Config::default();
        config.endpoint = "ftp://localhost:8000/".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_bad_log_level() {
        let mut config = Config::default();
        config.log_level = "chatty".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_config_round_trips_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.endpoint = "http://127.0.0.1:9000/".to_string();
        config.show_typing_indicator = false;

        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        let loaded: Config = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(loaded.endpoint, "http://127.0.0.1:9000/");
        assert!(!loaded.show_typing_indicator);
        assert!(loaded.sanitize_output);
    }
}
