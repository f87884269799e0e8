//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use kinship::{KinshipError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Invalid configuration {path}: {message}")]
    Validation { path: PathBuf, message: String },
}

impl From<ConfigError> for KinshipError {
    fn from(err: ConfigError) -> Self {
        KinshipError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (kinship/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
/// - Config file holds values the layout cannot use
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, KinshipError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("kinship/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "kinship", "kinship") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, KinshipError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: AppConfig = toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.message().to_string(),
    })?;

    config
        .validate()
        .map_err(|message| ConfigError::Validation {
            path: path.to_path_buf(),
            message,
        })?;

    debug!(layout:? = config.layout(); "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_explicit_config_is_loaded() {
        let file = config_file("[layout]\nnode_width = 150.0\n");

        let config = load_config(Some(file.path())).unwrap();

        assert_eq!(config.layout().node_width(), 150.0);
        assert_eq!(config.layout().node_height(), 60.0);
    }

    #[test]
    fn test_missing_explicit_config() {
        let err = load_config(Some("does/not/exist.toml")).unwrap_err();

        match err {
            KinshipError::Config(message) => assert!(message.contains("Missing configuration")),
            other => panic!("Expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_config() {
        let file = config_file("[layout\nnode_width = 1");

        let err = load_config(Some(file.path())).unwrap_err();

        assert!(matches!(err, KinshipError::Config(ref m) if m.contains("Failed to parse")));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let file = config_file("[layout]\nlevel_height = 10.0\n");

        let err = load_config(Some(file.path())).unwrap_err();

        assert!(matches!(err, KinshipError::Config(ref m) if m.contains("level_height")));
    }
}
