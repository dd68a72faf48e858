//! Lookup of the settings file that tunes symbols, placement and style.
//!
//! A `-c` path always wins. Without one, the first existing file among the
//! project-local `oddity/config.toml` and the user's config directory is
//! used, and built-in defaults apply when neither exists.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use oddity::{OddityError, config::AppConfig};

/// Settings file next to the diagrams being rendered
const LOCAL_CONFIG: &str = "oddity/config.toml";

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid settings in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("settings file {} does not exist", .0.display())]
    MissingFile(PathBuf),
}

impl From<ConfigError> for OddityError {
    fn from(err: ConfigError) -> Self {
        OddityError::configuration(err.to_string())
    }
}

/// Where a settings file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigSource {
    Local,
    User,
}

impl ConfigSource {
    fn name(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::User => "user",
        }
    }
}

/// Implicit settings files in lookup order.
fn implicit_candidates() -> Vec<(ConfigSource, PathBuf)> {
    let mut candidates = vec![(ConfigSource::Local, PathBuf::from(LOCAL_CONFIG))];
    match ProjectDirs::from("com", "oddity", "oddity") {
        Some(dirs) => candidates.push((ConfigSource::User, dirs.config_dir().join(CONFIG_FILE_NAME))),
        None => debug!("No user config directory on this platform"),
    }
    candidates
}

/// Loads the settings for one run.
///
/// # Arguments
///
/// * `explicit_path` - The `-c` argument; a missing file there is an error
///
/// # Errors
///
/// Returns `OddityError::Configuration` when the explicit file is missing or
/// when the chosen file is not valid settings TOML, and `OddityError::Io`
/// when it cannot be read.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, OddityError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading settings from -c");
        return load_config_file(path);
    }

    for (source, path) in implicit_candidates() {
        if path.exists() {
            info!(source = source.name(), path = path.display().to_string(); "Loading settings");
            return load_config_file(&path);
        }
        debug!(source = source.name(), path = path.display().to_string(); "No settings file");
    }

    debug!("Using default settings");
    Ok(AppConfig::default())
}

fn load_config_file(path: &Path) -> Result<AppConfig, OddityError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_explicit_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[placement]\nscatter_attempts = 50\n\n[style]\nmesh_width = 1.5\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.placement().scatter_attempts(), 50);
        assert_eq!(config.style().mesh_width(), 1.5);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempdir().unwrap();
        let err = load_config(Some(dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, OddityError::Configuration(message) if message.contains("absent.toml")));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[style\noutline_width = ").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, OddityError::Configuration(message) if message.starts_with("invalid settings in")));
    }

    #[test]
    fn test_local_file_is_looked_up_first() {
        let candidates = implicit_candidates();
        assert_eq!(candidates[0], (ConfigSource::Local, PathBuf::from(LOCAL_CONFIG)));
        assert!(candidates[1..].iter().all(|(source, _)| *source == ConfigSource::User));
    }
}
