//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};

use super::defaults::config_file_names;
use super::env::apply_overrides_with;
use super::types::Config;
use super::validation::validate_config;

/// Load configuration from a file. The result is not validated; see
/// [`resolve_config`].
pub fn load_config(path: &Path) -> Result<Config> {
    let format = if path.extension().is_some_and(|e| e == "toml") {
        "TOML"
    } else {
        "YAML"
    };
    info!(path = %path.display(), format, "loading config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

    let config: Config = if format == "TOML" {
        toml::from_str(&content).map_err(ConfigError::TomlError)?
    } else {
        serde_yaml::from_str(&content).map_err(ConfigError::YamlError)?
    };

    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Find configuration file in directory or parent directories.
///
/// At each directory level the search checks `<dir>/<name>` and then
/// `<dir>/.github/<name>`. The first match wins.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let config_path = current.join(name);
            if config_path.exists() {
                info!(path = %config_path.display(), "found config file");
                return Some(config_path);
            }

            let github_path = current.join(".github").join(name);
            if github_path.exists() {
                info!(path = %github_path.display(), "found config file in .github/");
                return Some(github_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Resolve the effective configuration once at startup.
///
/// A missing file falls back to defaults; a file that exists but is
/// malformed is an error. Environment overrides are applied last and the
/// merged result is validated once.
pub fn resolve_config(dir: &Path) -> Result<(Config, Option<PathBuf>)> {
    resolve_config_with(dir, |key| std::env::var(key).ok())
}

/// [`resolve_config`] with an arbitrary environment lookup
pub fn resolve_config_with<F>(dir: &Path, lookup: F) -> Result<(Config, Option<PathBuf>)>
where
    F: Fn(&str) -> Option<String>,
{
    let (mut config, path) = match find_config(dir) {
        Some(path) => (load_config(&path)?, Some(path)),
        None => {
            warn!(dir = %dir.display(), "no config found, using defaults");
            (Config::default(), None)
        }
    };

    apply_overrides_with(&mut config, lookup);
    validate_config(&config)?;
    Ok((config, path))
}
