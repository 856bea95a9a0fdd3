use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::MigrateConfig;
use crate::errors::MigrateError;

/// Name of the optional configuration file
pub const CONFIG_FILE_NAME: &str = ".params-migrate.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<MigrateConfig, String> {
    let config = toml::from_str::<MigrateConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    config.rewrite.validate()?;
    Ok(config)
}

/// Try loading a discovered config file; problems fall back to defaults
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<MigrateConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Searches `root` and its ancestors for a config file.
pub fn load_config(root: &Path) -> MigrateConfig {
    let start = root
        .canonicalize()
        .unwrap_or_else(|_| root.to_path_buf());

    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            MigrateConfig::default()
        })
}

/// Loads an explicitly requested config file. Any problem is an error.
pub fn load_config_from(path: &Path) -> Result<MigrateConfig, MigrateError> {
    let contents =
        read_config_file(path).map_err(|e| MigrateError::config(path, e.to_string()))?;
    parse_and_validate_config(&contents).map_err(|message| MigrateError::config(path, message))
}
