//! # AVList configuration module
//!
//! Configuration management for the AVList playlist engine:
//! - Loading configuration from a YAML file
//! - Merging with the embedded default configuration
//! - Typed getters and setters with defaults
//! - Thread-safe singleton access pattern
//!
//! ## Usage
//!
//! ```no_run
//! use avlconfig::get_config;
//!
//! let config = get_config();
//! let depth = config.get_nested_depth_limit();
//! let exts = config.get_scan_extensions();
//! # let _ = (depth, exts);
//! ```

use anyhow::{anyhow, Result};
use dirs::home_dir;
use lazy_static::lazy_static;
use serde_yaml::{Mapping, Number, Value};
use std::{
    env, fs,
    path::Path,
    sync::{Arc, Mutex},
};
use tracing::info;

// Embedded default configuration
const DEFAULT_CONFIG: &str = include_str!("avlist.yaml");

lazy_static! {
    static ref CONFIG: Arc<Config> =
        Arc::new(Config::load_config("").expect("Failed to load AVList configuration"));
}

const ENV_CONFIG_DIR: &str = "AVLIST_CONFIG";

// Defaults mirrored from avlist.yaml, used when a key is missing or mistyped
const DEFAULT_ID_HEX_WIDTH: usize = 8;
const DEFAULT_NESTED_DEPTH_LIMIT: usize = 16;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Configuration manager for AVList
///
/// Holds the merged YAML tree (embedded defaults overlaid with the external
/// `config.yaml`) and exposes typed accessors for the keys the playlist
/// engine cares about.
#[derive(Debug)]
pub struct Config {
    config_dir: String,
    path: String,
    data: Mutex<Value>,
}

impl Config {
    /// Finds a config directory by trying different locations in order
    fn find_config_dir(directory: &str) -> String {
        // 1. Try provided directory
        if !directory.is_empty() {
            return directory.to_string();
        }

        // 2. Try environment variable
        if let Ok(env_path) = env::var(ENV_CONFIG_DIR) {
            info!(env_var = ENV_CONFIG_DIR, path = %env_path, "Trying to load config from env");
            return env_path;
        }

        // 3. Try current directory
        if Path::new(".avlist").exists() {
            return ".avlist".to_string();
        }

        // 4. Try home directory
        if let Some(home) = home_dir() {
            let home_config = home.join(".avlist");
            if home_config.exists() {
                return home_config.to_string_lossy().to_string();
            }
        }

        // Default fallback
        ".avlist".to_string()
    }

    /// Validates and prepares a config directory
    fn validate_config_dir(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        if !path.is_dir() {
            return Err(anyhow!("Config path is not a directory"));
        }

        Ok(())
    }

    /// Determines and validates the configuration directory
    ///
    /// Search order: the `directory` argument, the `AVLIST_CONFIG`
    /// environment variable, `.avlist` in the current directory, `.avlist`
    /// in the home directory. The directory is created if missing.
    pub fn config_dir(directory: &str) -> String {
        let dir_path = Self::find_config_dir(directory);
        let path = Path::new(&dir_path);

        Self::validate_config_dir(path).expect("Cannot validate the configuration directory");

        dir_path
    }

    /// Loads the configuration from the specified directory
    ///
    /// Merges the embedded defaults with `config.yaml` in the resolved
    /// directory (external values win) and writes the merged result back.
    pub fn load_config(directory: &str) -> Result<Self> {
        let config_dir = Self::config_dir(directory);
        info!(config_dir = %config_dir, "Using config directory");

        let config_file_path = Path::new(&config_dir).join("config.yaml");
        let path = config_file_path.to_string_lossy().to_string();

        let mut merged: Value = serde_yaml::from_str(DEFAULT_CONFIG)?;

        if let Ok(data) = fs::read(&path) {
            info!(config_file = %path, "Loaded config file");
            let external: Value = serde_yaml::from_slice(&data)?;
            merge_yaml(&mut merged, &external);
        } else {
            info!(config_file = %path, "Config file not found, using default embedded config");
        }

        let config = Config {
            config_dir,
            path,
            data: Mutex::new(merged),
        };

        config.save()?;
        Ok(config)
    }

    /// Saves the current configuration to the config.yaml file
    pub fn save(&self) -> Result<()> {
        let data = self.data.lock().unwrap();
        let yaml = serde_yaml::to_string(&*data)?;
        fs::write(&self.path, yaml)?;
        Ok(())
    }

    /// The resolved configuration directory.
    pub fn get_config_dir(&self) -> &str {
        &self.config_dir
    }

    /// Gets a configuration value at the specified path
    /// (e.g. `&["playlist", "dir_recurse"]`).
    pub fn get_value(&self, path: &[&str]) -> Result<Value> {
        let data = self.data.lock().unwrap();
        let mut current: &Value = &data;
        for (i, key) in path.iter().enumerate() {
            match current {
                Value::Mapping(map) => match map.get(&Value::String(key.to_string())) {
                    Some(next) => current = next,
                    None => return Err(anyhow!("Path {} does not exist", path[..=i].join("."))),
                },
                _ => return Err(anyhow!("Node at {} is not a map", path[..i].join("."))),
            }
        }
        Ok(current.clone())
    }

    /// Sets a configuration value at the specified path and saves it
    pub fn set_value(&self, path: &[&str], value: Value) -> Result<()> {
        {
            let mut data = self.data.lock().unwrap();
            Self::set_value_internal(&mut data, path, value)?;
        }
        self.save()?;
        Ok(())
    }

    fn set_value_internal(data: &mut Value, path: &[&str], value: Value) -> Result<()> {
        if path.is_empty() {
            *data = value;
            return Ok(());
        }
        if let Value::Mapping(map) = data {
            let key_value = Value::String(path[0].to_string());
            if path.len() == 1 {
                map.insert(key_value, value);
            } else {
                let entry = map
                    .entry(key_value)
                    .or_insert(Value::Mapping(Mapping::new()));
                Self::set_value_internal(entry, &path[1..], value)?;
            }
            Ok(())
        } else {
            Err(anyhow!("Current node is not a map"))
        }
    }

    // ===== Typed getters / setters =====

    /// Extensions accepted by directory scans (lowercase, no dot).
    /// `["*"]` means accept every file.
    pub fn get_scan_extensions(&self) -> Vec<String> {
        match self.get_value(&["playlist", "scan_extensions"]) {
            Ok(Value::Sequence(seq)) => seq
                .into_iter()
                .filter_map(|v| v.as_str().map(|s| s.to_lowercase()))
                .collect(),
            _ => vec!["*".to_string()],
        }
    }

    /// Replaces the scan extension list.
    pub fn set_scan_extensions(&self, extensions: &[String]) -> Result<()> {
        let seq = extensions
            .iter()
            .map(|e| Value::String(e.to_lowercase()))
            .collect();
        self.set_value(&["playlist", "scan_extensions"], Value::Sequence(seq))
    }

    /// Whether directory arguments are scanned recursively.
    pub fn get_dir_recurse(&self) -> bool {
        matches!(
            self.get_value(&["playlist", "dir_recurse"]),
            Ok(Value::Bool(true))
        )
    }

    /// Whether any `<scheme>://` URI is accepted, not just well-known schemes.
    pub fn get_uri_filter_permissive(&self) -> bool {
        matches!(
            self.get_value(&["playlist", "uri_filter_permissive"]),
            Ok(Value::Bool(true))
        )
    }

    /// Maximum nesting depth for playlists referencing other playlists.
    pub fn get_nested_depth_limit(&self) -> usize {
        match self.get_value(&["playlist", "nested_depth_limit"]) {
            Ok(Value::Number(n)) if n.as_u64().is_some() => n.as_u64().unwrap() as usize,
            _ => DEFAULT_NESTED_DEPTH_LIMIT,
        }
    }

    /// Width of allocated unique ids, in hex digits.
    pub fn get_id_hex_width(&self) -> usize {
        match self.get_value(&["ids", "hex_width"]) {
            Ok(Value::Number(n)) if n.as_u64().is_some() => n.as_u64().unwrap() as usize,
            _ => DEFAULT_ID_HEX_WIDTH,
        }
    }

    /// Timeout for remote playlist fetches, in seconds.
    pub fn get_fetch_timeout_secs(&self) -> u64 {
        match self.get_value(&["network", "fetch_timeout_secs"]) {
            Ok(Value::Number(n)) if n.as_u64().is_some() => n.as_u64().unwrap(),
            _ => DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }

    /// Sets the fetch timeout.
    pub fn set_fetch_timeout_secs(&self, secs: u64) -> Result<()> {
        self.set_value(
            &["network", "fetch_timeout_secs"],
            Value::Number(Number::from(secs)),
        )
    }

    /// HTTP proxy for remote fetches, or `None` for a direct connection.
    pub fn get_proxy(&self) -> Option<String> {
        match self.get_value(&["network", "proxy"]) {
            Ok(Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        }
    }
}

/// Merges `other` into `base`; mappings merge recursively, scalar and
/// sequence values from `other` win.
fn merge_yaml(base: &mut Value, other: &Value) {
    match (base, other) {
        (Value::Mapping(base_map), Value::Mapping(other_map)) => {
            for (key, other_value) in other_map {
                match base_map.get_mut(key) {
                    Some(base_value) => merge_yaml(base_value, other_value),
                    None => {
                        base_map.insert(key.clone(), other_value.clone());
                    }
                }
            }
        }
        (base, other) => *base = other.clone(),
    }
}

/// Returns the global configuration instance
///
/// This function provides access to the singleton configuration instance,
/// loading it on first use.
pub fn get_config() -> Arc<Config> {
    CONFIG.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        (dir, config)
    }

    #[test]
    fn test_defaults_present() {
        let (_dir, config) = test_config();
        assert_eq!(config.get_id_hex_width(), 8);
        assert_eq!(config.get_nested_depth_limit(), 16);
        assert_eq!(config.get_fetch_timeout_secs(), 30);
        assert!(!config.get_dir_recurse());
        assert!(!config.get_uri_filter_permissive());
        assert!(config.get_proxy().is_none());
        assert!(config
            .get_scan_extensions()
            .contains(&"mp3".to_string()));
    }

    #[test]
    fn test_set_and_get_value() {
        let (_dir, config) = test_config();
        config
            .set_value(&["playlist", "dir_recurse"], Value::Bool(true))
            .unwrap();
        assert!(config.get_dir_recurse());
    }

    #[test]
    fn test_external_file_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.yaml"),
            "playlist:\n  nested_depth_limit: 4\n",
        )
        .unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config.get_nested_depth_limit(), 4);
        // Untouched keys keep their defaults.
        assert_eq!(config.get_id_hex_width(), 8);
    }

    #[test]
    fn test_merged_config_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let _config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        assert!(dir.path().join("config.yaml").exists());
    }
}
