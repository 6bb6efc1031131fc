//! TOML configuration loading and `source = "..."` include resolution.
//!
//! Struct definitions live in `structs`; this module owns file I/O, cycle detection and the
//! merge strategy.

mod structs;

pub use structs::{EngineConfig, StatusConfig};

use crate::args;
use crate::internal;
use crate::level::Level;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "parafmt";
const CONFIG_FILE: &str = "parafmt.toml";

/// Root of `parafmt.toml`. An empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub status: StatusConfig,
}

/// Pulls `source = "..."` lines out of raw TOML, since serde would reject repeated keys.
///
/// Returns the include paths and the remaining TOML content.
#[doc(hidden)]
#[must_use]
pub fn extract_sources(content: &str) -> (Vec<String>, String) {
    let mut sources = Vec::new();
    let mut remaining = String::with_capacity(content.len());

    for line in content.lines() {
        let trimmed = line.trim();
        let include = trimmed
            .strip_prefix("source")
            .map(str::trim_start)
            .and_then(|rest| rest.strip_prefix('='));
        if let Some(value) = include {
            let path = value.trim().trim_matches('"').trim_matches('\'');
            if !path.is_empty() {
                sources.push(path.to_string());
            }
        } else {
            remaining.push_str(line);
            remaining.push('\n');
        }
    }

    (sources, remaining)
}

impl Config {
    /// Loads `<config_dir>/parafmt/parafmt.toml` with includes resolved. A missing file yields
    /// the defaults.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined, a file can't be read or parsed, or
    /// includes form a cycle.
    pub fn load() -> Result<Self, crate::Error> {
        internal::debug("CONFIG", "Loading config from default location");
        let config_path = Self::get_config_path()?;
        let config = Self::load_from(&config_path)?;
        internal::log_args(
            Level::Info,
            "CONFIG",
            "Config loaded from {}",
            &args![config_path.display().to_string()],
        );
        Ok(config)
    }

    /// Loads an explicit file instead of the default location.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed, or contains cyclic includes.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        Self::load_with_sources(path, &mut HashSet::new())
    }

    /// Parses TOML text; `source` lines are ignored since there is no file to resolve from.
    ///
    /// # Errors
    /// Returns the TOML syntax or type error.
    pub fn from_toml(content: &str) -> Result<Self, crate::Error> {
        let (_, toml_content) = extract_sources(content);
        Ok(toml::from_str(&toml_content)?)
    }

    /// `chain` holds the files currently being loaded, so a file included along two separate
    /// paths loads twice while a file that includes one of its own ancestors fails.
    fn load_with_sources(path: &Path, chain: &mut HashSet<PathBuf>) -> Result<Self, crate::Error> {
        if !path.exists() {
            internal::debug("CONFIG", "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if !chain.insert(canonical.clone()) {
            internal::log_args(
                Level::Warn,
                "CONFIG",
                "Cyclic include detected: {}",
                &args![canonical.display().to_string()],
            );
            return Err(crate::Error::CyclicInclude(canonical));
        }

        let content = fs::read_to_string(path)?;
        let (sources, toml_content) = extract_sources(&content);
        let mut config: Self = toml::from_str(&toml_content)?;

        for source_path in sources {
            let source_file =
                resolve_relative(path, Path::new(shellexpand::tilde(&source_path).as_ref()));
            if source_file.exists() {
                internal::log_args(
                    Level::Debug,
                    "CONFIG",
                    "Processing source: {}",
                    &args![source_file.display().to_string()],
                );
                let source_config = Self::load_with_sources(&source_file, chain)?;
                config.merge(source_config);
            } else {
                internal::log_args(
                    Level::Warn,
                    "CONFIG",
                    "Source file not found: {}",
                    &args![source_path],
                );
            }
        }

        chain.remove(&canonical);
        Ok(config)
    }

    /// Folds an included config's map fields into `self`; keys already present win.
    ///
    /// Scalar fields are never taken from includes.
    pub fn merge(&mut self, other: Self) {
        for (scope, level) in other.status.scopes {
            self.status.scopes.entry(scope).or_insert(level);
        }
    }

    /// # Errors
    /// Fails when the platform has no concept of a config directory.
    pub fn get_config_path() -> Result<PathBuf, crate::Error> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join(CONFIG_DIR).join(CONFIG_FILE))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// Status threshold; unknown level names fall back to `warn`.
    #[must_use]
    pub fn parse_level(&self) -> Level {
        self.status.level.parse().unwrap_or(Level::Warn)
    }

    /// Strict variant of [`parse_level`](Self::parse_level).
    ///
    /// # Errors
    /// Returns [`Error::InvalidLevel`](crate::Error::InvalidLevel) for unknown names.
    pub fn try_parse_level(&self) -> Result<Level, crate::Error> {
        self.status
            .level
            .parse()
            .map_err(|_| crate::Error::InvalidLevel(self.status.level.clone()))
    }

    /// Per-scope overrides with unparseable entries dropped.
    #[must_use]
    pub fn parse_scope_levels(&self) -> HashMap<String, Level> {
        self.status
            .scopes
            .iter()
            .filter_map(|(scope, level)| Some((scope.clone(), level.parse().ok()?)))
            .collect()
    }
}

/// Relative includes resolve against the including file's directory.
fn resolve_relative(including: &Path, source: &Path) -> PathBuf {
    if source.is_absolute() {
        return source.to_path_buf();
    }
    including
        .parent()
        .map_or_else(|| source.to_path_buf(), |dir| dir.join(source))
}
