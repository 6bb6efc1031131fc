//! Unified error type for configuration and I/O.
//!
//! Formatting itself never fails; argument failures are rendered inline.

use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    /// I/O error reading a config file.
    Io(std::io::Error),
    /// TOML syntax or type error.
    ConfigParse(toml::de::Error),
    /// The platform has no config directory.
    ConfigDirNotFound,
    /// A `source = "..."` include chain leads back to a file already being loaded.
    CyclicInclude(PathBuf),
    /// Unknown level name.
    InvalidLevel(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::CyclicInclude(p) => write!(f, "cyclic include: {}", p.display()),
            Self::InvalidLevel(level) => write!(f, "invalid level: {level}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            Self::ConfigDirNotFound | Self::CyclicInclude(_) | Self::InvalidLevel(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}
