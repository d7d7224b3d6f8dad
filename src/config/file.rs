//! File-based configuration sources.

use std::path::{Path, PathBuf};

use super::source::{ConfigEntry, ConfigSource};
use super::ConfigError;

/// A configuration source that loads from a TOML file.
///
/// Files can be marked as required or optional. Required files that don't exist
/// cause an error; optional files that don't exist are silently skipped.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    required: bool,
}

impl FileSource {
    /// Creates a new file source.
    ///
    /// If `required` is true, the build will fail if the file doesn't exist.
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }
}

impl ConfigSource for FileSource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        match load_config_file(&self.path)? {
            Some(table) => {
                log::debug!("loaded config file {}", self.path.display());
                Ok(vec![ConfigEntry::root(table)])
            }
            None if self.required => Err(ConfigError::FileNotFound(self.path.clone())),
            None => {
                log::debug!("skipping missing optional config file {}", self.path.display());
                Ok(vec![])
            }
        }
    }
}

/// A source that loads the first existing file among several candidates.
///
/// Candidates are tried in order. Missing files are skipped; the first file
/// that exists is loaded and the rest are ignored. An existing file that
/// cannot be read or parsed is an error rather than a reason to move on.
#[derive(Debug, Clone)]
pub struct FallbackFileSource {
    candidates: Vec<PathBuf>,
}

impl FallbackFileSource {
    pub fn new<I, P>(candidates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }
}

impl ConfigSource for FallbackFileSource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        for path in &self.candidates {
            match load_config_file(path)? {
                Some(table) => {
                    log::debug!("loaded config file {}", path.display());
                    return Ok(vec![ConfigEntry::root(table)]);
                }
                None => log::debug!("config candidate {} not found", path.display()),
            }
        }

        Err(ConfigError::NoConfigFile(self.candidates.clone()))
    }
}

/// Loads and parses a TOML config file.
///
/// Returns `Ok(None)` if the file doesn't exist.
fn load_config_file(path: &Path) -> Result<Option<toml::Table>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let table = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(Some(table))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
