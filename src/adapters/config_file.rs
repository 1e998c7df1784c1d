//! JSON config file adapter.
//!
//! Implements [`ConfigPort`] over a file on disk.  Fields missing from the
//! file take their defaults; the result is validated before it is
//! returned.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::ConfigPort;
use crate::config::SessionConfig;
use crate::error::ConfigError;

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Like [`ConfigPort::load`], but a missing file yields the defaults.
    pub fn load_or_default(&self) -> Result<SessionConfig, ConfigError> {
        match self.load() {
            Err(ConfigError::NotFound) => {
                info!(
                    "No config at {}, using defaults",
                    self.path.display()
                );
                Ok(SessionConfig::default())
            }
            other => other,
        }
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<SessionConfig, ConfigError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound,
            _ => {
                warn!("Reading {} failed: {}", self.path.display(), e);
                ConfigError::IoError
            }
        })?;
        let config = SessionConfig::from_json(&text)?;
        info!("Config loaded from {}", self.path.display());
        Ok(config)
    }
}
