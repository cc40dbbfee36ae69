//! JSON file configuration adapter for the host simulator.
//!
//! A missing file is not an error: the default board wiring is used, the
//! same first-boot behaviour as the EEPROM adapter.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::ConfigPort;
use crate::config::CoreConfig;
use crate::error::ConfigError;

pub struct JsonFileConfig {
    path: PathBuf,
}

impl JsonFileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigPort for JsonFileConfig {
    fn load(&self) -> Result<CoreConfig, ConfigError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("{} not found, using default configuration", self.path.display());
                return Ok(CoreConfig::default());
            }
            Err(e) => {
                warn!("{}: {}", self.path.display(), e);
                return Err(ConfigError::Io);
            }
        };
        CoreConfig::from_json(&text)
    }

    fn save(&mut self, config: &CoreConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let text = config.to_json()?;
        std::fs::write(&self.path, text).map_err(|e| {
            warn!("{}: {}", self.path.display(), e);
            ConfigError::Io
        })?;
        info!("config written to {}", self.path.display());
        Ok(())
    }
}
