//! Data EEPROM configuration adapter.
//!
//! Implements [`ConfigPort`] over a 256-byte image laid out like the
//! PIC16F876A data EEPROM. Platform glue copies [`EepromImage::as_bytes`]
//! to the part (EECON1/EEDATA sequence) and hands the read-back bytes to
//! [`EepromImage::from_bytes`] at boot; that register dance stays outside
//! this crate.
//!
//! An erased part reads `0xFF` everywhere. That is treated as "nothing
//! stored" and yields the default configuration.

use log::{info, warn};

use crate::app::ports::ConfigPort;
use crate::config::{CoreConfig, EEPROM_SIZE};
use crate::error::ConfigError;

const ERASED: u8 = 0xFF;

pub struct EepromImage {
    bytes: [u8; EEPROM_SIZE],
}

impl EepromImage {
    /// A freshly erased image.
    pub fn erased() -> Self {
        Self {
            bytes: [ERASED; EEPROM_SIZE],
        }
    }

    /// Image read back from the part. Shorter input is padded as erased.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut bytes = [ERASED; EEPROM_SIZE];
        let n = data.len().min(EEPROM_SIZE);
        bytes[..n].copy_from_slice(&data[..n]);
        Self { bytes }
    }

    pub fn as_bytes(&self) -> [u8; EEPROM_SIZE] {
        self.bytes
    }

    pub fn is_erased(&self) -> bool {
        self.bytes[0] == ERASED
    }
}

impl Default for EepromImage {
    fn default() -> Self {
        Self::erased()
    }
}

impl ConfigPort for EepromImage {
    fn load(&self) -> Result<CoreConfig, ConfigError> {
        if self.is_erased() {
            info!("EEPROM blank, using default configuration");
            return Ok(CoreConfig::default());
        }
        CoreConfig::from_eeprom(&self.bytes).inspect_err(|e| {
            warn!("EEPROM config rejected: {}", e);
        })
    }

    fn save(&mut self, config: &CoreConfig) -> Result<(), ConfigError> {
        let mut fresh = [ERASED; EEPROM_SIZE];
        let used = config.to_eeprom(&mut fresh)?;
        self.bytes = fresh;
        info!("EEPROM config saved ({} of {} bytes)", used, EEPROM_SIZE);
        Ok(())
    }
}
