//! Fuzz target: `CoreConfig::from_eeprom` / `from_json`
//!
//! Arbitrary bytes must never panic the decoders, and anything that decodes
//! must validate and build a running service.
//!
//! cargo fuzz run fuzz_config

#![no_main]

use libfuzzer_sys::fuzz_target;
use picblink::app::service::AppService;
use picblink::config::CoreConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = CoreConfig::from_eeprom(data) {
        assert!(config.validate().is_ok());
        assert!(AppService::new(&config).is_ok());
    }
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(config) = CoreConfig::from_json(text) {
            assert!(AppService::new(&config).is_ok());
        }
    }
});
