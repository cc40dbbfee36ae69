//! Channel configuration.
//!
//! Describes which inputs are sampled, which outputs exist, what each output
//! does every iteration, and the tick timing. Loaded from JSON on the host
//! and from a compact postcard image in the PIC's data EEPROM on target.
//! Every load path runs [`CoreConfig::validate`].

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::drivers::button::{DEFAULT_DEBOUNCE_THRESHOLD, MAX_DEBOUNCE_THRESHOLD};
use crate::drivers::led_patterns::{self, ChaseTiming, Frame, Frames};
use crate::drivers::timer0::Timer0Config;
use crate::error::ConfigError;
use crate::pins::{self, InputId, OutputId, Polarity};
use crate::Tick;

/// Maximum number of debounced inputs the driver can own.
pub const MAX_INPUTS: usize = 8;
/// Maximum number of outputs the driver can own.
pub const MAX_OUTPUTS: usize = 8;

/// Data EEPROM size on the PIC16F876A.
pub const EEPROM_SIZE: usize = 256;
/// First byte of a valid EEPROM image.
const EEPROM_MAGIC: u8 = 0xB1;

/// What an output does on every driver iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Changes only through commands.
    #[default]
    Manual,
    /// Follows the debounced state of an input.
    Mirror { input: InputId },
    /// Free-running toggle every `interval` ticks.
    Blink { interval: Tick },
    /// Toggles on each press edge of an input.
    ToggleOn { input: InputId },
    /// Lit while the chaser is on `slot`.
    Chase { slot: u8 },
    /// Follows bit `bit` of the frame sequence in [`CoreConfig::pattern`].
    Pattern { bit: u8 },
}

impl OutputMode {
    /// Reject a chase slot or pattern bit the driver could never light.
    pub fn check_reach(&self, output: OutputId, pattern: &[Frame]) -> Result<(), ConfigError> {
        match *self {
            Self::Chase { slot } if usize::from(slot) >= MAX_OUTPUTS => {
                Err(ConfigError::SlotOutOfRange { output, slot })
            }
            Self::Pattern { bit } if bit >= 8 => Err(ConfigError::SlotOutOfRange { output, slot: bit }),
            Self::Pattern { .. } if pattern.iter().all(|f| f.hold == 0) => {
                Err(ConfigError::EmptyPattern(output))
            }
            _ => Ok(()),
        }
    }

    /// Input this behaviour depends on, if any.
    pub fn input(&self) -> Option<InputId> {
        match *self {
            Self::Mirror { input } | Self::ToggleOn { input } => Some(input),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    pub id: InputId,
    #[serde(default)]
    pub polarity: Polarity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub id: OutputId,
    #[serde(default)]
    pub mode: OutputMode,
}

/// Complete configuration of the polling core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Tick source timing (one tick = one Timer0 overflow).
    pub timer0: Timer0Config,
    /// Extra agreeing samples required before a change commits.
    pub debounce_threshold: u8,
    /// Step/pause timing for outputs in `Chase` mode.
    pub chase: ChaseTiming,
    /// Frames played by outputs in `Pattern` mode.
    #[serde(default)]
    pub pattern: Frames,
    /// Inputs, updated in this order.
    pub inputs: Vec<InputConfig, MAX_INPUTS>,
    /// Outputs, driven in this order after all inputs.
    pub outputs: Vec<OutputConfig, MAX_OUTPUTS>,
}

impl Default for CoreConfig {
    /// Board button test: PB0 lights LED0+LED1, PB1 lights LED2+LED3,
    /// PB2 lights LED4.
    fn default() -> Self {
        let mirror = |id, input| OutputConfig {
            id,
            mode: OutputMode::Mirror { input },
        };
        Self::with_channels(
            &[pins::PB0, pins::PB1, pins::PB2],
            &[
                mirror(pins::LED0, pins::PB0),
                mirror(pins::LED1, pins::PB0),
                mirror(pins::LED2, pins::PB1),
                mirror(pins::LED3, pins::PB1),
                mirror(pins::LED4, pins::PB2),
            ],
        )
    }
}

impl CoreConfig {
    /// Given inputs (board button polarity) and outputs, default timing.
    fn with_channels(inputs: &[InputId], outputs: &[OutputConfig]) -> Self {
        let mut cfg = Self {
            timer0: Timer0Config::default(),
            debounce_threshold: DEFAULT_DEBOUNCE_THRESHOLD,
            chase: ChaseTiming::default(),
            pattern: Frames::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        };
        for &id in inputs.iter().take(MAX_INPUTS) {
            let _ = cfg.inputs.push(InputConfig {
                id,
                polarity: pins::BUTTON_POLARITY,
            });
        }
        for &out in outputs.iter().take(MAX_OUTPUTS) {
            let _ = cfg.outputs.push(out);
        }
        cfg
    }

    /// Single heartbeat: LED2 toggles every 500 ms.
    pub fn blink_preset() -> Self {
        let interval = Timer0Config::default().ticks_for_ms(500);
        Self::with_channels(
            &[],
            &[OutputConfig {
                id: pins::LED2,
                mode: OutputMode::Blink { interval },
            }],
        )
    }

    /// LED0..LED4 walk in turn, then pause. PB0 is still sampled so its
    /// edges are reported.
    pub fn chase_preset() -> Self {
        let leds = [pins::LED0, pins::LED1, pins::LED2, pins::LED3, pins::LED4];
        let outputs: std::vec::Vec<OutputConfig> = leds
            .iter()
            .zip(0u8..)
            .map(|(&id, slot)| OutputConfig {
                id,
                mode: OutputMode::Chase { slot },
            })
            .collect();
        Self::with_channels(&[pins::PB0], &outputs)
    }

    /// LED0..LED4 play the whole-port demo: all on, all off, alternate
    /// `0xAA`/`0x55`, five fast flashes, then a 2 s pause.
    pub fn pattern_preset() -> Self {
        let leds = [pins::LED0, pins::LED1, pins::LED2, pins::LED3, pins::LED4];
        let outputs: std::vec::Vec<OutputConfig> = leds
            .iter()
            .zip(0u8..)
            .map(|(&id, bit)| OutputConfig {
                id,
                mode: OutputMode::Pattern { bit },
            })
            .collect();
        let mut cfg = Self::with_channels(&[], &outputs);
        let timer0 = cfg.timer0;
        cfg.pattern = led_patterns::port_demo_frames(|ms| timer0.ticks_for_ms(ms));
        cfg
    }

    pub fn input(&self, id: InputId) -> Option<&InputConfig> {
        self.inputs.iter().find(|i| i.id == id)
    }

    pub fn output(&self, id: OutputId) -> Option<&OutputConfig> {
        self.outputs.iter().find(|o| o.id == id)
    }

    /// Reject anything the driver could not run faithfully.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.debounce_threshold > MAX_DEBOUNCE_THRESHOLD {
            return Err(ConfigError::ThresholdTooLarge {
                threshold: self.debounce_threshold,
                max: MAX_DEBOUNCE_THRESHOLD,
            });
        }
        if self.timer0.fosc_hz == 0 || self.timer0.period_us() == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if self.chase.step == 0 {
            return Err(ConfigError::ZeroChaseStep);
        }
        for (n, input) in self.inputs.iter().enumerate() {
            if self.inputs[..n].iter().any(|i| i.id == input.id) {
                return Err(ConfigError::DuplicateInput(input.id));
            }
        }
        for (n, output) in self.outputs.iter().enumerate() {
            if self.outputs[..n].iter().any(|o| o.id == output.id) {
                return Err(ConfigError::DuplicateOutput(output.id));
            }
            output.mode.check_reach(output.id, &self.pattern)?;
            if let Some(input) = output.mode.input() {
                if self.input(input).is_none() {
                    return Err(ConfigError::DanglingInput {
                        output: output.id,
                        input,
                    });
                }
            }
        }
        Ok(())
    }

    // ── Text form (host) ──────────────────────────────────────

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(text).map_err(|e| {
            log::warn!("config JSON rejected: {}", e);
            ConfigError::Parse
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|_| ConfigError::Parse)
    }

    // ── EEPROM image (target) ─────────────────────────────────

    /// Encode into `buf` as `[magic, postcard…]`. Returns bytes used.
    pub fn to_eeprom(&self, buf: &mut [u8]) -> Result<usize, ConfigError> {
        self.validate()?;
        let (head, body) = buf.split_first_mut().ok_or(ConfigError::Io)?;
        *head = EEPROM_MAGIC;
        let used = postcard::to_slice(self, body)
            .map_err(|_| ConfigError::Io)?
            .len();
        Ok(used + 1)
    }

    /// Decode an EEPROM image. A blank (erased, `0xFF`) or foreign image
    /// yields [`ConfigError::Parse`].
    pub fn from_eeprom(bytes: &[u8]) -> Result<Self, ConfigError> {
        match bytes.split_first() {
            Some((&EEPROM_MAGIC, body)) => {
                let cfg: Self = postcard::from_bytes(body).map_err(|_| ConfigError::Parse)?;
                cfg.validate()?;
                Ok(cfg)
            }
            _ => Err(ConfigError::Parse),
        }
    }
}
