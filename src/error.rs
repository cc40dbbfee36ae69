//! Unified error types for the picblink core.
//!
//! The debounce and blink state machines themselves cannot fail: pin reads
//! are total and counters saturate. Errors only appear at the edges, when a
//! configuration is loaded or validated, or when a command names a channel
//! that does not exist. All variants are `Copy` so they can be logged and
//! passed back through the driver without allocation.

use core::fmt;

use crate::pins::{InputId, OutputId};

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// A binding or query referenced an input that is not configured.
    UnknownInput(InputId),
    /// A command referenced an output that is not configured.
    UnknownOutput(OutputId),
    /// A fixed-capacity channel table is full.
    Capacity(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::UnknownInput(id) => write!(f, "unknown input {id}"),
            Self::UnknownOutput(id) => write!(f, "unknown output {id}"),
            Self::Capacity(what) => write!(f, "capacity exceeded: {what}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Debounce threshold is larger than the counter can represent.
    ThresholdTooLarge { threshold: u8, max: u8 },
    /// Tick period must be non-zero.
    ZeroTickPeriod,
    /// The same input id was declared twice.
    DuplicateInput(InputId),
    /// The same output id was declared twice.
    DuplicateOutput(OutputId),
    /// An output behaviour references an input that is not declared.
    DanglingInput { output: OutputId, input: InputId },
    /// Chase slot or pattern bit is beyond what the driver can light.
    SlotOutOfRange { output: OutputId, slot: u8 },
    /// A `Pattern` output has no frame with a non-zero hold.
    EmptyPattern(OutputId),
    /// Chaser step must be non-zero.
    ZeroChaseStep,
    /// Text or binary config could not be decoded.
    Parse,
    /// Backing store could not be read or written.
    Io,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThresholdTooLarge { threshold, max } => {
                write!(f, "debounce threshold {threshold} exceeds maximum {max}")
            }
            Self::ZeroTickPeriod => write!(f, "tick period must be non-zero"),
            Self::DuplicateInput(id) => write!(f, "input {id} declared twice"),
            Self::DuplicateOutput(id) => write!(f, "output {id} declared twice"),
            Self::DanglingInput { output, input } => {
                write!(f, "output {output} references undeclared input {input}")
            }
            Self::SlotOutOfRange { output, slot } => {
                write!(f, "output {output} uses unreachable slot {slot}")
            }
            Self::EmptyPattern(id) => write!(f, "output {id} plays an empty pattern"),
            Self::ZeroChaseStep => write!(f, "chase step must be non-zero"),
            Self::Parse => write!(f, "could not decode configuration"),
            Self::Io => write!(f, "I/O error"),
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
