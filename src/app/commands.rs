//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (a serial
//! console, the simulator, a test) that the
//! [`AppService`](super::service::AppService) applies between iterations.

use crate::config::OutputMode;
use crate::pins::OutputId;

/// Commands that external adapters can send into the polling core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Drive an output HIGH.
    TurnOn(OutputId),

    /// Drive an output LOW.
    TurnOff(OutputId),

    /// Invert an output.
    Toggle(OutputId),

    /// Replace an output's per-iteration behaviour.
    SetMode(OutputId, OutputMode),

    /// Drive every output LOW and switch them all to `Manual`.
    AllOff,
}
