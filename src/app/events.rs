//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them: log to the console, record them in a test,
//! forward them over a serial link.

use crate::pins::{InputId, OutputId};
use crate::Tick;

/// Structured events emitted by the polling core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The driver has initialised every channel.
    Started { inputs: usize, outputs: usize },

    /// A debounced input committed a LOW→HIGH transition.
    Pressed { input: InputId, at: Tick },

    /// A debounced input committed a HIGH→LOW transition.
    Released { input: InputId, at: Tick },

    /// An output changed level.
    OutputChanged { output: OutputId, on: bool, at: Tick },
}
