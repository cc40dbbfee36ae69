//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events through the
//! `log` facade. On the host the simulator routes these to the console.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::pins::{self, PinName};

struct Wire(Option<PinName>);

impl core::fmt::Display for Wire {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.0 {
            Some(pin) => write!(f, " ({pin})"),
            None => Ok(()),
        }
    }
}

/// Adapter that logs every [`AppEvent`], tagging known channels with
/// their board pin, e.g. `PB0 (RA2) pressed`.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { inputs, outputs } => {
                info!("START | inputs={} outputs={}", inputs, outputs);
            }
            AppEvent::Pressed { input, at } => {
                info!(
                    "INPUT | t={:>6} | {}{} pressed",
                    at,
                    input,
                    Wire(pins::input_pin(*input))
                );
            }
            AppEvent::Released { input, at } => {
                info!(
                    "INPUT | t={:>6} | {}{} released",
                    at,
                    input,
                    Wire(pins::input_pin(*input))
                );
            }
            AppEvent::OutputChanged { output, on, at } => {
                info!(
                    "OUTPUT| t={:>6} | {}{} {}",
                    at,
                    output,
                    Wire(pins::output_pin(*output)),
                    if *on { "ON" } else { "OFF" }
                );
            }
        }
    }
}
