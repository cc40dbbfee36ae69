//! Port traits — the hexagonal boundary between the polling core and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (pin banks, tick sources, event sinks, config stores)
//! implement these traits. The [`AppService`](super::service::AppService)
//! consumes them via generics, so the core never touches registers or a
//! global clock directly.

use crate::config::CoreConfig;
use crate::error::ConfigError;
use crate::pins::{InputId, OutputId};
use crate::Tick;

// ───────────────────────────────────────────────────────────────
// Pin port (driven adapter: hardware ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Raw digital I/O. Reads are total: an adapter that can fail must decide
/// on a fallback level itself. Polarity is normalised here, so `true`
/// always means "active" (button pressed, LED lit).
pub trait PinPort {
    fn read_pin(&mut self, id: InputId) -> bool;

    fn write_pin(&mut self, id: OutputId, level: bool);
}

// ───────────────────────────────────────────────────────────────
// Tick source (driven adapter: timer → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic tick counter supplied by the platform. Ticks wrap at
/// `Tick::MAX`; consumers only ever compare with `wrapping_sub`.
pub trait TickSource {
    fn now(&self) -> Tick;

    /// Block until `n` more ticks have elapsed.
    fn wait_ticks(&mut self, n: Tick);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists the channel configuration.
///
/// Implementations MUST run [`CoreConfig::validate`] before persisting and
/// after loading; an invalid configuration is rejected, never clamped.
pub trait ConfigPort {
    /// Returns [`CoreConfig::default()`] if nothing is stored.
    fn load(&self) -> Result<CoreConfig, ConfigError>;

    fn save(&mut self, config: &CoreConfig) -> Result<(), ConfigError>;
}
