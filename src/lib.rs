//! picblink — debounced input and timed output core.
//!
//! A cooperative polling driver for small boards such as the PIC16F876A
//! demo board: push-buttons are sampled once per tick and debounced by
//! consecutive agreement, LEDs are set, toggled, mirrored, chased or blinked
//! from the same tick. Time and pins are always supplied through the port
//! traits in [`app::ports`], so everything here runs on the host under test.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod pins;

pub mod adapters;
pub mod drivers;

/// One external unit of elapsed time (one Timer0 overflow on the board).
/// Wraps at `u32::MAX`; compare with `wrapping_sub` only. Repeating
/// patterns re-anchor their origin every cycle so rollover keeps their phase.
pub type Tick = u32;
