//! Application core — channel orchestration, zero direct I/O.
//!
//! The polling driver owns every debounced input and timed output and runs
//! them once per tick in a fixed order. All interaction with hardware goes
//! through the **port traits** in [`ports`], keeping this layer testable
//! without a board.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
