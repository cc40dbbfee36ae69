//! Channel drivers and the board tick model.

pub mod button;
pub mod led;
pub mod led_patterns;
pub mod timer0;
