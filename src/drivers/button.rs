//! Counter-debounced digital input with one-cycle edge events.
//!
//! ## Algorithm
//!
//! Every call to [`DebouncedInput::update`] supplies one raw sample. A sample
//! that disagrees with the committed state bumps a counter; a sample that
//! agrees resets it, so noise has to be *consecutively* stable to get
//! through. Once the counter exceeds the threshold the new level is
//! committed.
//!
//! ```text
//!  threshold = 3
//!  tick    0  1  2  3  4
//!  raw     0  1  1  1  1
//!  counter 0  1  2  3  0
//!  state   0  0  0  0  1   <- committed on the 4th differing sample
//! ```
//!
//! ## Edges
//!
//! `previous` is the committed state as it was when the latest `update()`
//! began. An edge is therefore visible for exactly one update cycle and is
//! never latched.
//!
//! ## Counter width
//!
//! The counter is a `u8` and saturates. A threshold of at most
//! [`MAX_DEBOUNCE_THRESHOLD`] guarantees `threshold + 1` is reachable, which
//! bounds the debounce window to 255 ticks (≈12.7 s at the 50 ms Timer0 tick).

use crate::error::ConfigError;
use crate::pins::InputId;
use crate::Tick;

/// Largest accepted debounce threshold for the `u8` counter.
pub const MAX_DEBOUNCE_THRESHOLD: u8 = u8::MAX - 1;

/// Default threshold: 3 extra agreeing samples, i.e. 200 ms at 50 ms/tick.
pub const DEFAULT_DEBOUNCE_THRESHOLD: u8 = 3;

/// Transition reported by the most recent update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Pressed,
    Released,
}

#[derive(Debug, Clone)]
pub struct DebouncedInput {
    id: InputId,
    current: bool,
    previous: bool,
    counter: u8,
    threshold: u8,
    stable_since: Tick,
}

impl DebouncedInput {
    /// New input, released, with the given debounce threshold.
    pub fn new(id: InputId, threshold: u8) -> Result<Self, ConfigError> {
        if threshold > MAX_DEBOUNCE_THRESHOLD {
            return Err(ConfigError::ThresholdTooLarge {
                threshold,
                max: MAX_DEBOUNCE_THRESHOLD,
            });
        }
        Ok(Self {
            id,
            current: false,
            previous: false,
            counter: 0,
            threshold,
            stable_since: 0,
        })
    }

    pub fn id(&self) -> InputId {
        self.id
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Feed one raw (polarity-normalised) sample taken at `now`.
    pub fn update(&mut self, raw: bool, now: Tick) {
        self.previous = self.current;

        if raw == self.current {
            self.counter = 0;
            return;
        }

        self.counter = self.counter.saturating_add(1);
        if self.counter > self.threshold {
            self.current = raw;
            self.counter = 0;
            self.stable_since = now;
            log::debug!(
                "{}: {} at tick {}",
                self.id,
                if raw { "pressed" } else { "released" },
                now
            );
        }
    }

    /// Debounced logical state.
    pub fn is_pressed(&self) -> bool {
        self.current
    }

    /// Alias of [`is_pressed`](Self::is_pressed) for generic channel code.
    pub fn state(&self) -> bool {
        self.current
    }

    /// LOW→HIGH commit happened in the latest `update()`.
    pub fn was_just_pressed(&self) -> bool {
        !self.previous && self.current
    }

    /// HIGH→LOW commit happened in the latest `update()`.
    pub fn was_just_released(&self) -> bool {
        self.previous && !self.current
    }

    pub fn edge(&self) -> Option<Edge> {
        if self.was_just_pressed() {
            Some(Edge::Pressed)
        } else if self.was_just_released() {
            Some(Edge::Released)
        } else {
            None
        }
    }

    /// Consecutive disagreeing samples seen so far.
    pub fn pending(&self) -> u8 {
        self.counter
    }

    /// Ticks since the last committed transition (or since construction).
    pub fn stable_for(&self, now: Tick) -> Tick {
        now.wrapping_sub(self.stable_since)
    }
}
