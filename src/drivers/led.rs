//! Boolean output channel with set/toggle and a free-running blink.
//!
//! The channel never reads a clock. [`TimedOutput::blink`] is handed the
//! current tick by the driver loop and must be called every iteration for
//! the period to hold; its resolution is the loop's tick resolution.
//!
//! Every level change is written through the [`PinPort`] immediately, so
//! `is_on()` always mirrors the last commanded hardware level.

use crate::app::ports::PinPort;
use crate::pins::OutputId;
use crate::Tick;

#[derive(Debug, Clone)]
pub struct TimedOutput {
    id: OutputId,
    state: bool,
    /// `None` until the first `blink()` call arms the oscillator.
    last_toggle: Option<Tick>,
}

impl TimedOutput {
    /// New channel, logically LOW. Call [`sync`](Self::sync) once to push
    /// that level to hardware.
    pub fn new(id: OutputId) -> Self {
        Self {
            id,
            state: false,
            last_toggle: None,
        }
    }

    pub fn id(&self) -> OutputId {
        self.id
    }

    pub fn is_on(&self) -> bool {
        self.state
    }

    /// Unconditionally write the current level (power-on initialisation).
    pub fn sync(&mut self, pins: &mut impl PinPort) {
        pins.write_pin(self.id, self.state);
    }

    /// Drive the line to `level`. Returns `true` if the level changed;
    /// an unchanged level performs no write.
    pub fn set(&mut self, level: bool, pins: &mut impl PinPort) -> bool {
        if self.state == level {
            return false;
        }
        self.write(level, pins);
        true
    }

    pub fn turn_on(&mut self, pins: &mut impl PinPort) -> bool {
        self.set(true, pins)
    }

    pub fn turn_off(&mut self, pins: &mut impl PinPort) -> bool {
        self.set(false, pins)
    }

    pub fn toggle(&mut self, pins: &mut impl PinPort) {
        self.write(!self.state, pins);
    }

    /// Free-running oscillator: toggle whenever `interval` ticks have elapsed
    /// since the previous toggle. The first call toggles immediately.
    /// Returns `true` if this call toggled.
    pub fn blink(&mut self, interval: Tick, now: Tick, pins: &mut impl PinPort) -> bool {
        let due = match self.last_toggle {
            None => true,
            Some(last) => now.wrapping_sub(last) >= interval,
        };
        if due {
            self.toggle(pins);
            self.last_toggle = Some(now);
        }
        due
    }

    /// Disarm the oscillator so the next `blink()` toggles at once.
    pub fn reset_blink(&mut self) {
        self.last_toggle = None;
    }

    fn write(&mut self, level: bool, pins: &mut impl PinPort) {
        pins.write_pin(self.id, level);
        self.state = level;
        log::trace!("{} -> {}", self.id, if level { "HIGH" } else { "LOW" });
    }
}
