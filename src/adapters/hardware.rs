//! Hardware adapter — bridges `embedded-hal` digital pins to [`PinPort`].
//!
//! This is the only module that touches real GPIO. It owns every pin,
//! applies each line's [`Polarity`] so the core only ever sees logical
//! levels, and turns HAL errors into log lines so reads stay total.

use embedded_hal::digital::{InputPin, OutputPin, PinState};
use heapless::Vec;
use log::warn;

use crate::app::ports::PinPort;
use crate::config::{MAX_INPUTS, MAX_OUTPUTS};
use crate::error::{Error, Result};
use crate::pins::{InputId, OutputId, Polarity};

struct BoundInput<I> {
    id: InputId,
    pin: I,
    polarity: Polarity,
    /// Last good logical level, returned when a read fails.
    last: bool,
}

struct BoundOutput<O> {
    id: OutputId,
    pin: O,
    polarity: Polarity,
}

/// Concrete adapter owning one bank of HAL input pins and one of outputs.
pub struct HalPinBank<I, O> {
    inputs: Vec<BoundInput<I>, MAX_INPUTS>,
    outputs: Vec<BoundOutput<O>, MAX_OUTPUTS>,
}

impl<I: InputPin, O: OutputPin> HalPinBank<I, O> {
    pub fn new() -> Self {
        Self {
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn bind_input(&mut self, id: InputId, pin: I, polarity: Polarity) -> Result<()> {
        self.inputs
            .push(BoundInput {
                id,
                pin,
                polarity,
                last: false,
            })
            .map_err(|_| Error::Capacity("hal inputs"))
    }

    pub fn bind_output(&mut self, id: OutputId, pin: O, polarity: Polarity) -> Result<()> {
        self.outputs
            .push(BoundOutput { id, pin, polarity })
            .map_err(|_| Error::Capacity("hal outputs"))
    }
}

impl<I: InputPin, O: OutputPin> Default for HalPinBank<I, O> {
    fn default() -> Self {
        Self::new()
    }
}

// ── PinPort implementation ────────────────────────────────────

impl<I: InputPin, O: OutputPin> PinPort for HalPinBank<I, O> {
    fn read_pin(&mut self, id: InputId) -> bool {
        let Some(bound) = self.inputs.iter_mut().find(|b| b.id == id) else {
            warn!("read of unbound input {}", id);
            return false;
        };
        match bound.pin.is_high() {
            Ok(level) => {
                bound.last = bound.polarity.apply(level);
                bound.last
            }
            Err(e) => {
                warn!("{}: read failed ({:?}), holding {}", id, e, bound.last);
                bound.last
            }
        }
    }

    fn write_pin(&mut self, id: OutputId, level: bool) {
        let Some(bound) = self.outputs.iter_mut().find(|b| b.id == id) else {
            warn!("write to unbound output {}", id);
            return;
        };
        let state = PinState::from(bound.polarity.apply(level));
        if let Err(e) = bound.pin.set_state(state) {
            warn!("{}: write failed ({:?})", id, e);
        }
    }
}
