//! Mock board adapters for integration tests.
//!
//! Records every pin write and every emitted event so tests can assert on
//! the full history without a board.

use std::collections::HashMap;

use picblink::app::events::AppEvent;
use picblink::app::ports::{EventSink, PinPort, TickSource};
use picblink::pins::{InputId, OutputId};
use picblink::Tick;

// ── MockPins ──────────────────────────────────────────────────

/// Logical pin levels; polarity is already normalised.
pub struct MockPins {
    pub inputs: HashMap<InputId, bool>,
    pub writes: Vec<(OutputId, bool)>,
    pub reads: Vec<InputId>,
}

#[allow(dead_code)]
impl MockPins {
    pub fn new() -> Self {
        Self {
            inputs: HashMap::new(),
            writes: Vec::new(),
            reads: Vec::new(),
        }
    }

    pub fn set(&mut self, id: InputId, active: bool) {
        self.inputs.insert(id, active);
    }

    /// Last level written to `id`, if any.
    pub fn level(&self, id: OutputId) -> Option<bool> {
        self.writes
            .iter()
            .rev()
            .find(|(o, _)| *o == id)
            .map(|(_, l)| *l)
    }

    pub fn writes_to(&self, id: OutputId) -> usize {
        self.writes.iter().filter(|(o, _)| *o == id).count()
    }
}

impl Default for MockPins {
    fn default() -> Self {
        Self::new()
    }
}

impl PinPort for MockPins {
    fn read_pin(&mut self, id: InputId) -> bool {
        self.reads.push(id);
        self.inputs.get(&id).copied().unwrap_or(false)
    }

    fn write_pin(&mut self, id: OutputId, level: bool) {
        self.writes.push((id, level));
    }
}

// ── ManualClock ───────────────────────────────────────────────

pub struct ManualClock {
    pub now: Tick,
    pub waited: u64,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn starting_at(now: Tick) -> Self {
        Self { now, waited: 0 }
    }
}

impl TickSource for ManualClock {
    fn now(&self) -> Tick {
        self.now
    }

    fn wait_ticks(&mut self, n: Tick) {
        self.now = self.now.wrapping_add(n);
        self.waited += u64::from(n);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn presses(&self) -> Vec<(InputId, Tick)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Pressed { input, at } => Some((*input, *at)),
                _ => None,
            })
            .collect()
    }

    pub fn output_changes(&self, id: OutputId) -> Vec<(bool, Tick)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::OutputChanged { output, on, at } if *output == id => Some((*on, *at)),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
