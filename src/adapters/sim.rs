//! In-memory pin bank for host runs.
//!
//! Holds the *electrical* level of every line, so active-low buttons behave
//! as on the board: an idle button reads HIGH through its pull-up and
//! `press()` pulls it LOW. Polarity is applied on the way into the core,
//! exactly where [`HalPinBank`](super::hardware::HalPinBank) applies it.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::app::ports::PinPort;
use crate::config::CoreConfig;
use crate::pins::{InputId, OutputId, Polarity};
use crate::Tick;

/// A scripted button hold: `input` is pressed for ticks `from..to`.
///
/// Parses from `"<input>:<from>-<to>"`, e.g. `"0:5-20"` holds PB0 from
/// tick 5 up to (not including) tick 20.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressWindow {
    pub input: InputId,
    pub from: Tick,
    pub to: Tick,
}

impl PressWindow {
    pub fn contains(&self, now: Tick) -> bool {
        (self.from..self.to).contains(&now)
    }
}

impl FromStr for PressWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || format!("expected <input>:<from>-<to>, got {s:?}");
        let (input, span) = s.split_once(':').ok_or_else(err)?;
        let (from, to) = span.split_once('-').ok_or_else(err)?;
        let input = input.trim().trim_start_matches("PB");
        let window = Self {
            input: InputId(input.parse().map_err(|_| err())?),
            from: from.trim().parse().map_err(|_| err())?,
            to: to.trim().parse().map_err(|_| err())?,
        };
        if window.to <= window.from {
            return Err(format!("empty press window {s:?}"));
        }
        Ok(window)
    }
}

#[derive(Debug, Clone, Copy)]
struct SimInput {
    polarity: Polarity,
    level: bool,
}

#[derive(Debug, Default)]
pub struct SimPinBank {
    inputs: BTreeMap<InputId, SimInput>,
    outputs: BTreeMap<OutputId, bool>,
    writes: u64,
}

impl SimPinBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// One simulated line per configured channel, every button released.
    pub fn from_config(config: &CoreConfig) -> Self {
        let mut bank = Self::new();
        for ic in &config.inputs {
            bank.add_input(ic.id, ic.polarity);
        }
        for oc in &config.outputs {
            bank.outputs.insert(oc.id, false);
        }
        bank
    }

    /// Add a released input line.
    pub fn add_input(&mut self, id: InputId, polarity: Polarity) {
        self.inputs.insert(
            id,
            SimInput {
                polarity,
                level: polarity.apply(false),
            },
        );
    }

    /// Force the electrical level of an input line.
    pub fn set_level(&mut self, id: InputId, level: bool) {
        if let Some(input) = self.inputs.get_mut(&id) {
            input.level = level;
        }
    }

    pub fn press(&mut self, id: InputId) {
        self.set_active(id, true);
    }

    pub fn release(&mut self, id: InputId) {
        self.set_active(id, false);
    }

    fn set_active(&mut self, id: InputId, active: bool) {
        if let Some(input) = self.inputs.get_mut(&id) {
            input.level = input.polarity.apply(active);
        }
    }

    /// Set every scripted input to its level at `now`. Inputs that appear
    /// in the script are released outside their windows.
    pub fn apply_script(&mut self, script: &[PressWindow], now: Tick) {
        for w in script {
            let held = script.iter().any(|o| o.input == w.input && o.contains(now));
            self.set_active(w.input, held);
        }
    }

    /// Electrical level last written to an output.
    pub fn output_level(&self, id: OutputId) -> Option<bool> {
        self.outputs.get(&id).copied()
    }

    /// Render outputs as `LED0:* LED1:. …` for console traces.
    pub fn render(&self) -> String {
        self.outputs
            .iter()
            .map(|(id, on)| format!("{}:{}", id, if *on { '*' } else { '.' }))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Total output writes performed.
    pub fn write_count(&self) -> u64 {
        self.writes
    }
}

impl PinPort for SimPinBank {
    fn read_pin(&mut self, id: InputId) -> bool {
        self.inputs
            .get(&id)
            .is_some_and(|i| i.polarity.apply(i.level))
    }

    fn write_pin(&mut self, id: OutputId, level: bool) {
        self.outputs.insert(id, level);
        self.writes += 1;
    }
}
