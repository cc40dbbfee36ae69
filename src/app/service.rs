//! Application service — the cooperative polling driver.
//!
//! [`AppService`] exclusively owns every channel. Each iteration it samples
//! every input in configuration order, then drives every output in
//! configuration order. Nothing blocks except the tick source between
//! iterations. All I/O flows through port traits injected at call sites,
//! so the whole loop runs against mock adapters in tests.
//!
//! ```text
//!  PinPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!              │        AppService         │
//!  PinPort ◀── │  inputs · outputs · chase │ ◀── TickSource
//!              └──────────────────────────┘
//! ```

use heapless::Vec;
use log::{debug, info, warn};

use crate::config::{CoreConfig, MAX_INPUTS, MAX_OUTPUTS, OutputMode};
use crate::drivers::button::{DebouncedInput, Edge};
use crate::drivers::led::TimedOutput;
use crate::drivers::led_patterns::{self, ChaseTiming, Chaser, Sequence};
use crate::error::{Error, Result};
use crate::pins::{InputId, OutputId};
use crate::Tick;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{EventSink, PinPort, TickSource};

struct OutputSlot {
    output: TimedOutput,
    mode: OutputMode,
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

pub struct AppService {
    inputs: Vec<DebouncedInput, MAX_INPUTS>,
    outputs: Vec<OutputSlot, MAX_OUTPUTS>,
    chase_timing: ChaseTiming,
    chaser: Chaser,
    sequence: Sequence,
    tick_count: u64,
}

impl AppService {
    /// Build every channel from a validated configuration.
    ///
    /// Does **not** touch hardware — call [`start`](Self::start) next.
    pub fn new(config: &CoreConfig) -> Result<Self> {
        config.validate()?;

        let mut inputs = Vec::new();
        for ic in &config.inputs {
            let input = DebouncedInput::new(ic.id, config.debounce_threshold)?;
            inputs
                .push(input)
                .map_err(|_| Error::Capacity("inputs"))?;
        }

        let mut outputs = Vec::new();
        for oc in &config.outputs {
            outputs
                .push(OutputSlot {
                    output: TimedOutput::new(oc.id),
                    mode: oc.mode,
                })
                .map_err(|_| Error::Capacity("outputs"))?;
        }

        let chaser = Chaser::new(chase_slots(&outputs), config.chase);
        Ok(Self {
            inputs,
            outputs,
            chase_timing: config.chase,
            chaser,
            sequence: Sequence::new(config.pattern.clone()),
            tick_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive every output to its initial LOW level.
    pub fn start(&mut self, pins: &mut impl PinPort, sink: &mut impl EventSink) {
        for slot in &mut self.outputs {
            slot.output.sync(pins);
        }
        sink.emit(&AppEvent::Started {
            inputs: self.inputs.len(),
            outputs: self.outputs.len(),
        });
        info!(
            "driver started: {} inputs, {} outputs",
            self.inputs.len(),
            self.outputs.len()
        );
    }

    /// The embedded main loop: one [`tick`](Self::tick) per tick-source
    /// tick. `iterations = None` never returns.
    pub fn run(
        &mut self,
        pins: &mut impl PinPort,
        clock: &mut impl TickSource,
        sink: &mut impl EventSink,
        iterations: Option<u64>,
    ) {
        self.run_with(pins, clock, sink, iterations, |_, _| {});
    }

    /// [`run`](Self::run) with a hook called on the pins just before each
    /// tick, e.g. to replay scripted input on a simulated board.
    pub fn run_with<P: PinPort>(
        &mut self,
        pins: &mut P,
        clock: &mut impl TickSource,
        sink: &mut impl EventSink,
        iterations: Option<u64>,
        mut before_tick: impl FnMut(&mut P, Tick),
    ) {
        let mut done = 0u64;
        while iterations.is_none_or(|n| done < n) {
            let now = clock.now();
            before_tick(pins, now);
            self.tick(pins, now, sink);
            clock.wait_ticks(1);
            done += 1;
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one polling iteration: sample inputs → drive outputs.
    pub fn tick(&mut self, pins: &mut impl PinPort, now: Tick, sink: &mut impl EventSink) {
        self.tick_count += 1;

        // 1. Inputs, in configuration order
        for input in &mut self.inputs {
            let raw = pins.read_pin(input.id());
            input.update(raw, now);
            match input.edge() {
                Some(Edge::Pressed) => {
                    debug!("{} pressed at {}", input.id(), now);
                    sink.emit(&AppEvent::Pressed {
                        input: input.id(),
                        at: now,
                    });
                }
                Some(Edge::Released) => {
                    debug!("{} released at {}", input.id(), now);
                    sink.emit(&AppEvent::Released {
                        input: input.id(),
                        at: now,
                    });
                }
                None => {}
            }
        }

        // 2. Pattern positions are shared by every Chase/Pattern output
        let lit_slot = if self.chaser.slots() > 0 {
            self.chaser.active_slot(now)
        } else {
            None
        };
        let plays_pattern = self
            .outputs
            .iter()
            .any(|s| matches!(s.mode, OutputMode::Pattern { .. }));
        let port_mask = if plays_pattern {
            self.sequence.mask_at(now)
        } else {
            None
        };

        // 3. Outputs, in configuration order
        let inputs = &self.inputs;
        for slot in &mut self.outputs {
            let before = slot.output.is_on();
            let out = &mut slot.output;
            match slot.mode {
                OutputMode::Manual => {}
                OutputMode::Mirror { input } => {
                    if let Some(i) = find_input(inputs, input) {
                        out.set(i.is_pressed(), pins);
                    }
                }
                OutputMode::Blink { interval } => {
                    out.blink(interval, now, pins);
                }
                OutputMode::ToggleOn { input } => {
                    if find_input(inputs, input).is_some_and(DebouncedInput::was_just_pressed) {
                        out.toggle(pins);
                    }
                }
                OutputMode::Chase { slot: n } => {
                    out.set(lit_slot == Some(n), pins);
                }
                OutputMode::Pattern { bit } => {
                    let lit = port_mask.is_some_and(|m| led_patterns::bit_lit(m, bit));
                    out.set(lit, pins);
                }
            }
            if out.is_on() != before {
                sink.emit(&AppEvent::OutputChanged {
                    output: out.id(),
                    on: out.is_on(),
                    at: now,
                });
            }
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply an external command between iterations.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        pins: &mut impl PinPort,
        now: Tick,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match cmd {
            AppCommand::TurnOn(id) => self.drive(id, pins, now, sink, |o, p| {
                o.turn_on(p);
            }),
            AppCommand::TurnOff(id) => self.drive(id, pins, now, sink, |o, p| {
                o.turn_off(p);
            }),
            AppCommand::Toggle(id) => self.drive(id, pins, now, sink, |o, p| o.toggle(p)),
            AppCommand::SetMode(id, mode) => {
                if let Some(input) = mode.input() {
                    if find_input(&self.inputs, input).is_none() {
                        warn!("SetMode({}) rejected: {} not configured", id, input);
                        return Err(Error::UnknownInput(input));
                    }
                }
                if let Err(e) = mode.check_reach(id, self.sequence.frames()) {
                    warn!("SetMode({}) rejected: {}", id, e);
                    return Err(e.into());
                }
                let slot = self.slot_mut(id)?;
                slot.mode = mode;
                if matches!(mode, OutputMode::Blink { .. }) {
                    slot.output.reset_blink();
                }
                self.rebuild_chaser();
                info!("{} mode -> {:?}", id, mode);
                Ok(())
            }
            AppCommand::AllOff => {
                for slot in &mut self.outputs {
                    slot.mode = OutputMode::Manual;
                    if slot.output.turn_off(pins) {
                        sink.emit(&AppEvent::OutputChanged {
                            output: slot.output.id(),
                            on: false,
                            at: now,
                        });
                    }
                }
                self.rebuild_chaser();
                info!("all outputs off");
                Ok(())
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn input(&self, id: InputId) -> Option<&DebouncedInput> {
        find_input(&self.inputs, id)
    }

    pub fn output(&self, id: OutputId) -> Option<&TimedOutput> {
        self.outputs.iter().find(|s| s.output.id() == id).map(|s| &s.output)
    }

    pub fn mode(&self, id: OutputId) -> Option<OutputMode> {
        self.outputs.iter().find(|s| s.output.id() == id).map(|s| s.mode)
    }

    pub fn is_pressed(&self, id: InputId) -> Result<bool> {
        self.input(id)
            .map(DebouncedInput::is_pressed)
            .ok_or(Error::UnknownInput(id))
    }

    pub fn is_on(&self, id: OutputId) -> Result<bool> {
        self.output(id)
            .map(TimedOutput::is_on)
            .ok_or(Error::UnknownOutput(id))
    }

    /// Iterations executed since construction.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn slot_mut(&mut self, id: OutputId) -> Result<&mut OutputSlot> {
        self.outputs
            .iter_mut()
            .find(|s| s.output.id() == id)
            .ok_or_else(|| {
                warn!("command for unknown output {}", id);
                Error::UnknownOutput(id)
            })
    }

    fn drive<P: PinPort>(
        &mut self,
        id: OutputId,
        pins: &mut P,
        now: Tick,
        sink: &mut impl EventSink,
        f: impl FnOnce(&mut TimedOutput, &mut P),
    ) -> Result<()> {
        let slot = self.slot_mut(id)?;
        let before = slot.output.is_on();
        f(&mut slot.output, pins);
        if slot.output.is_on() != before {
            sink.emit(&AppEvent::OutputChanged {
                output: id,
                on: slot.output.is_on(),
                at: now,
            });
        }
        Ok(())
    }

    fn rebuild_chaser(&mut self) {
        let slots = chase_slots(&self.outputs);
        if slots != self.chaser.slots() {
            self.chaser = Chaser::new(slots, self.chase_timing);
        }
    }
}

fn find_input(inputs: &[DebouncedInput], id: InputId) -> Option<&DebouncedInput> {
    inputs.iter().find(|i| i.id() == id)
}

/// Number of chaser slots needed: one past the highest `Chase` slot.
fn chase_slots(outputs: &[OutputSlot]) -> u8 {
    outputs
        .iter()
        .filter_map(|s| match s.mode {
            OutputMode::Chase { slot } => Some(slot.saturating_add(1)),
            _ => None,
        })
        .max()
        .unwrap_or(0)
}
