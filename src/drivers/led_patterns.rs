//! Timed LED patterns: a chaser and a whole-port frame sequence.
//!
//! Both are pure functions of elapsed ticks, so the driver only has to ask
//! what is lit at `now` and apply it.
//!
//! The chaser walks LED0..LED4 at 100 ms per step followed by a 500 ms
//! pause:
//!
//! ```text
//!  slots = 3, step = 2, pause = 3      cycle = 3*2 + 3 = 9 ticks
//!  tick   0 1 2 3 4 5 6 7 8 | 9 ...
//!  slot   0 0 1 1 2 2 - - - | 0 ...
//! ```
//!
//! A [`Sequence`] plays a list of port-wide [`Frame`]s, each a bitmask held
//! for a number of ticks; output `n` follows bit `n`.
//!
//! ## Rollover
//!
//! The origin is re-anchored to the start of the current cycle on every
//! call, so phase stays continuous across `Tick` wrap as long as the
//! pattern is polled at least once per `Tick::MAX - cycle` ticks.

use serde::{Deserialize, Serialize};

use crate::Tick;

/// Chaser timing, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaseTiming {
    /// How long each slot stays lit.
    pub step: Tick,
    /// Dark gap after the last slot.
    pub pause: Tick,
}

impl Default for ChaseTiming {
    /// 100 ms steps and a 500 ms pause at the 50 ms Timer0 tick.
    fn default() -> Self {
        Self { step: 2, pause: 10 }
    }
}

/// Position within a repeating cycle of `cycle` ticks. Moves `origin`
/// forward by whole cycles so it never trails `now` by more than one.
fn phase(origin: &mut Option<Tick>, now: Tick, cycle: Tick) -> Tick {
    let start = *origin.get_or_insert(now);
    let elapsed = now.wrapping_sub(start);
    let pos = elapsed % cycle;
    *origin = Some(now.wrapping_sub(pos));
    pos
}

#[derive(Debug, Clone)]
pub struct Chaser {
    slots: u8,
    timing: ChaseTiming,
    origin: Option<Tick>,
}

impl Chaser {
    pub fn new(slots: u8, timing: ChaseTiming) -> Self {
        Self {
            slots,
            timing: ChaseTiming {
                step: timing.step.max(1),
                pause: timing.pause,
            },
            origin: None,
        }
    }

    pub fn slots(&self) -> u8 {
        self.slots
    }

    /// Length of one full sequence including the pause.
    pub fn cycle_len(&self) -> Tick {
        (self.slots as Tick)
            .saturating_mul(self.timing.step)
            .saturating_add(self.timing.pause)
    }

    /// Restart the sequence at slot 0 on the next call.
    pub fn restart(&mut self) {
        self.origin = None;
    }

    /// Slot lit at `now`, or `None` during the pause. The first call fixes
    /// the sequence origin.
    pub fn active_slot(&mut self, now: Tick) -> Option<u8> {
        let cycle = self.cycle_len();
        if self.slots == 0 || cycle == 0 {
            return None;
        }
        let pos = phase(&mut self.origin, now, cycle);
        let lit = (self.slots as Tick).saturating_mul(self.timing.step);
        (pos < lit).then(|| (pos / self.timing.step) as u8)
    }
}

// ── Frame sequence ────────────────────────────────────────────

/// Most frames a [`Sequence`] can hold.
pub const MAX_FRAMES: usize = 16;

/// One step of a port-wide pattern: bit `n` of `mask` drives output `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub mask: u8,
    /// Ticks the frame stays up. Zero-length frames are skipped.
    pub hold: Tick,
}

impl Frame {
    pub const fn new(mask: u8, hold: Tick) -> Self {
        Self { mask, hold }
    }
}

pub type Frames = heapless::Vec<Frame, MAX_FRAMES>;

/// Whole-port demo: all on 1 s, all off 1 s, `0xAA`/`0x55` at 500 ms,
/// five 100 ms flashes, then 2 s dark. `ticks` converts milliseconds to
/// ticks of the running tick source.
pub fn port_demo_frames(ticks: impl Fn(u32) -> Tick) -> Frames {
    const ALL: u8 = 0xFF;
    let mut frames = Frames::new();
    let mut push = |mask, ms| {
        let _ = frames.push(Frame::new(mask, ticks(ms)));
    };
    push(ALL, 1000);
    push(0x00, 1000);
    push(0xAA, 500);
    push(0x55, 500);
    for _ in 0..5 {
        push(ALL, 100);
        push(0x00, 100);
    }
    push(0x00, 2000);
    frames
}

#[derive(Debug, Clone)]
pub struct Sequence {
    frames: Frames,
    origin: Option<Tick>,
}

impl Sequence {
    pub fn new(frames: Frames) -> Self {
        Self {
            frames,
            origin: None,
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Sum of all frame holds.
    pub fn cycle_len(&self) -> Tick {
        self.frames
            .iter()
            .fold(0, |acc: Tick, f| acc.saturating_add(f.hold))
    }

    pub fn restart(&mut self) {
        self.origin = None;
    }

    /// Port mask shown at `now`, or `None` for an empty sequence. The first
    /// call fixes the origin.
    pub fn mask_at(&mut self, now: Tick) -> Option<u8> {
        let cycle = self.cycle_len();
        if cycle == 0 {
            return None;
        }
        let mut pos = phase(&mut self.origin, now, cycle);
        for frame in &self.frames {
            if pos < frame.hold {
                return Some(frame.mask);
            }
            pos -= frame.hold;
        }
        None
    }
}

/// Whether output bit `bit` is lit in `mask`.
pub const fn bit_lit(mask: u8, bit: u8) -> bool {
    bit < 8 && mask & (1 << bit) != 0
}
