//! Timer0 tick source model for the PIC16F876A.
//!
//! Timer0 is an 8-bit up-counter clocked at Fosc/4 through an optional
//! prescaler. Reloading it with `preload` after every overflow gives a
//! fixed tick period:
//!
//! ```text
//!  period = (256 - preload) * prescaler * 4 / Fosc
//!  4 MHz, 1:256, preload 60  ->  196 * 256 * 1 µs = 50.176 ms
//! ```
//!
//! [`Timer0`] is an instruction-cycle software model of that counter. One
//! overflow is one [`Tick`]; it implements [`TickSource`] so the simulator
//! and tests can run the polling loop on board-accurate time without
//! hardware. The register-level setup itself stays in platform glue.

use serde::{Deserialize, Serialize};

use crate::app::ports::TickSource;
use crate::Tick;

/// Prescaler assignment. `None` means the prescaler is assigned to the
/// watchdog (PSA = 1), so Timer0 counts every instruction cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prescaler {
    None,
    Div2,
    Div4,
    Div8,
    Div16,
    Div32,
    Div64,
    Div128,
    Div256,
}

impl Prescaler {
    pub const fn divisor(self) -> u32 {
        match self {
            Self::None => 1,
            Self::Div2 => 2,
            Self::Div4 => 4,
            Self::Div8 => 8,
            Self::Div16 => 16,
            Self::Div32 => 32,
            Self::Div64 => 64,
            Self::Div128 => 128,
            Self::Div256 => 256,
        }
    }

    /// PSA and PS2:PS0 bits of OPTION_REG.
    const fn option_bits(self) -> u8 {
        match self {
            Self::None => 0b1000,
            Self::Div2 => 0b000,
            Self::Div4 => 0b001,
            Self::Div8 => 0b010,
            Self::Div16 => 0b011,
            Self::Div32 => 0b100,
            Self::Div64 => 0b101,
            Self::Div128 => 0b110,
            Self::Div256 => 0b111,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer0Config {
    /// Oscillator frequency in Hz.
    pub fosc_hz: u32,
    pub prescaler: Prescaler,
    /// Value written to TMR0 after each overflow.
    pub preload: u8,
}

impl Default for Timer0Config {
    fn default() -> Self {
        Self {
            fosc_hz: 4_000_000,
            prescaler: Prescaler::Div256,
            preload: 60,
        }
    }
}

impl Timer0Config {
    /// Timer increments between two overflows.
    pub const fn counts_per_tick(&self) -> u32 {
        256 - self.preload as u32
    }

    /// Instruction cycles between two overflows.
    pub const fn cycles_per_tick(&self) -> u32 {
        self.counts_per_tick() * self.prescaler.divisor()
    }

    /// Tick period in microseconds (rounded down).
    pub fn period_us(&self) -> u32 {
        let cycles = u64::from(self.cycles_per_tick());
        (cycles * 4 * 1_000_000 / u64::from(self.fosc_hz.max(1))) as u32
    }

    /// Ticks needed to cover at least `ms` milliseconds.
    pub fn ticks_for_ms(&self, ms: u32) -> Tick {
        let period = u64::from(self.period_us().max(1));
        (u64::from(ms) * 1000).div_ceil(period) as Tick
    }

    /// OPTION_REG value for timer mode with internal pull-ups disabled
    /// (RBPU = 1, T0CS = 0).
    pub const fn option_reg(&self) -> u8 {
        0b1000_0000 | self.prescaler.option_bits()
    }
}

/// Cycle-level model of the Timer0 counter.
#[derive(Debug, Clone)]
pub struct Timer0 {
    config: Timer0Config,
    tmr0: u8,
    prescale: u32,
    overflows: Tick,
    t0if: bool,
}

impl Timer0 {
    pub fn new(config: Timer0Config) -> Self {
        log::info!(
            "timer0: OPTION_REG=0b{:08b} preload={} period={}us",
            config.option_reg(),
            config.preload,
            config.period_us()
        );
        Self {
            config,
            tmr0: config.preload,
            prescale: 0,
            overflows: 0,
            t0if: false,
        }
    }

    pub fn config(&self) -> &Timer0Config {
        &self.config
    }

    /// Current TMR0 register value.
    pub fn tmr0(&self) -> u8 {
        self.tmr0
    }

    /// Overflow flag; set on every overflow, cleared by the caller.
    pub fn overflow_flag(&self) -> bool {
        self.t0if
    }

    pub fn clear_overflow_flag(&mut self) {
        self.t0if = false;
    }

    /// Reload TMR0 and clear the prescaler, like writing TMR0 in firmware.
    pub fn restart(&mut self) {
        self.tmr0 = self.config.preload;
        self.prescale = 0;
        self.t0if = false;
    }

    /// Run the counter for `cycles` instruction cycles.
    pub fn advance(&mut self, cycles: u32) {
        let div = u64::from(self.config.prescaler.divisor());
        let total = u64::from(self.prescale) + u64::from(cycles);
        let mut increments = total / div;
        self.prescale = (total % div) as u32;

        let to_overflow = 256 - u64::from(self.tmr0);
        if increments < to_overflow {
            self.tmr0 += increments as u8;
            return;
        }

        increments -= to_overflow;
        let period = u64::from(self.config.counts_per_tick());
        let extra = (increments / period) as Tick;
        self.overflows = self.overflows.wrapping_add(1).wrapping_add(extra);
        self.tmr0 = self.config.preload + (increments % period) as u8;
        self.t0if = true;
    }

    /// Instruction cycles until the next overflow.
    pub fn cycles_to_overflow(&self) -> u32 {
        let div = self.config.prescaler.divisor();
        (256 - u32::from(self.tmr0)) * div - self.prescale
    }

    /// One full tick from a fresh reload: the board's 50 ms delay.
    pub fn delay_one_tick(&mut self) {
        self.restart();
        self.wait_ticks(1);
    }
}

impl TickSource for Timer0 {
    fn now(&self) -> Tick {
        self.overflows
    }

    fn wait_ticks(&mut self, n: Tick) {
        if n == 0 {
            return;
        }
        self.advance(self.cycles_to_overflow());
        for _ in 1..n {
            self.advance(self.config.cycles_per_tick());
        }
        self.clear_overflow_flag();
    }
}
