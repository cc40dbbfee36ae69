//! Channel identifiers and pin assignments for the PIC16F876A demo board.
//!
//! Single source of truth: the default configuration and the simulator
//! reference this module rather than hard-coding pin numbers.
//!
//! | Channel | Pin | Direction | Level            |
//! |---------|-----|-----------|------------------|
//! | LED0    | RA3 | out       | HIGH = lit       |
//! | LED1    | RA5 | out       | HIGH = lit       |
//! | LED2    | RC0 | out       | HIGH = lit       |
//! | LED3    | RC1 | out       | HIGH = lit       |
//! | LED4    | RC2 | out       | HIGH = lit       |
//! | PB0     | RA2 | in        | LOW = pressed    |
//! | PB1     | RA1 | in        | LOW = pressed    |
//! | PB2     | RA4 | in        | LOW = pressed    |

use core::fmt;

use serde::{Deserialize, Serialize};

/// Logical identifier of a debounced input channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputId(pub u8);

/// Logical identifier of a timed output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputId(pub u8);

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PB{}", self.0)
    }
}

impl fmt::Display for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LED{}", self.0)
    }
}

/// Electrical polarity of a line. Applied at the pin boundary only; the
/// core always sees `true` as "active".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    #[default]
    ActiveHigh,
    ActiveLow,
}

impl Polarity {
    /// Convert an electrical level into a logical one (and back; the
    /// mapping is its own inverse).
    pub const fn apply(self, level: bool) -> bool {
        match self {
            Self::ActiveHigh => level,
            Self::ActiveLow => !level,
        }
    }
}

/// I/O port of the PIC16F876A.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Port {
    A,
    B,
    C,
}

/// A physical pin, e.g. `RA3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinName {
    pub port: Port,
    pub bit: u8,
}

impl PinName {
    pub const fn new(port: Port, bit: u8) -> Self {
        Self { port, bit }
    }
}

impl fmt::Display for PinName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let port = match self.port {
            Port::A => 'A',
            Port::B => 'B',
            Port::C => 'C',
        };
        write!(f, "R{port}{}", self.bit)
    }
}

// ---------------------------------------------------------------------------
// LEDs (active-high, series resistor to ground)
// ---------------------------------------------------------------------------

pub const LED0: OutputId = OutputId(0);
pub const LED1: OutputId = OutputId(1);
pub const LED2: OutputId = OutputId(2);
pub const LED3: OutputId = OutputId(3);
pub const LED4: OutputId = OutputId(4);

pub const LED0_PIN: PinName = PinName::new(Port::A, 3);
pub const LED1_PIN: PinName = PinName::new(Port::A, 5);
pub const LED2_PIN: PinName = PinName::new(Port::C, 0);
pub const LED3_PIN: PinName = PinName::new(Port::C, 1);
pub const LED4_PIN: PinName = PinName::new(Port::C, 2);

// ---------------------------------------------------------------------------
// Push-buttons (active-low with pull-up)
// ---------------------------------------------------------------------------

pub const PB0: InputId = InputId(0);
pub const PB1: InputId = InputId(1);
pub const PB2: InputId = InputId(2);

pub const PB0_PIN: PinName = PinName::new(Port::A, 2);
pub const PB1_PIN: PinName = PinName::new(Port::A, 1);
/// RA4 is open-drain on this part; the external pull-up is mandatory.
pub const PB2_PIN: PinName = PinName::new(Port::A, 4);

/// Polarity of every push-button on the board.
pub const BUTTON_POLARITY: Polarity = Polarity::ActiveLow;

/// Physical pin behind a board output, if it is one of the fitted LEDs.
pub fn output_pin(id: OutputId) -> Option<PinName> {
    match id {
        LED0 => Some(LED0_PIN),
        LED1 => Some(LED1_PIN),
        LED2 => Some(LED2_PIN),
        LED3 => Some(LED3_PIN),
        LED4 => Some(LED4_PIN),
        _ => None,
    }
}

/// Physical pin behind a board input, if it is one of the fitted buttons.
pub fn input_pin(id: InputId) -> Option<PinName> {
    match id {
        PB0 => Some(PB0_PIN),
        PB1 => Some(PB1_PIN),
        PB2 => Some(PB2_PIN),
        _ => None,
    }
}
