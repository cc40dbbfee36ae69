//! Integration tests: HalPinBank over mock `embedded-hal` pins.

use std::cell::Cell;
use std::rc::Rc;

use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin, OutputPin};

use picblink::app::ports::PinPort;
use picblink::app::service::AppService;
use picblink::adapters::hardware::HalPinBank;
use picblink::config::CoreConfig;
use picblink::error::Error;
use picblink::pins::{self, InputId, OutputId, Polarity};

use crate::mock_hw::RecordingSink;

#[derive(Debug)]
struct PinFault;

impl digital::Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Electrical input line; `None` makes the next read fail.
#[derive(Clone)]
struct MockInput(Rc<Cell<Option<bool>>>);

impl MockInput {
    fn at(level: bool) -> Self {
        Self(Rc::new(Cell::new(Some(level))))
    }
}

impl ErrorType for MockInput {
    type Error = PinFault;
}

impl InputPin for MockInput {
    fn is_high(&mut self) -> Result<bool, PinFault> {
        self.0.get().ok_or(PinFault)
    }

    fn is_low(&mut self) -> Result<bool, PinFault> {
        self.is_high().map(|h| !h)
    }
}

/// Electrical output line; remembers the last driven level.
#[derive(Clone, Default)]
struct MockOutput(Rc<Cell<Option<bool>>>);

impl ErrorType for MockOutput {
    type Error = PinFault;
}

impl OutputPin for MockOutput {
    fn set_low(&mut self) -> Result<(), PinFault> {
        self.0.set(Some(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), PinFault> {
        self.0.set(Some(true));
        Ok(())
    }
}

#[test]
fn active_low_button_reads_pressed_when_pulled_low() {
    let line = MockInput::at(true);
    let mut bank: HalPinBank<MockInput, MockOutput> = HalPinBank::new();
    bank.bind_input(pins::PB0, line.clone(), Polarity::ActiveLow)
        .unwrap();

    assert!(!bank.read_pin(pins::PB0));
    line.0.set(Some(false));
    assert!(bank.read_pin(pins::PB0));
}

#[test]
fn failed_read_holds_last_good_level() {
    let line = MockInput::at(true);
    let mut bank: HalPinBank<MockInput, MockOutput> = HalPinBank::new();
    bank.bind_input(pins::PB1, line.clone(), Polarity::ActiveHigh)
        .unwrap();

    assert!(bank.read_pin(pins::PB1));
    line.0.set(None);
    assert!(bank.read_pin(pins::PB1));
    line.0.set(Some(false));
    assert!(!bank.read_pin(pins::PB1));
}

#[test]
fn unbound_channels_are_inert() {
    let mut bank: HalPinBank<MockInput, MockOutput> = HalPinBank::new();
    assert!(!bank.read_pin(InputId(5)));
    bank.write_pin(OutputId(5), true);
}

#[test]
fn writes_pass_through_output_polarity() {
    let sink_led = MockOutput::default();
    let source_led = MockOutput::default();
    let mut bank: HalPinBank<MockInput, MockOutput> = HalPinBank::new();
    bank.bind_output(pins::LED0, source_led.clone(), Polarity::ActiveHigh)
        .unwrap();
    bank.bind_output(pins::LED1, sink_led.clone(), Polarity::ActiveLow)
        .unwrap();

    bank.write_pin(pins::LED0, true);
    bank.write_pin(pins::LED1, true);
    assert_eq!(source_led.0.get(), Some(true));
    assert_eq!(sink_led.0.get(), Some(false));
}

#[test]
fn binding_beyond_capacity_fails() {
    let mut bank: HalPinBank<MockInput, MockOutput> = HalPinBank::new();
    for n in 0..8 {
        bank.bind_output(OutputId(n), MockOutput::default(), Polarity::ActiveHigh)
            .unwrap();
    }
    assert_eq!(
        bank.bind_output(OutputId(8), MockOutput::default(), Polarity::ActiveHigh),
        Err(Error::Capacity("hal outputs"))
    );
}

#[test]
fn service_drives_board_lines_through_hal() {
    let config = CoreConfig::default();
    let mut bank: HalPinBank<MockInput, MockOutput> = HalPinBank::new();
    let pb0 = MockInput::at(true);
    for ic in &config.inputs {
        let line = if ic.id == pins::PB0 {
            pb0.clone()
        } else {
            MockInput::at(true)
        };
        bank.bind_input(ic.id, line, pins::BUTTON_POLARITY).unwrap();
    }
    let led0 = MockOutput::default();
    for oc in &config.outputs {
        let line = if oc.id == pins::LED0 {
            led0.clone()
        } else {
            MockOutput::default()
        };
        bank.bind_output(oc.id, line, Polarity::ActiveHigh).unwrap();
    }

    let mut sink = RecordingSink::new();
    let mut app = AppService::new(&config).unwrap();
    app.start(&mut bank, &mut sink);
    assert_eq!(led0.0.get(), Some(false));

    pb0.0.set(Some(false));
    for t in 0..4 {
        app.tick(&mut bank, t, &mut sink);
    }
    assert_eq!(led0.0.get(), Some(true));
}
