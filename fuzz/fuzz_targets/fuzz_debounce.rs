//! Fuzz target: debounce + polling loop
//!
//! First byte picks the threshold, every following byte is one tick of raw
//! samples (bit n = input n). Asserts that:
//! - commits only follow `threshold + 1` consecutive disagreeing samples
//! - edges appear on the committing update only
//! - mirrored outputs always equal their input's debounced state
//!
//! cargo fuzz run fuzz_debounce

#![no_main]

use libfuzzer_sys::fuzz_target;
use picblink::app::events::AppEvent;
use picblink::app::ports::{EventSink, PinPort};
use picblink::app::service::AppService;
use picblink::config::CoreConfig;
use picblink::pins::{self, InputId, OutputId};

struct BytePins {
    sample: u8,
}

impl PinPort for BytePins {
    fn read_pin(&mut self, id: InputId) -> bool {
        self.sample & (1 << (id.0 & 7)) != 0
    }

    fn write_pin(&mut self, _id: OutputId, _level: bool) {}
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Some((&threshold, samples)) = data.split_first() else {
        return;
    };
    let mut config = CoreConfig::default();
    config.debounce_threshold = threshold;
    let Ok(mut app) = AppService::new(&config) else {
        // Only the oversized thresholds are refused.
        assert!(config.validate().is_err());
        return;
    };

    let mut board = BytePins { sample: 0 };
    let mut runs = [0u32; 3];
    app.start(&mut board, &mut Discard);

    for (t, &sample) in samples.iter().enumerate() {
        board.sample = sample;
        let ids = [pins::PB0, pins::PB1, pins::PB2];
        let before: Vec<bool> = ids.iter().map(|&id| app.is_pressed(id).unwrap()).collect();

        app.tick(&mut board, t as u32, &mut Discard);

        for (n, &id) in ids.iter().enumerate() {
            let raw = sample & (1 << id.0) != 0;
            runs[n] = if raw != before[n] { runs[n] + 1 } else { 0 };
            let input = app.input(id).unwrap();
            let now = input.is_pressed();
            if now != before[n] {
                assert_eq!(runs[n], u32::from(threshold) + 1);
                runs[n] = 0;
            } else {
                assert!(runs[n] <= u32::from(threshold));
            }
            assert_eq!(input.edge().is_some(), now != before[n]);
        }

        assert_eq!(app.is_on(pins::LED0).unwrap(), app.is_pressed(pins::PB0).unwrap());
        assert_eq!(app.is_on(pins::LED3).unwrap(), app.is_pressed(pins::PB1).unwrap());
        assert_eq!(app.is_on(pins::LED4).unwrap(), app.is_pressed(pins::PB2).unwrap());
    }
});
