//! End-to-end runs: simulated board + Timer0 model + stored configuration.

use picblink::adapters::eeprom::EepromImage;
use picblink::adapters::json_file::JsonFileConfig;
use picblink::adapters::sim::{PressWindow, SimPinBank};
use picblink::app::ports::{ConfigPort, TickSource};
use picblink::app::service::AppService;
use picblink::config::{CoreConfig, OutputMode};
use picblink::drivers::timer0::Timer0;
use picblink::error::ConfigError;
use picblink::pins;

use crate::mock_hw::RecordingSink;

fn simulate(
    config: &CoreConfig,
    script: &[PressWindow],
    iterations: u32,
) -> (AppService, SimPinBank, RecordingSink, Timer0) {
    let mut bank = SimPinBank::from_config(config);
    let mut sink = RecordingSink::new();
    let mut clock = Timer0::new(config.timer0);
    let mut app = AppService::new(config).unwrap();
    app.start(&mut bank, &mut sink);
    for _ in 0..iterations {
        let now = clock.now();
        bank.apply_script(script, now);
        app.tick(&mut bank, now, &mut sink);
        clock.wait_ticks(1);
    }
    (app, bank, sink, clock)
}

#[test]
fn scripted_press_lights_mirrored_pair() {
    let script: [PressWindow; 1] = ["PB1:2-12".parse().unwrap()];
    let (_app, bank, sink, clock) = simulate(&CoreConfig::default(), &script, 20);

    assert_eq!(clock.now(), 20);
    assert_eq!(sink.presses(), vec![(pins::PB1, 5)]);
    assert_eq!(sink.output_changes(pins::LED2), vec![(true, 5), (false, 15)]);
    assert_eq!(sink.output_changes(pins::LED3), vec![(true, 5), (false, 15)]);
    assert_eq!(bank.output_level(pins::LED2), Some(false));
    assert!(sink.output_changes(pins::LED0).is_empty());
}

#[test]
fn short_tap_is_filtered_out() {
    let script: [PressWindow; 1] = ["0:3-6".parse().unwrap()];
    let (app, _bank, sink, _clock) = simulate(&CoreConfig::default(), &script, 15);
    assert!(sink.presses().is_empty());
    assert!(!app.is_on(pins::LED0).unwrap());
}

#[test]
fn heartbeat_runs_on_timer0_ticks() {
    let config = CoreConfig::blink_preset();
    let (_app, bank, sink, clock) = simulate(&config, &[], 25);

    assert_eq!(
        sink.output_changes(pins::LED2),
        vec![(true, 0), (false, 10), (true, 20)]
    );
    // start() plus three toggles
    assert_eq!(bank.write_count(), 4);
    assert_eq!(bank.output_level(pins::LED2), Some(true));
    assert_eq!(clock.tmr0(), config.timer0.preload);
}

#[test]
fn blink_interval_is_half_a_second_of_board_time() {
    let config = CoreConfig::blink_preset();
    let Some(OutputMode::Blink { interval }) = config.output(pins::LED2).map(|o| o.mode) else {
        panic!("blink preset lost its heartbeat");
    };
    assert_eq!(interval, config.timer0.ticks_for_ms(500));
}

#[test]
fn eeprom_stored_wiring_drives_the_board() {
    let mut config = CoreConfig::default();
    config.debounce_threshold = 0;
    config.outputs[4].mode = OutputMode::ToggleOn { input: pins::PB2 };

    let mut eeprom = EepromImage::erased();
    eeprom.save(&config).unwrap();
    let image = EepromImage::from_bytes(&eeprom.as_bytes());
    let loaded = image.load().unwrap();
    assert_eq!(loaded, config);

    let script: [PressWindow; 2] = ["2:1-3".parse().unwrap(), "2:5-7".parse().unwrap()];
    let (app, _bank, sink, _clock) = simulate(&loaded, &script, 10);
    assert_eq!(sink.presses(), vec![(pins::PB2, 1), (pins::PB2, 5)]);
    assert_eq!(sink.output_changes(pins::LED4), vec![(true, 1), (false, 5)]);
    assert!(!app.is_on(pins::LED4).unwrap());
}

#[test]
fn invalid_eeprom_image_is_rejected() {
    let mut bytes = [0u8; 16];
    bytes[0] = 0x42;
    assert_eq!(
        EepromImage::from_bytes(&bytes).load(),
        Err(ConfigError::Parse)
    );
}

#[test]
fn json_file_round_trips_through_disk() {
    let path = std::env::temp_dir().join(format!("picblink-sim-{}.json", std::process::id()));
    let mut store = JsonFileConfig::new(&path);
    let config = CoreConfig::chase_preset();
    store.save(&config).unwrap();
    let loaded = store.load().unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded, config);
    let (_app, _bank, sink, _clock) = simulate(&loaded, &[], 20);
    let first = sink
        .events
        .iter()
        .filter(|e| matches!(e, picblink::app::events::AppEvent::OutputChanged { on: true, .. }))
        .count();
    assert_eq!(first, 5);
}
