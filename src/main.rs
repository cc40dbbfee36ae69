//! picblink simulator — runs the polling core against a simulated board.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                  │
//! │                                                         │
//! │  SimPinBank      LogEventSink    JsonFileConfig         │
//! │  (PinPort)       (EventSink)     (ConfigPort)           │
//! │  Timer0 model / HostTicks (TickSource)                  │
//! │                                                         │
//! │  ─────────────── Port Trait Boundary ───────────────    │
//! │                                                         │
//! │   ┌───────────────────────────────────────────────┐     │
//! │   │        AppService (cooperative polling)       │     │
//! │   │  DebouncedInput · TimedOutput · Chaser        │     │
//! │   └───────────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Example: hold PB0 from tick 5 to 30 on the default mirror wiring.
//!
//! ```text
//! picblink-sim --iterations 40 --press 0:5-30 --trace
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use tracing_subscriber::EnvFilter;

use picblink::adapters::json_file::JsonFileConfig;
use picblink::adapters::log_sink::LogEventSink;
use picblink::adapters::sim::{PressWindow, SimPinBank};
use picblink::adapters::time::HostTicks;
use picblink::app::ports::{ConfigPort, TickSource};
use picblink::app::service::AppService;
use picblink::config::CoreConfig;
use picblink::drivers::timer0::Timer0;
use picblink::Tick;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    /// Buttons light their LEDs (PB0→LED0+1, PB1→LED2+3, PB2→LED4).
    Mirror,
    /// LED2 heartbeat every 500 ms.
    Blink,
    /// LED0..LED4 chaser with a pause.
    Chase,
    /// Whole-port demo: all on/off, 0xAA/0x55, fast flashes, pause.
    Pattern,
}

impl Preset {
    fn config(self) -> CoreConfig {
        match self {
            Self::Mirror => CoreConfig::default(),
            Self::Blink => CoreConfig::blink_preset(),
            Self::Chase => CoreConfig::chase_preset(),
            Self::Pattern => CoreConfig::pattern_preset(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "picblink-sim", version, about = "Run the picblink polling core on a simulated board")]
struct Cli {
    /// JSON configuration file; overrides --preset when given.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Built-in wiring to use when no --config is given.
    #[arg(long, value_enum, default_value_t = Preset::Mirror)]
    preset: Preset,

    /// Number of polling iterations (ticks) to run.
    #[arg(long, default_value_t = 60)]
    iterations: u64,

    /// Hold an input for a tick window, `<input>:<from>-<to>`. Repeatable.
    #[arg(long = "press", value_name = "WINDOW")]
    presses: Vec<PressWindow>,

    /// Pace ticks with the wall clock instead of the Timer0 model.
    #[arg(long)]
    realtime: bool,

    /// Print the output levels after every tick.
    #[arg(long)]
    trace: bool,

    /// Write the active configuration as JSON to this file and exit.
    #[arg(long, value_name = "FILE")]
    dump_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    info!("picblink-sim v{}", env!("CARGO_PKG_VERSION"));

    // ── 1. Configuration ──────────────────────────────────────
    let config = match &cli.config {
        Some(path) => JsonFileConfig::new(path)
            .load()
            .with_context(|| format!("loading {}", path.display()))?,
        None => cli.preset.config(),
    };

    if let Some(path) = &cli.dump_config {
        JsonFileConfig::new(path)
            .save(&config)
            .with_context(|| format!("writing {}", path.display()))?;
        return Ok(());
    }

    // ── 2. Adapters ───────────────────────────────────────────
    let mut pins = SimPinBank::from_config(&config);
    let mut sink = LogEventSink::new();

    // ── 3. Core ───────────────────────────────────────────────
    let mut service = AppService::new(&config).context("building channels")?;
    service.start(&mut pins, &mut sink);

    // ── 4. Main loop ──────────────────────────────────────────
    if cli.realtime {
        let mut clock = HostTicks::from_period_us(config.timer0.period_us());
        simulate(&cli, &mut service, &mut pins, &mut clock, &mut sink);
    } else {
        let mut clock = Timer0::new(config.timer0);
        simulate(&cli, &mut service, &mut pins, &mut clock, &mut sink);
    }

    info!(
        "done: {} iterations, {} output writes",
        service.tick_count(),
        pins.write_count()
    );
    Ok(())
}

fn simulate(
    cli: &Cli,
    service: &mut AppService,
    pins: &mut SimPinBank,
    clock: &mut impl TickSource,
    sink: &mut LogEventSink,
) {
    // The hook runs before each tick, so it reports the previous one.
    let mut last: Option<Tick> = None;
    service.run_with(pins, clock, sink, Some(cli.iterations), |bank, now| {
        if let Some(t) = last.filter(|_| cli.trace) {
            info!("t={:>5} | {}", t, bank.render());
        }
        last = Some(now);
        bank.apply_script(&cli.presses, now);
    });
    if let Some(t) = last.filter(|_| cli.trace) {
        info!("t={:>5} | {}", t, pins.render());
    }
}
