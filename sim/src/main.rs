use clap::{Parser, ValueEnum};
use ocean::water::WavePreset;
use ocean::TICKS_PER_SECOND;
use sim::init::{self, SimSettings};
use sim::scenario::load_scenario;
use std::path::PathBuf;

#[derive(ValueEnum, Debug, Clone, Copy)]
enum PresetArg {
    Still,
    Calm,
    Ocean,
    Storm,
}

impl From<PresetArg> for WavePreset {
    fn from(value: PresetArg) -> Self {
        match value {
            PresetArg::Still => WavePreset::Still,
            PresetArg::Calm => WavePreset::Calm,
            PresetArg::Ocean => WavePreset::Ocean,
            PresetArg::Storm => WavePreset::Storm,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Scenario file (RON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Replace the scenario's sea with a preset
    #[arg(short, long, value_enum)]
    preset: Option<PresetArg>,

    /// Override the sea's wave intensity
    #[arg(short, long)]
    intensity: Option<f32>,

    #[arg(short, long, default_value_t = 30.0)]
    seconds: f32,

    #[arg(short, long, default_value_t = TICKS_PER_SECOND)]
    ticks_per_second: u64,

    /// Pace the simulation against the wall clock
    #[arg(long)]
    realtime: bool,
}

fn main() {
    let args = Args::parse();

    if !(args.seconds.is_finite() && args.seconds > 0.0) {
        eprintln!("Error: seconds must be a positive number.");
        eprintln!("Got: {}", args.seconds);
        std::process::exit(1);
    }

    if args.ticks_per_second == 0 || args.ticks_per_second > 1000 {
        eprintln!("Error: ticks_per_second must be between 1 and 1000 (inclusive).");
        eprintln!("Got: {}", args.ticks_per_second);
        std::process::exit(1);
    }

    let mut scenario = match load_scenario(args.config.as_deref()) {
        Ok(scenario) => scenario,
        Err(err) => {
            eprintln!("Failed to load scenario: {err}");
            std::process::exit(1);
        }
    };

    if let Some(preset) = args.preset {
        scenario = scenario.with_preset(preset.into());
    }
    if let Some(intensity) = args.intensity {
        scenario = scenario.with_intensity(intensity);
    }

    let exit = init::init(
        scenario,
        SimSettings {
            ticks_per_second: args.ticks_per_second,
            seconds: args.seconds,
            realtime: args.realtime,
        },
    );

    if exit.is_error() {
        std::process::exit(1);
    }
}
