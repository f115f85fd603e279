//! BioTerror headless simulator
//!
//! Plays a full run against the built-in arena and prints a JSON summary.
//!
//! Run with: cargo run -p bio_sim -- [config.toml]
//!
//! Optional flags:
//! - `--max-time <seconds>`: simulated time limit (default 600)
//! - `--step <seconds>`: tick length (default 1/30)

use bio_sim::{run_headless, SimConfig};

const DEFAULT_MAX_TIME: f32 = 600.0;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config_path = None;
    let mut max_time = DEFAULT_MAX_TIME;
    let mut step = bio_sim::headless::DEFAULT_STEP;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--max-time" => max_time = parse_flag(&arg, args.next(), max_time),
            "--step" => step = parse_flag(&arg, args.next(), step),
            _ if arg.starts_with("--") => log::warn!("Unknown flag: {}", arg),
            _ => config_path = Some(arg),
        }
    }

    let config = match config_path {
        Some(path) => match SimConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => {
            let mut config = SimConfig::default();
            config.apply_env_overrides();
            config
        }
    };
    config.print_summary();

    let summary = match run_headless(config, max_time, step) {
        Ok(summary) => summary,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Failed to serialize run summary: {}", e);
            std::process::exit(1);
        }
    }
}

fn parse_flag(flag: &str, value: Option<String>, fallback: f32) -> f32 {
    match value.as_deref().map(str::parse::<f32>) {
        Some(Ok(v)) if v > 0.0 => v,
        _ => {
            log::warn!("Invalid value for {}, using {}", flag, fallback);
            fallback
        }
    }
}
