//! Robo Dash headless runner
//!
//! Loads a level, drives the simulation with a scripted autopilot and logs
//! everything the simulation reports.

use std::{fs, process};

use anyhow::{Context, Result, bail};

use robo_dash::sim::{GameEvent, GameState, RunStatus, TickInput, tick};
use robo_dash::{LevelDescriptor, QualityPreset, Settings, Tuning};

const USAGE: &str = "robo-dash [--level N | --file level.json] [--tuning tuning.json] \
[--settings settings.json] [--quality low|medium|high] [--frames N] [--score N] [--snapshot out.json]";

/// One minute at 60 Hz
const DEFAULT_FRAMES: u64 = 3600;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

#[derive(Debug, Default)]
struct Options {
    level: Option<u32>,
    file: Option<String>,
    tuning: Option<String>,
    settings: Option<String>,
    quality: Option<String>,
    frames: Option<u64>,
    score: Option<u64>,
    snapshot: Option<String>,
}

fn parse_args() -> Result<Options> {
    let mut opts = Options::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        let mut value = || args.next().with_context(|| format!("{arg} needs a value\n\nUsage: {USAGE}"));
        match arg.as_str() {
            "--level" => opts.level = Some(value()?.parse().context("--level must be a number")?),
            "--file" => opts.file = Some(value()?),
            "--tuning" => opts.tuning = Some(value()?),
            "--settings" => opts.settings = Some(value()?),
            "--quality" => opts.quality = Some(value()?),
            "--frames" => opts.frames = Some(value()?.parse().context("--frames must be a number")?),
            "--score" => opts.score = Some(value()?.parse().context("--score must be a number")?),
            "--snapshot" => opts.snapshot = Some(value()?),
            "-h" | "--help" => bail!("Usage: {USAGE}"),
            other => bail!("Unknown argument {other}\n\nUsage: {USAGE}"),
        }
    }

    if opts.level.is_some() && opts.file.is_some() {
        bail!("--level and --file are mutually exclusive");
    }
    Ok(opts)
}

fn read(path: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
}

fn run() -> Result<()> {
    let opts = parse_args()?;

    let level = match &opts.file {
        Some(path) => LevelDescriptor::from_json(&read(path)?).with_context(|| format!("Invalid level {path}"))?,
        None => LevelDescriptor::builtin(opts.level.unwrap_or(1)),
    };
    let tuning = match &opts.tuning {
        Some(path) => Tuning::from_json(&read(path)?)?,
        None => Tuning::default(),
    };
    let settings = load_settings(&opts)?;

    log::info!("Robo Dash (headless) starting level {}", level.index);
    let mut state = GameState::with_config(&level, opts.score.unwrap_or(0), tuning, settings);

    let frames = opts.frames.unwrap_or(DEFAULT_FRAMES);
    let mut elapsed = 0;
    while elapsed < frames && !state.status.is_terminal() {
        let input = autopilot(elapsed);
        tick(&mut state, &input);
        elapsed += 1;

        for event in state.take_events() {
            match event {
                GameEvent::Sound(cue) => log::debug!("frame {}: sound {cue:?}", state.frame),
                GameEvent::Loss { score } => println!("Game over at frame {elapsed}, score {score}"),
                GameEvent::LevelComplete { score } => {
                    println!("Level {} complete at frame {elapsed}, score {score}", state.level_index)
                }
            }
        }
    }

    match state.status {
        RunStatus::Running | RunStatus::RespawnFreeze => println!(
            "Stopped after {elapsed} frames at x={:.0}, score {}",
            state.player.pos.x, state.player.score
        ),
        RunStatus::GameOver | RunStatus::Finished => {}
    }

    if let Some(path) = &opts.snapshot {
        let json = serde_json::to_string_pretty(&state)?;
        fs::write(path, json).with_context(|| format!("Failed to write {path}"))?;
        log::info!("Wrote state snapshot to {path}");
    }

    Ok(())
}

/// Settings file (or defaults), with `--quality` taking precedence
fn load_settings(opts: &Options) -> Result<Settings> {
    let preset = match &opts.quality {
        Some(name) => Some(
            QualityPreset::parse(name)
                .with_context(|| format!("Unknown quality preset {name}, expected low, medium or high"))?,
        ),
        None => None,
    };

    let mut settings = match &opts.settings {
        Some(path) => Settings::from_json(&read(path)?)?,
        None => preset.map(Settings::from_preset).unwrap_or_default(),
    };
    if let Some(preset) = preset {
        settings.quality = preset;
    }
    log::debug!("Quality preset {}", settings.quality.as_str());
    Ok(settings)
}

/// Hold right, hop every half second and dash every two seconds
fn autopilot(frame: u64) -> TickInput {
    TickInput {
        left: false,
        right: true,
        jump: frame % 30 < 8,
        dash: frame % 120 == 60,
    }
}
