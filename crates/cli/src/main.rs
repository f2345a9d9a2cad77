#![deny(unsafe_code)]
//! CLI binary for the rotor-field bearing simulator.
//!
//! Subcommands:
//! - `run [preset]`: run a scenario for N frames, print legend and per-bearing stats
//! - `snapshot [preset]`: run a scenario, write one bearing's unrolled surface as PNG
//! - `list`: print available presets and field types

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use rotor_field_core::{Engine, FieldType, RotorSimulation, Scenario};
use rotor_field_presets::Preset;
use std::path::PathBuf;
use std::process;
use tracing::info;

#[derive(Parser)]
#[command(name = "rotor-field", about = "Rotor-bearing film field simulator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Where the scenario comes from, plus overrides of its run controls.
#[derive(Args)]
struct Source {
    /// Preset name (journal, two-pad, tilting-pad, turbine).
    preset: Option<String>,

    /// Scenario JSON file, used instead of a preset.
    #[arg(long, conflicts_with = "preset")]
    scenario: Option<PathBuf>,

    /// Rotor speed override.
    #[arg(long)]
    rpm: Option<f64>,

    /// Displayed field override (pressure, thickness, temperature).
    #[arg(short, long)]
    field: Option<String>,

    /// Number of frames to simulate.
    #[arg(long)]
    frames: Option<usize>,

    /// Seconds per frame.
    #[arg(long)]
    dt: Option<f64>,
}

#[derive(Subcommand)]
enum Command {
    /// Run a scenario and print the final legend range and bearing stats.
    Run {
        #[command(flatten)]
        source: Source,

        /// Include the per-bearing history in the output.
        #[arg(long)]
        history: bool,
    },
    /// Run a scenario and write one bearing's unrolled surface as a PNG.
    Snapshot {
        #[command(flatten)]
        source: Source,

        /// Index of the bearing to render.
        #[arg(short, long, default_value_t = 0)]
        bearing: usize,

        /// Image width in pixels (circumferential direction).
        #[arg(short = 'W', long, default_value_t = 256)]
        width: usize,

        /// Image height in pixels (axial direction).
        #[arg(short = 'H', long, default_value_t = 64)]
        height: usize,

        /// Output file path.
        #[arg(short, long, default_value = "surface.png")]
        output: PathBuf,
    },
    /// List available presets and field types.
    List,
}

/// Resolves the scenario and applies command-line overrides.
fn load_scenario(source: &Source) -> Result<Scenario, CliError> {
    let mut scenario = match (&source.scenario, &source.preset) {
        (Some(path), _) => {
            let text =
                std::fs::read_to_string(path).map_err(|source| CliError::ReadScenario {
                    path: path.clone(),
                    source,
                })?;
            Scenario::from_json(&text)?
        }
        (None, Some(name)) => rotor_field_presets::scenario(name)?,
        (None, None) => {
            return Err(CliError::Input(
                "expected a preset name or --scenario <FILE>".into(),
            ))
        }
    };
    if let Some(rpm) = source.rpm {
        scenario.rpm = rpm;
    }
    if let Some(field) = &source.field {
        scenario.field_type = field.parse()?;
    }
    if let Some(frames) = source.frames {
        scenario.frames = frames;
    }
    if let Some(dt) = source.dt {
        scenario.dt = dt;
    }
    scenario.validate()?;
    Ok(scenario)
}

/// Builds the scenario and steps it for its frame count.
fn simulate(scenario: &Scenario) -> Result<RotorSimulation, CliError> {
    let mut sim = scenario.build()?;
    for _ in 0..scenario.frames {
        sim.step(scenario.dt);
    }
    info!(
        scenario = %scenario.name,
        frames = scenario.frames,
        elapsed = sim.elapsed(),
        "simulation finished"
    );
    Ok(sim)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let presets = Preset::list_names();
            let fields: Vec<&str> = FieldType::ALL.iter().map(|t| t.name()).collect();
            if cli.json {
                let info = serde_json::json!({
                    "presets": presets,
                    "fields": fields,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Presets:");
                for name in presets {
                    println!("  {name}");
                }
                println!("Fields:");
                println!("  {}", fields.join(", "));
            }
        }
        Command::Run { source, history } => {
            let scenario = load_scenario(&source)?;
            let sim = simulate(&scenario)?;
            let frame = sim.frame();

            if cli.json {
                let bearings: Vec<_> = sim
                    .bearings()
                    .iter()
                    .zip(&frame.bearings)
                    .map(|(b, f)| serde_json::json!({"name": b.name, "stats": f.stats}))
                    .collect();
                let mut info = serde_json::json!({
                    "scenario": scenario.name,
                    "frames": scenario.frames,
                    "elapsed": sim.elapsed(),
                    "rpm": frame.rpm,
                    "field": frame.field_type,
                    "legend": frame.legend,
                    "bearings": bearings,
                });
                if history {
                    info["history"] = serde_json::to_value(sim.history())?;
                }
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                let unit = frame.field_type.unit();
                println!(
                    "{} after {} frames ({:.3} s) at {} rpm",
                    scenario.name,
                    scenario.frames,
                    sim.elapsed(),
                    frame.rpm
                );
                println!(
                    "{} legend: {:.3} .. {:.3} {unit}",
                    frame.field_type, frame.legend.min, frame.legend.max
                );
                for (i, (b, f)) in sim.bearings().iter().zip(&frame.bearings).enumerate() {
                    let s = f.stats;
                    println!(
                        "  [{i}] {}: max pressure {:.3} bar, min thickness {:.3} µm, \
                         max temperature {:.3} °C",
                        b.name, s.max_pressure, s.min_thickness, s.max_temperature
                    );
                    if history {
                        if let Some(h) = sim.history().bearing(i) {
                            let series = h.get(frame.field_type);
                            let values: Vec<String> =
                                series.iter().map(|s| format!("{:.3}", s.value)).collect();
                            println!("      {} samples: {}", series.len(), values.join(" "));
                        }
                    }
                }
            }
        }
        Command::Snapshot {
            source,
            bearing,
            width,
            height,
            output,
        } => {
            let scenario = load_scenario(&source)?;
            let sim = simulate(&scenario)?;
            let count = sim.bearings().len();
            let (geometry, display) = sim
                .bearings()
                .get(bearing)
                .zip(sim.frame().bearings.get(bearing))
                .map(|(b, f)| (&b.geometry, &f.display))
                .ok_or(rotor_field_core::FieldError::BearingOutOfRange {
                    index: bearing,
                    count,
                })?;

            rotor_field_presets::snapshot::write_png(geometry, display, width, height, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "scenario": scenario.name,
                    "bearing": bearing,
                    "field": sim.frame().field_type,
                    "legend": sim.frame().legend,
                    "width": width,
                    "height": height,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} bearing {bearing} ({width}x{height}, {} frames) -> {}",
                    scenario.name,
                    scenario.frames,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
