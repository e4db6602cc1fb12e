mod fantasy;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use ocean_kernel::{EngineConfig, FrameDriver};
use ocean_render::RecordingBackend;
use ocean_tools::{FrameHistory, SceneInspector};
use tracing_subscriber::EnvFilter;

use crate::fantasy::{FantasyWorld, scripted_events};

#[derive(Parser)]
#[command(name = "ocean-cli", about = "Headless driver for the ocean scene runtime")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML engine configuration; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print versions and the effective configuration
    Info,
    /// Drive the demo scene against a recording backend
    Run {
        /// Number of frames to run
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// Fixed frame delta in seconds
        #[arg(short, long, default_value = "0.016")]
        dt: f32,
        /// Print the draw transcript every N frames (0 disables)
        #[arg(short, long, default_value = "0")]
        transcript_every: u64,
        /// Time frames with the wall clock instead of `--dt`
        #[arg(long)]
        realtime: bool,
    },
    /// Print the demo scene contents
    Inspect {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => {
            let config = EngineConfig::load(path)?;
            tracing::info!(path = %path.display(), "loaded config");
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Info => {
            println!("ocean-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", ocean_render::crate_info());
            print!("{}", config.to_yaml_string()?);
        }
        Commands::Run {
            frames,
            dt,
            transcript_every,
            realtime,
        } => {
            let mut world = FantasyWorld::new(&config);
            let mut driver = FrameDriver::new(RecordingBackend::new(), config.frame.max_step);
            let mut history = FrameHistory::new(60);
            driver.enter(&mut world);

            for frame in 1..=frames {
                let events = scripted_events(frame);
                let started = Instant::now();
                if realtime {
                    driver.run_frame(&mut world, &events);
                } else {
                    driver.step(&mut world, dt, &events);
                }
                history.record(started.elapsed(), driver.backend().drawn().count());

                if transcript_every > 0 && frame % transcript_every == 0 {
                    print!("{}", driver.backend().transcript());
                }
                if world.quit_requested() {
                    tracing::info!(frame, "stopping early");
                    break;
                }
            }
            driver.exit(&mut world);

            let stats = history.stats();
            println!("{}", SceneInspector::summary(world.scene()));
            if let Some(body) = world.scene().entity_body(world.player()) {
                let p = body.element.position();
                println!("Player at ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z);
            }
            println!(
                "Frames: {} over {:.2}s simulated",
                driver.frame_count(),
                driver.elapsed()
            );
            println!(
                "Frame cost (last {}): avg={:.3}ms min={:.3}ms max={:.3}ms, {:.1} primitives/frame",
                stats.window, stats.average_ms, stats.min_ms, stats.max_ms, stats.average_drawn
            );
        }
        Commands::Inspect { json } => {
            let world = FantasyWorld::new(&config);
            let summary = SceneInspector::summary(world.scene());
            let elements = SceneInspector::describe_elements(world.scene());
            if json {
                let value = serde_json::json!({
                    "summary": summary,
                    "elements": elements,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{summary}");
                for info in &elements {
                    println!("  {info}");
                }
            }
        }
    }

    Ok(())
}
