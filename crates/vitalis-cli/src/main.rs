//! Vitalis CLI - headless preview of the tab bar and water tank engines.

#![allow(clippy::needless_pass_by_value, clippy::cast_precision_loss)]

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use vitalis_core::{ConfigError, FrameClock, MotionConfig, Rect, RecordingCanvas, Widget};
use vitalis_widgets::{
    BubbleSequencer, TabBar, TabBarPath, TabRoute, WaterTank, WaveEngine, WaveLayer,
};

#[derive(Parser)]
#[command(name = "vitalis")]
#[command(about = "Preview the Vitalis motion engines without a renderer")]
#[command(version)]
struct Cli {
    /// Motion config file (default: ./vitalis.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tab bar outline as an SVG path
    TabPath {
        /// Bar width
        #[arg(short = 'W', long, default_value = "375")]
        width: f32,

        /// Bar height (default: configured height)
        #[arg(short = 'H', long)]
        height: Option<f32>,
    },

    /// Simulate the wave offsets frame by frame
    Wave {
        /// Tile width
        #[arg(short = 'W', long, default_value = "300")]
        width: f32,

        /// Number of frames
        #[arg(short, long, default_value = "10")]
        frames: u32,

        /// Frame interval in milliseconds
        #[arg(long, default_value = "16")]
        dt: f64,

        /// Emit JSON lines instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Simulate one bubble burst frame by frame
    Bubbles {
        /// Number of frames
        #[arg(short, long, default_value = "60")]
        frames: u32,

        /// Frame interval in milliseconds
        #[arg(long, default_value = "16")]
        dt: f64,

        /// Emit JSON lines instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Dump both widgets' draw commands as JSON after running for a while
    Render {
        /// Milliseconds to run before painting
        #[arg(short, long, default_value = "0", value_parser = parse_run_ms)]
        ms: f64,

        /// Screen width
        #[arg(short = 'W', long, default_value = "375")]
        width: f32,

        /// Screen height
        #[arg(short = 'H', long, default_value = "812")]
        height: f32,

        /// Focused tab index
        #[arg(short, long, default_value = "0")]
        active: usize,

        /// Fill percentage
        #[arg(long, default_value = "45")]
        fill: f32,

        /// Trigger the bubble burst at the start
        #[arg(long)]
        bubbles: bool,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print or validate the effective motion config
    Config {
        /// Only validate; print nothing on success
        #[arg(long)]
        check: bool,

        /// Write the effective config to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

/// Longest simulated run the `render` command accepts.
const MAX_RUN_MS: f64 = 600_000.0;

fn parse_run_ms(s: &str) -> Result<f64, String> {
    let ms: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !ms.is_finite() || ms < 0.0 {
        return Err(format!("expected a finite, non-negative duration, got {s}"));
    }
    if ms > MAX_RUN_MS {
        return Err(format!("at most {MAX_RUN_MS} ms can be simulated, got {s}"));
    }
    Ok(ms)
}

#[derive(Debug, Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct WaveSample {
    frame: u32,
    elapsed_ms: f64,
    back: f32,
    front: f32,
}

#[derive(Serialize)]
struct BubbleSample {
    frame: u32,
    elapsed_ms: f64,
    bubbles: Vec<BubbleChannels>,
}

#[derive(Serialize)]
struct BubbleChannels {
    opacity: f64,
    dx: f64,
    dy: f64,
    scale: f64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::TabPath { width, height } => {
            let height = height.unwrap_or(config.tab.height);
            println!("{}", TabBarPath::from(&config.tab).generate(width, height));
        }
        Commands::Wave {
            width,
            frames,
            dt,
            json,
        } => simulate_wave(&config, width, frames, dt, json)?,
        Commands::Bubbles { frames, dt, json } => simulate_bubbles(&config, frames, dt, json)?,
        Commands::Render {
            ms,
            width,
            height,
            active,
            fill,
            bubbles,
            pretty,
        } => {
            let scene = RenderScene {
                ms,
                width,
                height,
                active,
                fill,
                bubbles,
            };
            render(&config, &scene, pretty)?;
        }
        Commands::Config { check, save } => {
            if let Some(path) = save {
                config.save_to_file(&path)?;
                println!("Saved config to {}", path.display());
            } else if check {
                info!("config valid");
            } else {
                print!("{}", config.to_toml()?);
            }
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<MotionConfig, ConfigError> {
    if let Some(path) = path {
        return MotionConfig::load_from_file(path);
    }
    let local = Path::new(MotionConfig::CONFIG_FILE);
    if local.exists() {
        MotionConfig::load_from_file(local)
    } else {
        debug!("no config file, using defaults");
        Ok(MotionConfig::default())
    }
}

fn simulate_wave(
    config: &MotionConfig,
    width: f32,
    frames: u32,
    dt: f64,
    json: bool,
) -> Result<(), CliError> {
    let clock = FrameClock::new();
    let mut wave = WaveEngine::new(clock.clone(), config.wave.clone());
    wave.on_layout(width);
    wave.start();

    if !json {
        println!("{:>6} {:>10} {:>10} {:>10}", "frame", "ms", "back", "front");
    }
    for frame in 1..=frames {
        let time = clock.advance(dt);
        wave.advance(time.delta_ms);
        let sample = WaveSample {
            frame,
            elapsed_ms: time.elapsed_ms,
            back: wave.offset(WaveLayer::Back),
            front: wave.offset(WaveLayer::Front),
        };
        if json {
            println!("{}", serde_json::to_string(&sample)?);
        } else {
            println!(
                "{:>6} {:>10.1} {:>10.3} {:>10.3}",
                sample.frame, sample.elapsed_ms, sample.back, sample.front
            );
        }
    }
    wave.stop();
    Ok(())
}

fn simulate_bubbles(config: &MotionConfig, frames: u32, dt: f64, json: bool) -> Result<(), CliError> {
    let clock = FrameClock::new();
    let mut bubbles = BubbleSequencer::new(clock.clone(), config.bubbles.clone());
    bubbles.trigger();

    for frame in 1..=frames {
        let time = clock.advance(dt);
        let active = bubbles.advance(time.delta_ms);
        let sample = BubbleSample {
            frame,
            elapsed_ms: time.elapsed_ms,
            bubbles: bubbles
                .states()
                .into_iter()
                .map(|s| BubbleChannels {
                    opacity: s.opacity,
                    dx: s.dx,
                    dy: s.dy,
                    scale: s.scale,
                })
                .collect(),
        };
        if json {
            println!("{}", serde_json::to_string(&sample)?);
        } else {
            let cells: Vec<String> = sample
                .bubbles
                .iter()
                .map(|b| format!("o={:.2} x={:+.1} y={:+.1} s={:.2}", b.opacity, b.dx, b.dy, b.scale))
                .collect();
            println!("{:>4} {:>8.1}  {}", frame, sample.elapsed_ms, cells.join(" | "));
        }
        if !active {
            debug!(frame, "bubble burst complete");
            break;
        }
    }
    Ok(())
}

struct RenderScene {
    ms: f64,
    width: f32,
    height: f32,
    active: usize,
    fill: f32,
    bubbles: bool,
}

fn default_routes() -> Vec<TabRoute> {
    ["HydrationTab", "WorkoutTab", "HomeTab", "ProgressTab", "ProfileTab"]
        .iter()
        .map(|name| TabRoute::new(*name, *name))
        .collect()
}

fn render(config: &MotionConfig, scene: &RenderScene, pretty: bool) -> Result<(), CliError> {
    let clock = FrameClock::new();
    let mut bar = TabBar::new(default_routes(), clock.clone())
        .with_config(config.tab.clone())
        .with_palette(config.theme.clone());
    let mut tank = WaterTank::from_config(clock.clone(), config)
        .with_fill_percent(scene.fill)
        .with_display(format!("{:.0}", scene.fill), "%");

    let bar_height = config.tab.height;
    bar.layout(Rect::new(0.0, scene.height - bar_height, scene.width, bar_height));
    let tank_width = (scene.width - 48.0).max(1.0);
    tank.layout(Rect::new(24.0, 96.0, tank_width, (scene.height - bar_height - 192.0).max(1.0)));

    bar.set_active_index(scene.active);
    if scene.bubbles {
        tank.set_animated(true);
    }

    let mut elapsed = 0.0;
    while elapsed < scene.ms {
        let dt = (scene.ms - elapsed).min(16.0);
        let frame = clock.advance(dt);
        bar.tick(frame);
        tank.tick(frame);
        elapsed += dt;
    }
    debug!(frame = clock.now().frame, elapsed, "scene advanced");

    let mut canvas = RecordingCanvas::new();
    tank.paint(&mut canvas);
    bar.paint(&mut canvas);
    let commands = canvas.take_commands();
    let json = if pretty {
        serde_json::to_string_pretty(&commands)?
    } else {
        serde_json::to_string(&commands)?
    };
    println!("{json}");

    tank.unmount();
    bar.unmount();
    Ok(())
}
