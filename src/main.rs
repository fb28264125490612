//! Spirograph command-line host.
//!
//! ```text
//! spirograph animate --count 4 --ticks 2000     # headless animation loop
//! spirograph single --outer 100 --inner 30 --pen 0.5 > curve.csv
//! spirograph circle --radius 50 --x 100 --y 100
//! ```
//!
//! Logging defaults to WARN, INFO for spirograph. Override with `RUST_LOG`.

use std::io::{self, BufWriter, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use spirograph::animation::{AnimationConfig, AnimationCoordinator, Canvas, CurveProcess};
use spirograph::geometry::{Circle, CurveParameters};
use spirograph::math::Point2;
use spirograph::render::{draw_curve, RecordingPen};
use spirograph::sampling::ParameterSampler;

#[derive(Parser)]
#[command(name = "spirograph")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Draws hypotrochoid curves", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Animate randomly generated curves, restarting when all have closed
    Animate {
        /// Number of curves drawn at once
        #[arg(short, long, default_value_t = 4)]
        count: usize,

        /// Canvas width
        #[arg(long, default_value_t = 800)]
        width: u32,

        /// Canvas height
        #[arg(long, default_value_t = 600)]
        height: u32,

        /// Angle step per tick, in degrees
        #[arg(long, default_value_t = 5.0)]
        step: f64,

        /// Delay between ticks, in milliseconds
        #[arg(long, default_value_t = 10)]
        interval_ms: u64,

        /// Seed for reproducible curves
        #[arg(long)]
        seed: Option<u64>,

        /// Stop after this many ticks (runs forever if omitted)
        #[arg(long)]
        ticks: Option<u64>,
    },

    /// Print the full trace of one curve as `x,y` lines
    Single {
        /// Outer radius R
        #[arg(long)]
        outer: u32,

        /// Inner radius r
        #[arg(long)]
        inner: u32,

        /// Pen offset as a fraction of r
        #[arg(long)]
        pen: f64,

        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        x: f64,

        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        y: f64,

        /// Angle step, in degrees
        #[arg(long, default_value_t = 5.0)]
        step: f64,
    },

    /// Print a circle traced at 5 degree steps as `x,y` lines
    Circle {
        #[arg(long)]
        radius: f64,

        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        x: f64,

        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        y: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,spirograph=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Animate {
            count,
            width,
            height,
            step,
            interval_ms,
            seed,
            ticks,
        } => {
            let config = AnimationConfig {
                count,
                canvas: Canvas::new(width, height),
                step_degrees: step,
                tick_interval: Duration::from_millis(interval_ms),
            };
            let sampler = seed.map_or_else(ParameterSampler::<StdRng>::from_entropy, ParameterSampler::seeded);
            cmd_animate(config, sampler, ticks)
        }
        Commands::Single {
            outer,
            inner,
            pen,
            x,
            y,
            step,
        } => {
            let params = CurveParameters::new(outer, inner, pen).with_center(Point2::new(x, y));
            cmd_single(params, step)
        }
        Commands::Circle { radius, x, y } => cmd_circle(Point2::new(x, y), radius),
    }
}

fn cmd_animate(
    config: AnimationConfig,
    sampler: ParameterSampler<StdRng>,
    ticks: Option<u64>,
) -> Result<()> {
    let mut animation = AnimationCoordinator::new(config, sampler, |_| RecordingPen::new())
        .context("failed to set up animation")?;
    for (key, process, _) in animation.iter() {
        let p = process.params();
        info!(?key, outer = p.outer_radius, inner = p.inner_radius, pen = p.pen_ratio, "curve");
    }

    let mut elapsed = 0u64;
    while ticks.map_or(true, |limit| elapsed < limit) {
        let report = animation.tick()?;
        elapsed += 1;
        if report.restarted {
            info!(ticks = elapsed, cycles = animation.cycles(), "drawing restarted");
        }
        let interval = animation.config().tick_interval;
        if !interval.is_zero() {
            thread::sleep(interval);
        }
    }

    for (key, process, pen) in animation.iter() {
        info!(
            ?key,
            state = ?process.state(),
            angle = process.current_angle(),
            segments = pen.segment_count(),
            "final"
        );
    }
    Ok(())
}

fn cmd_single(params: CurveParameters, step: f64) -> Result<()> {
    let process = CurveProcess::with_step(params, step).context("invalid curve parameters")?;
    info!(period_count = process.period_count(), "tracing curve");
    let mut pen = RecordingPen::new();
    process.draw_full(&mut pen);
    write_strokes(&pen)
}

fn cmd_circle(center: Point2, radius: f64) -> Result<()> {
    let circle = Circle::new(center, radius).context("invalid circle")?;
    let mut pen = RecordingPen::new();
    draw_curve(&circle, &mut pen, 5.0, 5.0)?;
    write_strokes(&pen)
}

fn write_strokes(pen: &RecordingPen) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for stroke in pen.strokes() {
        for point in stroke {
            writeln!(out, "{},{}", point.x, point.y)?;
        }
    }
    out.flush()?;
    Ok(())
}
