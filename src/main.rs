//! Brickfall entry point
//!
//! Runs the simulation headless: synthetic (or measured) frame times drive
//! the fixed-timestep loop and a draw list is built every frame, standing
//! in for the window and GPU renderer.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use brickfall::platform::Autopilot;
use brickfall::renderer::DrawList;
use brickfall::sim::{Driver, FrameClock};
use brickfall::{BoundaryPolicy, Settings};

#[derive(Debug, Parser)]
#[command(name = "brickfall", version, about = "Headless Breakout simulation")]
struct Args {
    /// Settings JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Outer loop iterations to run
    #[arg(short, long, default_value_t = 3600)]
    frames: u32,

    /// Nominal frame time in milliseconds
    #[arg(long, default_value_t = 16.7)]
    frame_ms: f32,

    /// Random +/- fraction applied to each synthetic frame time
    #[arg(long, default_value_t = 0.0)]
    jitter: f32,

    /// Override the left/right edge policy (bounce or wrap)
    #[arg(long, value_parser = parse_boundary)]
    boundary: Option<BoundaryPolicy>,

    /// Steer the paddle toward the ball
    #[arg(long)]
    autopilot: bool,

    /// Sleep between frames and measure real elapsed time
    #[arg(long)]
    realtime: bool,

    /// Include hitbox outlines in the draw list
    #[arg(long)]
    hitboxes: bool,

    /// Print the final world state as JSON
    #[arg(long)]
    dump: bool,
}

fn parse_boundary(s: &str) -> Result<BoundaryPolicy, String> {
    BoundaryPolicy::from_str(s).ok_or_else(|| format!("unknown boundary policy '{s}'"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut settings =
        Settings::load_or_default(args.config.as_deref()).context("loading settings")?;
    if let Some(boundary) = args.boundary {
        settings.boundary = boundary;
    }
    settings.validate().context("validating settings")?;
    log::info!(
        "Brickfall starting: stage {}x{}, {} Hz, {} edges",
        settings.stage.x,
        settings.stage.y,
        settings.tick_rate_hz,
        settings.boundary.as_str()
    );

    let mut jitter_rng = Pcg32::seed_from_u64(settings.seed);
    let jitter = args.jitter.clamp(0.0, 0.9);
    let frame = Duration::try_from_secs_f32(args.frame_ms / 1000.0)
        .context("frame time must be a non-negative number")?;

    let mut driver = Driver::new(settings);
    let mut pilot = Autopilot::new();
    let mut clock = FrameClock::new();

    let mut ticks = 0u64;
    let mut dropped = 0u64;
    let mut quads = 0usize;
    for n in 0..args.frames {
        let events = if args.autopilot {
            pilot.poll(driver.world())
        } else {
            Vec::new()
        };

        let elapsed = if args.realtime {
            std::thread::sleep(frame);
            clock.poll()
        } else if jitter > 0.0 {
            frame.mul_f32(1.0 + jitter_rng.random_range(-jitter..=jitter))
        } else {
            frame
        };

        let report = driver.frame(elapsed, &events);
        ticks += u64::from(report.ticks);
        dropped += u64::from(report.dropped_ticks);

        // Render once per outer iteration
        let draw = DrawList::build(driver.world(), args.hitboxes);
        quads = draw.len();
        log::trace!(
            "frame {}: {} tick(s), {} quad(s), alpha {:.2}",
            n,
            report.ticks,
            draw.len(),
            driver.alpha()
        );

        if report.quit {
            break;
        }
    }

    let world = driver.world();
    log::info!(
        "Done after {} ticks ({} dropped): round {}, {} blocks broken, {} misses, {} quads in last frame",
        ticks,
        dropped,
        world.round,
        world.stats.blocks_broken,
        world.stats.misses,
        quads
    );

    if args.dump {
        println!("{}", world.snapshot_json().context("serializing world")?);
    }
    Ok(())
}
