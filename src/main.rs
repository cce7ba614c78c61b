//! Headless cart-pole run
//!
//! ```text
//! cartpole-sim [--config FILE] [--duration SECONDS] [--csv FILE]
//! ```
//!
//! Set `RUST_LOG=info` (or `debug`, `trace`) for driver logging. With
//! `--csv`, the last `RECORDER_CAPACITY` ticks of the run are exported.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use cartpole_sim::prelude::*;
use cartpole_sim::utils::constants::RECORDER_CAPACITY;

const USAGE: &str = "usage: cartpole-sim [--config FILE] [--duration SECONDS] [--csv FILE]";

struct Args {
    config: Option<PathBuf>,
    duration: f64,
    csv: Option<PathBuf>,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = Args {
        config: None,
        duration: 10.0,
        csv: None,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--config" => {
                let value = iter.next().context("--config needs a file")?;
                args.config = Some(PathBuf::from(value));
            }
            "--duration" => {
                let value = iter.next().context("--duration needs a value")?;
                args.duration = value
                    .parse()
                    .with_context(|| format!("invalid duration `{}`", value))?;
                if !args.duration.is_finite() || args.duration <= 0.0 {
                    bail!("duration must be positive");
                }
            }
            "--csv" => {
                let value = iter.next().context("--csv needs a file")?;
                args.csv = Some(PathBuf::from(value));
            }
            other => bail!("unknown argument `{}`\n{}", other, USAGE),
        }
    }

    Ok(Some(args))
}

fn main() -> Result<()> {
    env_logger::init();

    let Some(args) = parse_args()? else {
        println!("{}", USAGE);
        return Ok(());
    };

    let config = match &args.config {
        Some(path) => SimulationConfig::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    let frame_dt = config.params.dt * config.substeps as f64;
    let frames = (args.duration / frame_dt).ceil() as usize;
    let print_every = ((0.1 / frame_dt).round() as usize).max(1);

    let mut sim = Simulation::headless(config.clone())?;
    let mut recorder = args
        .csv
        .as_ref()
        .map(|_| Recorder::new(frames.clamp(1, RECORDER_CAPACITY)));

    println!("Cart-Pole PID Simulation");
    println!("========================");
    println!();
    println!(
        "Gains: Kp={}, Ki={}, Kd={}   theta0={}°   dt={} s x {} substeps",
        config.gains.kp,
        config.gains.ki,
        config.gains.kd,
        config.initial_angle_deg,
        config.params.dt,
        config.substeps
    );
    println!();
    println!("{:>10} {:>12} {:>12} {:>12}", "Time", "x [m]", "theta [°]", "Force [N]");
    println!("{:-<10} {:-<12} {:-<12} {:-<12}", "", "", "", "");

    sim.start();
    let mut fired = 0;
    while fired < frames {
        let ran = match recorder.as_mut() {
            Some(recorder) => sim.run_frames(recorder, 1),
            None => sim.run_frames(&mut NullRenderer, 1),
        };
        if ran == 0 {
            break;
        }
        fired += 1;

        if fired % print_every == 0 || sim.status() == RunStatus::Fallen {
            let s = sim.state();
            println!(
                "{:10.3} {:12.4} {:12.3} {:12.3}",
                s.time,
                s.x,
                s.theta.to_degrees(),
                sim.last_force()
            );
        }
    }

    let stats = sim.stats();
    println!();
    println!("Run complete:");
    println!("  Status:          {}", sim.status().as_str());
    if let Some(t) = sim.fall_time() {
        println!("  Fell at:         {:.3} s", t);
    }
    println!("  Simulated time:  {:.3} s", sim.state().time);
    println!("  Ticks / steps:   {} / {}", stats.ticks, stats.steps);
    println!("  Saturated steps: {}", stats.saturated_steps);
    println!("  Wall hits:       {}", stats.wall_hits);
    println!("  Peak |theta|:    {:.3}°", stats.peak_theta.to_degrees());
    println!("  Energy:          {:.6} J", sim.energy());

    if let (Some(path), Some(recorder)) = (&args.csv, &recorder) {
        recorder
            .save(path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!();
        println!(
            "Trajectory written to {} ({} ticks)",
            path.display(),
            recorder.len()
        );
    }

    Ok(())
}
