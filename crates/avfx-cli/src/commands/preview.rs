//! Headless run of the live scheduler.
//!
//! Drives [`Engine::advance`](avfx_engine::Engine::advance) on a virtual
//! clock, pulls the matching amount of audio through the graph between
//! calls, and writes the last published preview frame.

use std::path::PathBuf;

use anyhow::Context;
use avfx_io::save_png;
use clap::Args;

use super::common::{EngineOptions, build_engine, progress_bar};

#[derive(Args)]
pub struct PreviewArgs {
    /// Output PNG for the last published frame
    #[arg(short, long, value_name = "FILE")]
    out: PathBuf,

    /// Base image (falls back to the procedural pattern)
    #[arg(short, long, value_name = "PATH")]
    image: Option<PathBuf>,

    /// Scene name or TOML file
    #[arg(short, long, value_name = "NAME|FILE")]
    scene: Option<String>,

    /// Looping audio source
    #[arg(short, long, value_name = "PATH")]
    audio: Option<PathBuf>,

    /// Virtual run time in seconds
    #[arg(long, default_value = "2")]
    seconds: f64,

    /// Clock step between advance calls in milliseconds
    #[arg(long, default_value = "50")]
    step_ms: f64,

    /// Seed for jitter, micro-loop jumps and the fallback pattern
    #[arg(long)]
    seed: Option<u32>,
}

pub fn run(args: PreviewArgs) -> anyhow::Result<()> {
    if !(args.step_ms.is_finite() && args.step_ms > 0.0) {
        anyhow::bail!("--step-ms must be positive");
    }
    let seconds = if args.seconds.is_finite() {
        args.seconds.max(0.0)
    } else {
        0.0
    };

    let mut engine = build_engine(&EngineOptions {
        image: args.image.as_deref(),
        audio: args.audio.as_deref(),
        scene: args.scene.as_deref(),
        seed: args.seed,
        ..EngineOptions::default()
    })?;

    let calls = (seconds * 1000.0 / args.step_ms).floor() as u64 + 1;
    let block = (engine.audio().sample_rate() as f64 * args.step_ms / 1000.0) as usize;
    let mut audio = vec![0.0; block];

    let (mut ticks, mut seeks, mut steps) = (0u64, 0u64, 0usize);
    let pb = progress_bar(calls)?;
    for i in 0..calls {
        let report = engine.advance(i as f64 * args.step_ms);
        ticks += u64::from(report.ticked);
        seeks += u64::from(report.seek.is_some());
        steps += report.steps;
        engine.audio_mut().render(&mut audio);
        pb.inc(1);
    }
    pb.finish_with_message("done");

    let gate = engine.gate_state();
    println!("\nRun:");
    println!("  Advance calls:  {calls}");
    println!("  Visual ticks:   {ticks}");
    println!("  Loop jumps:     {seeks}");
    println!("  Sequencer steps: {steps}");
    println!(
        "  Gate:           {:.1} dB ({})",
        gate.level_db,
        if gate.open { "open" } else { "closed" }
    );

    let frame = engine
        .published()
        .context("no frame was published during the run")?;
    save_png(&args.out, frame).with_context(|| format!("writing {}", args.out.display()))?;
    println!("\nWrote {} ({}x{})", args.out.display(), frame.width(), frame.height());

    Ok(())
}
