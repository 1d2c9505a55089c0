//! Offline PNG sequence export.

use std::path::PathBuf;

use anyhow::Context;
use avfx_engine::ExportPlan;
use avfx_io::{WavSpec, frame_file_name, save_png, write_wav};
use clap::Args;

use super::common::{EngineOptions, build_engine, progress_bar};

#[derive(Args)]
pub struct RenderArgs {
    /// Output directory for frame_NNNNN.png files
    #[arg(short, long, value_name = "DIR")]
    out: PathBuf,

    /// Base image (falls back to the procedural pattern)
    #[arg(short, long, value_name = "PATH")]
    image: Option<PathBuf>,

    /// Scene name or TOML file
    #[arg(short, long, value_name = "NAME|FILE")]
    scene: Option<String>,

    /// Duration in seconds (1-600)
    #[arg(short, long, default_value = "10")]
    duration: f32,

    /// Frames per second (1-60)
    #[arg(long, default_value = "10")]
    fps: u32,

    /// Render width in pixels
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Render height in pixels
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Looping audio source; bounced through the audio graph to DIR/audio.wav
    #[arg(short, long, value_name = "PATH")]
    audio: Option<PathBuf>,

    /// Seed for the fallback pattern
    #[arg(long)]
    seed: Option<u32>,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let render_size = match (args.width, args.height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => Some((w, h)),
        (Some(_), Some(_)) => anyhow::bail!("--width and --height must be non-zero"),
        _ => None,
    };

    let mut engine = build_engine(&EngineOptions {
        image: args.image.as_deref(),
        audio: args.audio.as_deref(),
        scene: args.scene.as_deref(),
        seed: args.seed,
        render_size,
        sample_rate: None,
    })?;

    let plan = ExportPlan::new(args.duration, args.fps);
    let (w, h) = engine.config().render_size;
    println!(
        "Rendering {} frames ({:.1}s at {} fps, {}x{}) to {}",
        plan.frame_count(),
        plan.duration_sec(),
        plan.fps(),
        w,
        h,
        args.out.display()
    );

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;

    let pb = progress_bar(plan.frame_count() as u64)?;
    for (index, time) in plan.frame_times().enumerate() {
        let frame = engine
            .render_frame(time)
            .with_context(|| format!("rendering frame {index}"))?;
        let path = args.out.join(frame_file_name(index));
        save_png(&path, &frame).with_context(|| format!("writing {}", path.display()))?;
        pb.inc(1);
    }
    pb.finish_with_message("done");

    if args.audio.is_some() {
        let sample_rate = engine.audio().sample_rate();
        let len = (plan.duration_sec() * sample_rate) as usize;
        let mut bounce = vec![0.0; len];
        engine.sync_audio();
        engine.audio_mut().render(&mut bounce);

        let path = args.out.join("audio.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: sample_rate as u32,
            bits_per_sample: 32,
        };
        write_wav(&path, &bounce, spec).with_context(|| format!("writing {}", path.display()))?;
        println!("Audio bounce: {}", path.display());
    }

    println!("Done!");
    Ok(())
}
