//! File-based processing through the audio graph.

use std::path::PathBuf;

use anyhow::Context;
use avfx_core::{Effect, linear_to_db};
use avfx_io::{WavSpec, read_wav, write_wav};
use clap::Args;

use super::common::{EngineOptions, build_engine, peak, progress_bar, rms};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Scene name or TOML file
    #[arg(short, long, value_name = "NAME|FILE")]
    scene: Option<String>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32", value_parser = parse_bit_depth)]
    bit_depth: u16,
}

fn parse_bit_depth(s: &str) -> Result<u16, String> {
    match s.parse::<u16>() {
        Ok(bits @ (16 | 24 | 32)) => Ok(bits),
        _ => Err(format!("invalid bit depth '{s}' (expected 16, 24 or 32)")),
    }
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (samples, spec) =
        read_wav(&args.input).with_context(|| format!("reading {}", args.input.display()))?;
    let sample_rate = spec.sample_rate as f32;

    println!(
        "  {} samples, {} Hz, {:.2}s",
        samples.len(),
        spec.sample_rate,
        spec.duration_sec(samples.len())
    );

    let mut engine = build_engine(&EngineOptions {
        scene: args.scene.as_deref(),
        sample_rate: Some(sample_rate),
        ..EngineOptions::default()
    })?;

    println!(
        "Processing through {} graph node(s)...",
        engine.audio().node_count()
    );

    engine.sync_audio();
    let graph = engine.audio_mut();
    graph.reset();

    let block_size = args.block_size.max(1);
    let pb = progress_bar(samples.len() as u64)?;
    let mut output = vec![0.0; samples.len()];
    for (i, (in_chunk, out_chunk)) in samples
        .chunks(block_size)
        .zip(output.chunks_mut(block_size))
        .enumerate()
    {
        graph.process_block(in_chunk, out_chunk);
        pb.set_position(((i + 1) * block_size).min(samples.len()) as u64);
    }
    pb.finish_with_message("done");

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&samples)),
        linear_to_db(peak(&samples))
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&output)),
        linear_to_db(peak(&output))
    );

    let out_spec = WavSpec {
        channels: 1,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &output, out_spec)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Done!");

    Ok(())
}
