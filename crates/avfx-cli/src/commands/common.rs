//! Shared CLI helpers used across multiple commands.

use std::path::Path;

use anyhow::Context;
use avfx_config::{Scene, resolve_scene};
use avfx_engine::{Engine, EngineConfig};
use avfx_io::{load_audio_source, load_base_images};
use indicatif::{ProgressBar, ProgressStyle};

/// Inputs every engine-driving command accepts.
#[derive(Debug, Default)]
pub struct EngineOptions<'a> {
    pub image: Option<&'a Path>,
    pub audio: Option<&'a Path>,
    pub scene: Option<&'a str>,
    pub seed: Option<u32>,
    pub render_size: Option<(u32, u32)>,
    pub sample_rate: Option<f32>,
}

/// Load a scene by factory name, user scene name or path.
pub fn load_scene(name: &str) -> anyhow::Result<Scene> {
    resolve_scene(name).with_context(|| {
        format!("scene '{name}' not found. Use 'avfx scenes' to see available scenes.")
    })
}

/// Build an engine with assets loaded and the scene applied.
///
/// Unreadable assets fall back (pattern image, silent audio) rather than
/// failing; an unknown or invalid scene is an error.
pub fn build_engine(opts: &EngineOptions<'_>) -> anyhow::Result<Engine> {
    let source = opts
        .audio
        .map(|path| load_audio_source(path, EngineConfig::default().sample_rate));

    let mut config = EngineConfig::default();
    if let Some(seed) = opts.seed {
        config.seed = seed;
    }
    if let Some(size) = opts.render_size {
        config.render_size = size;
    }
    if let Some(rate) = opts.sample_rate {
        config.sample_rate = rate;
    } else if let Some(source) = source.as_ref().filter(|s| !s.is_silent()) {
        config.sample_rate = source.sample_rate();
    }

    let mut engine = Engine::new(config);

    if let Some(name) = opts.scene {
        let scene = load_scene(name)?;
        scene
            .apply(&mut engine)
            .with_context(|| format!("applying scene '{}'", scene.name))?;
        if scene.sequencer.is_some() {
            engine.sequencer_mut().play(0.0);
        }
        println!("Scene: {}", scene.name);
    }

    if opts.image.is_some() {
        let base = load_base_images(
            opts.image,
            config.preview_size,
            config.render_size,
            config.seed,
        );
        engine.set_base_images(base.preview, base.render);
    }

    if let Some(source) = source {
        engine.load_audio(source);
    }

    Ok(engine)
}

/// Progress bar in the house style.
pub fn progress_bar(len: u64) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );
    Ok(pb)
}

/// Root-mean-square level.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

/// Absolute peak.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
}
