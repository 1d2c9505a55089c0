//! Asset loading with recoverable fallbacks.
//!
//! A base image that cannot be read is replaced by the procedural block
//! pattern; an audio file that cannot be read becomes a silent source.
//! Both failures are logged and never propagated.

use std::path::Path;

use avfx_core::Lcg;
use avfx_engine::AudioSource;
use avfx_visual::{Frame, block_pattern};

use crate::{load_frame, read_wav};

/// The base image at preview and render resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseImages {
    /// Frame at preview resolution.
    pub preview: Frame,
    /// Frame at render resolution.
    pub render: Frame,
    /// Whether the procedural pattern was used.
    pub fallback: bool,
}

impl BaseImages {
    /// Procedural pattern from `seed`, drawn independently at both sizes.
    pub fn fallback(preview_size: (u32, u32), render_size: (u32, u32), seed: u32) -> Self {
        Self {
            preview: block_pattern(preview_size.0, preview_size.1, &mut Lcg::new(seed)),
            render: block_pattern(render_size.0, render_size.1, &mut Lcg::new(seed)),
            fallback: true,
        }
    }
}

/// Load `path` at both sizes, or draw the fallback pattern from `seed`
/// when no path is given or the file cannot be decoded.
pub fn load_base_images(
    path: Option<&Path>,
    preview_size: (u32, u32),
    render_size: (u32, u32),
    seed: u32,
) -> BaseImages {
    let Some(path) = path else {
        return BaseImages::fallback(preview_size, render_size, seed);
    };

    let loaded = load_frame(path, preview_size.0, preview_size.1).and_then(|preview| {
        load_frame(path, render_size.0, render_size.1).map(|render| (preview, render))
    });
    match loaded {
        Ok((preview, render)) => {
            tracing::info!(path = %path.display(), "base image loaded");
            BaseImages {
                preview,
                render,
                fallback: false,
            }
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "base image unreadable, using fallback pattern");
            BaseImages::fallback(preview_size, render_size, seed)
        }
    }
}

/// Load a WAV file as a looping mono source, or a silent source at
/// `fallback_rate` when it cannot be read.
pub fn load_audio_source(path: &Path, fallback_rate: f32) -> AudioSource {
    match read_wav(path) {
        Ok((samples, spec)) => {
            tracing::info!(
                path = %path.display(),
                sample_rate = spec.sample_rate,
                seconds = spec.duration_sec(samples.len()),
                "audio source loaded"
            );
            AudioSource::new(samples, spec.sample_rate as f32)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "audio source unreadable, staying silent");
            AudioSource::silent(fallback_rate)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{WavSpec, save_png, write_wav};

    #[test]
    fn test_missing_path_uses_fallback() {
        let base = load_base_images(None, (32, 32), (64, 64), 7);
        assert!(base.fallback);
        assert_eq!(base.preview.size(), (32, 32));
        assert_eq!(base.render.size(), (64, 64));
        assert_eq!(base, BaseImages::fallback((32, 32), (64, 64), 7));
    }

    #[test]
    fn test_unreadable_image_uses_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();
        let base = load_base_images(Some(&path), (16, 16), (32, 32), 1);
        assert!(base.fallback);
    }

    #[test]
    fn test_image_loaded_at_both_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("base.png");
        save_png(&path, &Frame::filled(10, 10, [90, 90, 90, 255])).unwrap();

        let base = load_base_images(Some(&path), (4, 4), (8, 8), 1);
        assert!(!base.fallback);
        assert_eq!(base.preview, Frame::filled(4, 4, [90, 90, 90, 255]));
        assert_eq!(base.render, Frame::filled(8, 8, [90, 90, 90, 255]));
    }

    #[test]
    fn test_audio_source_loaded() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let spec = WavSpec {
            sample_rate: 8000,
            ..WavSpec::default()
        };
        write_wav(file.path(), &[0.25; 800], spec).unwrap();

        let source = load_audio_source(file.path(), 48000.0);
        assert!(!source.is_silent());
        assert!((source.duration_sec() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_missing_audio_is_silent() {
        let source = load_audio_source(Path::new("/nonexistent/loop.wav"), 44100.0);
        assert!(source.is_silent());
    }
}
