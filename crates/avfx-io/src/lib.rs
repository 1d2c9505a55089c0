//! Asset I/O for avfx.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`], mixing down to mono
//! - **Base images**: [`load_base_images`] decodes and scales a picture to
//!   the preview and render sizes, falling back to the procedural pattern
//! - **Frame output**: [`save_png`] and [`write_frame_sequence`] for offline export
//! - **Audio sources**: [`load_audio_source`] returns a silent source when the
//!   file cannot be read
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use avfx_engine::{Engine, EngineConfig};
//! use avfx_io::{load_audio_source, load_base_images, save_png};
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! let config = *engine.config();
//! let base = load_base_images(Some("photo.jpg".as_ref()), config.preview_size, config.render_size, config.seed);
//! engine.set_base_images(base.preview, base.render);
//! engine.load_audio(load_audio_source("loop.wav".as_ref(), config.sample_rate));
//!
//! save_png("frame.png", &engine.render_frame(0.0)?)?;
//! ```

mod assets;
mod picture;
mod wav;

pub use assets::{BaseImages, load_audio_source, load_base_images};
pub use picture::{decode_frame, frame_file_name, load_frame, save_png, write_frame_sequence};
pub use wav::{WavSpec, read_wav, write_wav};

/// Error types for asset I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Image decode or encode error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Decoded pixels did not form a valid frame.
    #[error("frame error: {0}")]
    Frame(#[from] avfx_visual::FrameError),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for asset I/O.
pub type Result<T> = std::result::Result<T, Error>;
