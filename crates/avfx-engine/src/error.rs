//! Engine error types.
//!
//! Neither error is fatal to the engine: a [`GraphError`] silences one
//! harmonizer voice, a [`TickError`] keeps the previous frame published.

use avfx_effects::PitchShiftError;
use avfx_visual::FrameError;
use thiserror::Error;

/// A harmonizer voice branch could not be built.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The pitch shifter for a voice slot failed to construct.
    #[error("harmonizer voice {slot}: {source}")]
    VoiceConstruction {
        /// Voice slot (0-based).
        slot: usize,
        /// Underlying shifter error.
        #[source]
        source: PitchShiftError,
    },
}

impl GraphError {
    /// Wrap a shifter failure for `slot`.
    pub fn voice(slot: usize, source: PitchShiftError) -> Self {
        Self::VoiceConstruction { slot, source }
    }
}

/// A visual tick failed before publishing.
#[derive(Debug, Error)]
pub enum TickError {
    /// A stage was handed frames of different sizes.
    #[error("visual stage {stage}: {source}")]
    Frame {
        /// Stage that failed.
        stage: &'static str,
        /// Underlying frame error.
        #[source]
        source: FrameError,
    },
}

impl TickError {
    /// Wrap a frame error raised by `stage`.
    pub fn frame(stage: &'static str, source: FrameError) -> Self {
        Self::Frame { stage, source }
    }
}

/// Result alias for visual ticks.
pub type Result<T> = std::result::Result<T, TickError>;
