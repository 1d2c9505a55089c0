//! avfx Visual - pixel operations for the avfx visual pipeline
//!
//! Every op takes one or two [`Frame`]s plus scalar settings and returns a
//! new `Frame` of the same size; inputs are never mutated, so a frame can
//! be the current input and the retained feedback frame at once.
//!
//! # Operations
//!
//! - [`blend`] - Linear interpolation of two frames, alpha opaque
//! - [`shift`] - Circular horizontal roll
//! - [`edge_detect`] - Sobel gradient magnitude as a grayscale map
//! - [`pixelate`] - Nearest-neighbour mosaic
//! - [`posterize`] - Per-channel quantization with optional hash dither
//! - [`fractal_warp`] - fBm domain warp
//! - [`ring_visual`] - Per-row brightness oscillation
//! - [`harmonizer_overlay`] - Additive per-voice colour patterns
//! - [`global_adjust`] - Contrast, gamma and threshold
//!
//! [`block_pattern`] draws the procedural fallback base image.
//!
//! All ops are total: coordinates are clamped and non-finite settings fall
//! back to their neutral value.
//!
//! ## Example
//!
//! ```rust
//! use avfx_visual::{Frame, blend, pixelate};
//!
//! let gray = Frame::filled(4, 4, [128, 128, 128, 255]);
//! let mosaic = pixelate(&gray, 2.0);
//! assert_eq!(blend(&gray, &mosaic, 1.0).unwrap(), gray);
//! ```

pub mod adjust;
pub mod blend;
pub mod edge;
pub mod fallback;
pub mod frame;
pub mod noise;
pub mod overlay;
pub mod pixelate;
pub mod posterize;
pub mod ring;
pub mod shift;
pub mod warp;

pub use adjust::{GlobalAdjust, global_adjust};
pub use blend::blend;
pub use edge::edge_detect;
pub use fallback::block_pattern;
pub use frame::{Frame, FrameError};
pub use overlay::{OverlayVoice, VOICE_COLOURS, harmonizer_overlay};
pub use pixelate::pixelate;
pub use posterize::{Posterize, posterize};
pub use ring::{RingVisual, ring_visual};
pub use shift::shift;
pub use warp::fractal_warp;
