//! RGBA pixel buffer shared by every pixel op.

use thiserror::Error;

/// Errors from constructing or combining frames.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Pixel buffer length does not match `width * height * 4`.
    #[error("pixel buffer holds {actual} bytes, {width}x{height} RGBA needs {expected}")]
    BufferSize {
        /// Frame width
        width: u32,
        /// Frame height
        height: u32,
        /// Required byte length
        expected: usize,
        /// Supplied byte length
        actual: usize,
    },

    /// Two frames combined by one op have different sizes.
    #[error("frame size mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        /// Width of the first frame
        left_width: u32,
        /// Height of the first frame
        left_height: u32,
        /// Width of the second frame
        right_width: u32,
        /// Height of the second frame
        right_height: u32,
    },

    /// `width * height * 4` does not fit in memory.
    #[error("frame of {width}x{height} is too large")]
    TooLarge {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
}

/// Convenience alias for frame results.
pub type Result<T> = std::result::Result<T, FrameError>;

/// An RGBA8 image, row-major, four bytes per pixel.
///
/// Ops never mutate their input frames; each returns a new `Frame`.
///
/// ```rust
/// use avfx_visual::Frame;
///
/// let gray = Frame::filled(4, 4, [128, 128, 128, 255]);
/// assert_eq!(gray.pixel(3, 3), [128, 128, 128, 255]);
/// assert_eq!(gray.pixels().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

fn byte_len(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or(FrameError::TooLarge { width, height })
}

impl Frame {
    /// Transparent black frame.
    ///
    /// Sizes whose byte length overflows `usize` produce an empty frame.
    pub fn new(width: u32, height: u32) -> Self {
        match byte_len(width, height) {
            Ok(len) => Self {
                width,
                height,
                pixels: vec![0; len],
            },
            Err(_) => Self {
                width: 0,
                height: 0,
                pixels: Vec::new(),
            },
        }
    }

    /// Frame with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut frame = Self::new(width, height);
        for px in frame.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
        frame
    }

    /// Wrap an existing RGBA buffer.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height)?;
        if pixels.len() != expected {
            return Err(FrameError::BufferSize {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGBA bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the frame, returning its RGBA bytes.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// True when the frame holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at `(x, y)`, clamped to the frame. An empty frame reads as
    /// transparent black.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if self.is_empty() {
            return [0; 4];
        }
        let i = self.index(x.min(self.width - 1), y.min(self.height - 1));
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Fail unless `other` has the same size.
    pub fn check_same_size(&self, other: &Frame) -> Result<()> {
        if self.size() == other.size() {
            Ok(())
        } else {
            Err(FrameError::DimensionMismatch {
                left_width: self.width,
                left_height: self.height,
                right_width: other.width,
                right_height: other.height,
            })
        }
    }

    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Blank frame of the same size.
    pub(crate) fn blank_like(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: vec![0; self.pixels.len()],
        }
    }
}

/// Round and clamp a channel value into a byte.
#[inline]
pub(crate) fn to_u8(v: f32) -> u8 {
    if v.is_nan() {
        0
    } else {
        (v + 0.5).clamp(0.0, 255.0) as u8
    }
}
