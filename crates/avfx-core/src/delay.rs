//! Circular-buffer delay line with fractional reads.
//!
//! | Node | Delay range | Modulated |
//! |------|-------------|-----------|
//! | Warp chorus | 2-25ms | Yes (LFO) |
//! | Pitch shifter taps | 0-100ms | Yes (ramp) |
//! | Feedback delay | 0-1000ms | No |

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// Variable-length delay line with linear interpolation (heap-allocated).
///
/// The buffer is allocated once at construction and never reallocates, so
/// reads and writes are safe on the audio clock.
///
/// # Example
///
/// ```rust
/// use avfx_core::InterpolatedDelay;
///
/// let mut delay = InterpolatedDelay::from_time(48000.0, 0.05);
/// delay.write(1.0);
/// assert_eq!(delay.read(0.0), 1.0);
/// assert_eq!(delay.read(0.5), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct InterpolatedDelay {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl InterpolatedDelay {
    /// Delay line holding `max_delay_samples` samples (at least one).
    pub fn new(max_delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; max_delay_samples.max(1)],
            write_pos: 0,
        }
    }

    /// Delay line sized from a sample rate and a maximum time in seconds.
    pub fn from_time(sample_rate: f32, max_seconds: f32) -> Self {
        let max_samples = (sample_rate.max(0.0) * max_seconds.max(0.0)) as usize + 1;
        Self::new(max_samples)
    }

    /// Read `delay_samples` behind the most recently written sample.
    ///
    /// Fractional delays interpolate linearly between neighbours. The delay is
    /// clamped to the buffer, so any finite input is safe.
    #[inline]
    pub fn read(&self, delay_samples: f32) -> f32 {
        let len = self.buffer.len();
        let delay = if delay_samples.is_finite() {
            delay_samples.clamp(0.0, (len - 1) as f32)
        } else {
            0.0
        };

        let delay_int = delay as usize;
        let frac = delay - delay_int as f32;

        let read_pos = (self.write_pos + len - delay_int - 1) % len;
        let next_pos = (read_pos + len - 1) % len;
        let a = self.buffer[read_pos];
        let b = self.buffer[next_pos];
        a + (b - a) * frac
    }

    /// Write a sample and advance the write position.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Read then write, the usual per-sample step.
    #[inline]
    pub fn read_write(&mut self, sample: f32, delay_samples: f32) -> f32 {
        let output = self.read(delay_samples);
        self.write(sample);
        output
    }

    /// Zero the buffer.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }

    /// Maximum delay capacity in samples.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}
