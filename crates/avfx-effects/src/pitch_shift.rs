//! Delay-line pitch shifter, used for the harmonizer voices.
//!
//! Two taps sweep through a 100 ms window at the rate that produces the
//! requested pitch ratio:
//!
//! ```text
//! phase   += (1 - ratio) / window_samples     (wrapped into [0, 1))
//! delay_k  = phase_k · window_samples          (phase_1 = phase_0 + 0.5)
//! gain_k   = sin²(π · phase_k)
//! ```
//!
//! A tap is silent exactly where its delay jumps, and the two gains sum to
//! one, so the output is click-free and unity gain at `ratio = 1`.
//! Duration is preserved; only pitch changes.

use core::f32::consts::PI;
use core::fmt;

use avfx_core::{Effect, InterpolatedDelay, semitones_to_ratio};
use libm::{floorf, sinf};

/// Crossfade window in seconds.
pub const WINDOW_SECONDS: f32 = 0.1;

/// Largest supported shift in either direction.
pub const MAX_SEMITONES: i32 = 24;

/// Why a pitch shifter could not be built.
#[derive(Debug, Clone, PartialEq)]
pub enum PitchShiftError {
    /// The sample rate was zero, negative or not finite.
    InvalidSampleRate(f32),
    /// The window would not hold a single sample at this rate.
    WindowTooShort(f32),
}

impl fmt::Display for PitchShiftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSampleRate(sr) => write!(f, "invalid sample rate {sr}"),
            Self::WindowTooShort(samples) => {
                write!(f, "pitch window of {samples} samples is too short")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PitchShiftError {}

/// Two-tap crossfading pitch shifter.
///
/// # Example
///
/// ```rust
/// use avfx_core::Effect;
/// use avfx_effects::PitchShifter;
///
/// let mut up_a_fifth = PitchShifter::try_new(48000.0, 7).unwrap();
/// assert_eq!(up_a_fifth.semitones(), 7);
/// assert!(up_a_fifth.process(0.5).is_finite());
///
/// assert!(PitchShifter::try_new(0.0, 7).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PitchShifter {
    line: InterpolatedDelay,
    semitones: i32,
    phase_step: f32,
    phase: f32,
    window_samples: f32,
    sample_rate: f32,
}

impl PitchShifter {
    /// Build a shifter for `semitones` (clamped to ±24).
    pub fn try_new(sample_rate: f32, semitones: i32) -> Result<Self, PitchShiftError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(PitchShiftError::InvalidSampleRate(sample_rate));
        }
        let window_samples = WINDOW_SECONDS * sample_rate;
        if window_samples < 2.0 {
            return Err(PitchShiftError::WindowTooShort(window_samples));
        }

        let mut shifter = Self {
            line: InterpolatedDelay::new(window_samples as usize + 2),
            semitones: 0,
            phase_step: 0.0,
            phase: 0.0,
            window_samples,
            sample_rate,
        };
        shifter.set_semitones(semitones);
        Ok(shifter)
    }

    /// Retune to `semitones` (clamped to ±24). The delay line is kept.
    pub fn set_semitones(&mut self, semitones: i32) {
        self.semitones = semitones.clamp(-MAX_SEMITONES, MAX_SEMITONES);
        let ratio = semitones_to_ratio(self.semitones as f32);
        self.phase_step = (1.0 - ratio) / self.window_samples;
    }

    /// Current shift in semitones.
    pub fn semitones(&self) -> i32 {
        self.semitones
    }

    #[inline]
    fn wrap(phase: f32) -> f32 {
        phase - floorf(phase)
    }
}

impl Effect for PitchShifter {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.line.write(input);

        let phase_a = self.phase;
        let phase_b = Self::wrap(phase_a + 0.5);

        let tap_a = self.line.read(phase_a * self.window_samples);
        let tap_b = self.line.read(phase_b * self.window_samples);

        let gain_a = sinf(PI * phase_a);
        let gain_b = sinf(PI * phase_b);

        self.phase = Self::wrap(self.phase + self.phase_step);

        tap_a * gain_a * gain_a + tap_b * gain_b * gain_b
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return;
        }
        self.sample_rate = sample_rate;
        self.window_samples = (WINDOW_SECONDS * sample_rate).max(2.0);
        self.line = InterpolatedDelay::new(self.window_samples as usize + 2);
        self.set_semitones(self.semitones);
    }

    fn reset(&mut self) {
        self.line.clear();
        self.phase = 0.0;
    }

    fn latency_samples(&self) -> usize {
        (self.window_samples * 0.5) as usize
    }
}
