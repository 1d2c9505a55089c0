//! Oscillator shapes shared by the audio carrier and the ring visual, and a
//! phase-accumulating [`Lfo`] built on them.

use core::f32::consts::PI;
use libm::{floorf, sinf};

use crate::Lcg;

/// Periodic (or noise) waveform.
///
/// The same set drives the ring modulator's carrier and the per-row
/// brightness oscillator of the ring visual.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Waveform {
    /// Sine
    #[default]
    Sine,
    /// Square, high for the first half of the period
    Square,
    /// Rising ramp
    Saw,
    /// Triangle starting at -1
    Triangle,
    /// White noise
    Noise,
}

impl Waveform {
    /// Every waveform, in display order.
    pub const ALL: [Waveform; 5] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Saw,
        Waveform::Triangle,
        Waveform::Noise,
    ];

    /// Stable lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Saw => "saw",
            Waveform::Triangle => "triangle",
            Waveform::Noise => "noise",
        }
    }

    /// Parse a name. Accepts the short forms `tri`, `sq` and `sawtooth`.
    pub fn from_name(name: &str) -> Option<Self> {
        const ALIASES: [(&str, Waveform); 9] = [
            ("sine", Waveform::Sine),
            ("sin", Waveform::Sine),
            ("square", Waveform::Square),
            ("sq", Waveform::Square),
            ("saw", Waveform::Saw),
            ("sawtooth", Waveform::Saw),
            ("triangle", Waveform::Triangle),
            ("tri", Waveform::Triangle),
            ("noise", Waveform::Noise),
        ];
        let name = name.trim();
        ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
            .map(|&(_, wave)| wave)
    }

    /// Value in `[-1, 1]` at `phase` (cycles, `[0, 1)`).
    ///
    /// `noise` is the bipolar sample used when the waveform is
    /// [`Waveform::Noise`]; the periodic shapes ignore it.
    #[inline]
    pub fn sample(self, phase: f32, noise: f32) -> f32 {
        match self {
            Waveform::Sine => sinf(phase * 2.0 * PI),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Saw => phase * 2.0 - 1.0,
            Waveform::Triangle => {
                if phase < 0.5 {
                    phase * 4.0 - 1.0
                } else {
                    3.0 - 4.0 * phase
                }
            }
            Waveform::Noise => noise.clamp(-1.0, 1.0),
        }
    }
}

/// Low frequency oscillator.
///
/// Phase accumulation at `freq / sample_rate` cycles per sample. Noise draws
/// a fresh value from an internal [`Lcg`] every sample.
///
/// # Example
///
/// ```rust
/// use avfx_core::{Lfo, Waveform};
///
/// let mut lfo = Lfo::new(48000.0, 2.0);
/// lfo.set_waveform(Waveform::Triangle);
/// let value = lfo.advance();
/// assert!((-1.0..=1.0).contains(&value));
/// ```
#[derive(Debug, Clone)]
pub struct Lfo {
    /// Current phase position [0.0, 1.0)
    phase: f32,
    phase_inc: f32,
    sample_rate: f32,
    waveform: Waveform,
    rng: Lcg,
}

impl Default for Lfo {
    fn default() -> Self {
        Self::new(48000.0, 1.0)
    }
}

impl Lfo {
    /// LFO at `freq_hz`.
    pub fn new(sample_rate: f32, freq_hz: f32) -> Self {
        let sample_rate = sample_rate.max(1.0);
        Self {
            phase: 0.0,
            phase_inc: freq_hz / sample_rate,
            sample_rate,
            waveform: Waveform::Sine,
            rng: Lcg::default(),
        }
    }

    /// Set frequency in Hz.
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.phase_inc = if freq_hz.is_finite() {
            freq_hz / self.sample_rate
        } else {
            0.0
        };
    }

    /// Current frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.phase_inc * self.sample_rate
    }

    /// Set waveform.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    /// Current waveform.
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Reset phase to 0.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Set the phase (wrapped into `[0, 1)`). 0.5 is a 180° offset.
    pub fn set_phase(&mut self, phase: f32) {
        self.phase = if phase.is_finite() {
            phase - floorf(phase)
        } else {
            0.0
        };
    }

    /// Current phase.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Next value in `[-1, 1]`.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        let noise = if self.waveform == Waveform::Noise {
            self.rng.next_bipolar()
        } else {
            0.0
        };
        let output = self.waveform.sample(self.phase, noise);

        self.phase += self.phase_inc;
        if !(0.0..1.0).contains(&self.phase) {
            self.phase -= floorf(self.phase);
        }

        output
    }

    /// Next value mapped to `[0, 1]`.
    #[inline]
    pub fn advance_unipolar(&mut self) -> f32 {
        (self.advance() + 1.0) * 0.5
    }

    /// Set sample rate, keeping the frequency.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        let freq = self.frequency();
        self.sample_rate = sample_rate.max(1.0);
        self.set_frequency(freq);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lfo_phase_accumulation() {
        let mut lfo = Lfo::new(44100.0, 1.0);
        for _ in 0..44100 {
            lfo.advance();
        }
        let phase_error = lfo.phase().min((lfo.phase() - 1.0).abs());
        assert!(phase_error < 0.01);
    }

    #[test]
    fn test_lfo_output_range() {
        let mut lfo = Lfo::new(44100.0, 5.0);
        for waveform in Waveform::ALL {
            lfo.set_waveform(waveform);
            for _ in 0..10_000 {
                let v = lfo.advance();
                assert!((-1.0..=1.0).contains(&v), "{waveform:?} produced {v}");
            }
        }
    }

    #[test]
    fn test_shape_values() {
        assert_eq!(Waveform::Square.sample(0.25, 0.0), 1.0);
        assert_eq!(Waveform::Square.sample(0.75, 0.0), -1.0);
        assert_eq!(Waveform::Saw.sample(0.0, 0.0), -1.0);
        assert_eq!(Waveform::Triangle.sample(0.0, 0.0), -1.0);
        assert_eq!(Waveform::Triangle.sample(0.25, 0.0), 0.0);
        assert!(Waveform::Sine.sample(0.0, 0.9).abs() < 1e-6);
        assert_eq!(Waveform::Noise.sample(0.3, 0.4), 0.4);
    }

    #[test]
    fn test_names_roundtrip() {
        for waveform in Waveform::ALL {
            assert_eq!(Waveform::from_name(waveform.name()), Some(waveform));
        }
        assert_eq!(Waveform::from_name("tri"), Some(Waveform::Triangle));
        assert_eq!(Waveform::from_name("sawtooth"), Some(Waveform::Saw));
        assert_eq!(Waveform::from_name("pulse"), None);
    }

    #[test]
    fn test_phase_offset() {
        let mut lfo = Lfo::new(48000.0, 1.0);
        lfo.set_phase(1.5);
        assert!((lfo.phase() - 0.5).abs() < 1e-6);
    }
}
