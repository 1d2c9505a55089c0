//! Ring modulator node.
//!
//! Amplitude modulation: a carrier oscillator drives the gain of a VCA on
//! the input, and the VCA output is cross-faded against the dry signal.
//!
//! ## Signal Flow
//!
//! ```text
//! carrier ∈ [-1, 1]
//! vca     = (carrier · mix + 1) · 0.5        ∈ [0, 1]
//! output  = dry · (1 - mix) + dry · vca · mix
//! ```
//!
//! `mix` scales both the carrier depth and the cross-fade, so `mix = 0` is an
//! exact bypass. Frequency and mix ramp over 50 ms.

use avfx_core::{Effect, Lfo, SmoothedParam, Waveform};

/// Ramp time for carrier frequency and mix, in milliseconds.
pub const RING_RAMP_MS: f32 = 50.0;

/// Ring modulator.
///
/// # Example
///
/// ```rust
/// use avfx_core::{Effect, Waveform};
/// use avfx_effects::RingMod;
///
/// let mut ring = RingMod::new(48000.0);
/// ring.set_frequency(440.0);
/// ring.set_waveform(Waveform::Square);
/// ring.set_mix(0.0);
/// assert_eq!(ring.process(0.5), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct RingMod {
    carrier: Lfo,
    frequency: SmoothedParam,
    mix: SmoothedParam,
}

impl RingMod {
    /// Ring modulator with a 440 Hz sine carrier and zero mix.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            carrier: Lfo::new(sample_rate, 440.0),
            frequency: SmoothedParam::with_config(440.0, sample_rate, RING_RAMP_MS),
            mix: SmoothedParam::with_config(0.0, sample_rate, RING_RAMP_MS),
        }
    }

    /// Carrier frequency in Hz (1–2000).
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.frequency.set_target(freq_hz.clamp(1.0, 2000.0));
    }

    /// Carrier frequency target.
    pub fn frequency(&self) -> f32 {
        self.frequency.target()
    }

    /// Depth and cross-fade amount (0–1).
    pub fn set_mix(&mut self, mix: f32) {
        self.mix.set_target(avfx_core::clamp01(mix));
    }

    /// Mix target.
    pub fn mix(&self) -> f32 {
        self.mix.target()
    }

    /// Carrier shape. Takes effect immediately.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.carrier.set_waveform(waveform);
    }

    /// Current carrier shape.
    pub fn waveform(&self) -> Waveform {
        self.carrier.waveform()
    }
}

impl Effect for RingMod {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let freq = self.frequency.advance();
        let mix = self.mix.advance();

        self.carrier.set_frequency(freq);
        let carrier = self.carrier.advance();

        if mix == 0.0 {
            return input;
        }
        let vca = (carrier * mix + 1.0) * 0.5;
        input * (1.0 - mix) + input * vca * mix
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.carrier.set_sample_rate(sample_rate);
        self.frequency.set_sample_rate(sample_rate);
        self.mix.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.carrier.reset();
        self.frequency.snap_to_target();
        self.mix.snap_to_target();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_mix_passthrough() {
        let mut ring = RingMod::new(48000.0);
        for i in 0..1000 {
            let x = (i as f32 * 0.01).sin() * 0.5;
            assert_eq!(ring.process(x), x);
        }
    }

    #[test]
    fn test_full_mix_is_vca() {
        let mut ring = RingMod::new(48000.0);
        ring.set_waveform(Waveform::Square);
        ring.set_mix(1.0);
        ring.reset();

        // square carrier = +1 at phase 0: vca = (1 + 1) * 0.5 = 1
        let out = ring.process(0.8);
        assert!((out - 0.8).abs() < 1e-6, "got {out}");

        // half a period later the carrier is -1 and the VCA closes
        ring.set_frequency(1000.0);
        ring.reset();
        for _ in 0..30 {
            ring.process(0.8);
        }
        let out = ring.process(0.8);
        assert!(out.abs() < 1e-6, "got {out}");
    }

    #[test]
    fn test_mix_ramps() {
        let mut ring = RingMod::new(48000.0);
        ring.set_waveform(Waveform::Square);
        ring.set_frequency(1000.0);
        ring.reset();
        for _ in 0..30 {
            ring.process(1.0);
        }
        ring.set_mix(1.0);
        // carrier now negative; a jump to full mix would give 0
        let out = ring.process(1.0);
        assert!(out > 0.95, "mix should ramp, got {out}");
    }

    #[test]
    fn test_output_bounded() {
        let mut ring = RingMod::new(48000.0);
        ring.set_mix(0.7);
        for wave in Waveform::ALL {
            ring.set_waveform(wave);
            for _ in 0..4800 {
                let out = ring.process(1.0);
                assert!((0.0..=1.0 + 1e-6).contains(&out), "{wave:?} gave {out}");
            }
        }
    }
}
