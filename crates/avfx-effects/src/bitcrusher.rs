//! Bit depth reduction.
//!
//! With `B` bits the amplitude axis is quantized in steps of `2^-(B-1)`,
//! rounding to the nearest step:
//!
//! ```text
//! step      = 0.5^(B - 1)
//! quantized = step · floor(x / step + 0.5)
//! ```
//!
//! At 16 bits the error is inaudible; at 1 bit the signal collapses to the
//! three values -1, 0 and 1.

use avfx_core::Effect;
use libm::{floorf, powf};

/// Bit depth reducer (1–16 bits).
///
/// # Example
///
/// ```rust
/// use avfx_core::Effect;
/// use avfx_effects::Bitcrusher;
///
/// let mut crusher = Bitcrusher::new(48000.0);
/// crusher.set_bits(2);
/// assert_eq!(crusher.process(0.3), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct Bitcrusher {
    bits: u8,
    step: f32,
}

impl Bitcrusher {
    /// Crusher at 16 bits.
    pub fn new(_sample_rate: f32) -> Self {
        let mut crusher = Self { bits: 16, step: 0.0 };
        crusher.set_bits(16);
        crusher
    }

    /// Set bit depth, clamped to 1..=16.
    pub fn set_bits(&mut self, bits: u8) {
        self.bits = bits.clamp(1, 16);
        self.step = powf(0.5, f32::from(self.bits - 1));
    }

    /// Current bit depth.
    pub fn bits(&self) -> u8 {
        self.bits
    }
}

impl Effect for Bitcrusher {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        if !input.is_finite() {
            return 0.0;
        }
        self.step * floorf(input / self.step + 0.5)
    }

    fn set_sample_rate(&mut self, _sample_rate: f32) {}

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixteen_bits_nearly_transparent() {
        let mut crusher = Bitcrusher::new(48000.0);
        for i in 0..100 {
            let x = i as f32 / 100.0 - 0.5;
            assert!((crusher.process(x) - x).abs() < 1.0 / 32768.0);
        }
    }

    #[test]
    fn test_one_bit_levels() {
        let mut crusher = Bitcrusher::new(48000.0);
        crusher.set_bits(1);
        assert_eq!(crusher.process(0.7), 1.0);
        assert_eq!(crusher.process(0.2), 0.0);
        assert_eq!(crusher.process(-0.8), -1.0);
    }

    #[test]
    fn test_bits_clamped() {
        let mut crusher = Bitcrusher::new(48000.0);
        crusher.set_bits(0);
        assert_eq!(crusher.bits(), 1);
        crusher.set_bits(40);
        assert_eq!(crusher.bits(), 16);
    }

    #[test]
    fn test_quantization_idempotent() {
        let mut crusher = Bitcrusher::new(48000.0);
        crusher.set_bits(4);
        for i in 0..50 {
            let x = i as f32 / 25.0 - 1.0;
            let once = crusher.process(x);
            assert_eq!(crusher.process(once), once);
        }
    }
}
