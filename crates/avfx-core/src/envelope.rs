//! Envelope follower for tracking signal amplitude.
//!
//! Drives the gate's level meter.

use libm::expf;

/// Peak envelope follower with separate attack and release times.
///
/// # Example
///
/// ```rust
/// use avfx_core::EnvelopeFollower;
///
/// let mut env = EnvelopeFollower::with_times(48000.0, 1.0, 100.0);
/// for _ in 0..4800 {
///     env.process(0.5);
/// }
/// assert!((env.level() - 0.5).abs() < 0.01);
/// assert!((env.level_db() - (-6.02)).abs() < 0.2);
/// ```
#[derive(Debug, Clone)]
pub struct EnvelopeFollower {
    envelope: f32,
    attack_coeff: f32,
    release_coeff: f32,
    sample_rate: f32,
    attack_ms: f32,
    release_ms: f32,
}

impl EnvelopeFollower {
    /// Follower with 10ms attack and 100ms release.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_times(sample_rate, 10.0, 100.0)
    }

    /// Follower with explicit attack and release times.
    pub fn with_times(sample_rate: f32, attack_ms: f32, release_ms: f32) -> Self {
        let mut follower = Self {
            envelope: 0.0,
            attack_coeff: 0.0,
            release_coeff: 0.0,
            sample_rate,
            attack_ms: attack_ms.max(0.1),
            release_ms: release_ms.max(1.0),
        };
        follower.recalculate_coefficients();
        follower
    }

    /// Set the attack time in milliseconds (minimum 0.1).
    pub fn set_attack_ms(&mut self, attack_ms: f32) {
        self.attack_ms = attack_ms.max(0.1);
        self.recalculate_coefficients();
    }

    /// Set the release time in milliseconds (minimum 1).
    pub fn set_release_ms(&mut self, release_ms: f32) {
        self.release_ms = release_ms.max(1.0);
        self.recalculate_coefficients();
    }

    /// Update sample rate and recalculate coefficients.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coefficients();
    }

    /// Process a sample and return the envelope level (linear, non-negative).
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let input_abs = if input.is_finite() { input.abs() } else { 0.0 };

        let coeff = if input_abs > self.envelope {
            self.attack_coeff
        } else {
            self.release_coeff
        };

        self.envelope = crate::flush_denormal(coeff * self.envelope + (1.0 - coeff) * input_abs);
        self.envelope
    }

    /// Current envelope level without processing new input.
    pub fn level(&self) -> f32 {
        self.envelope
    }

    /// Current envelope level in dB (floored at -200 dB).
    pub fn level_db(&self) -> f32 {
        crate::linear_to_db(self.envelope)
    }

    /// Reset the envelope to zero.
    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }

    fn recalculate_coefficients(&mut self) {
        // coeff = exp(-1 / (time_ms * sample_rate / 1000))
        let sr = self.sample_rate.max(1.0);
        self.attack_coeff = expf(-1.0 / (self.attack_ms * sr / 1000.0));
        self.release_coeff = expf(-1.0 / (self.release_ms * sr / 1000.0));
    }
}

impl Default for EnvelopeFollower {
    fn default() -> Self {
        Self::new(48000.0)
    }
}
