//! Three-band master EQ.
//!
//! | Band | Shape | Frequency |
//! |------|-------|-----------|
//! | Low | Low shelf | 400 Hz |
//! | Mid | Peaking | 1000 Hz |
//! | High | High shelf | 2500 Hz |
//!
//! Gains are -24..+24 dB and glide over [`PARAM_RAMP_MS`]. Coefficients are
//! recomputed per sample only while a gain is still moving.

use avfx_core::{
    Biquad, Effect, PARAM_RAMP_MS, SmoothedParam, high_shelf_coefficients,
    low_shelf_coefficients, peaking_eq_coefficients,
};

const LOW_HZ: f32 = 400.0;
const MID_HZ: f32 = 1000.0;
const HIGH_HZ: f32 = 2500.0;
const Q: f32 = 0.707;
const MAX_GAIN_DB: f32 = 24.0;
// below this the glide snaps and coefficient updates stop
const SETTLE_DB: f32 = 1e-3;

/// Low shelf, peaking mid and high shelf in series.
///
/// # Example
///
/// ```rust
/// use avfx_core::Effect;
/// use avfx_effects::ThreeBandEq;
///
/// let mut eq = ThreeBandEq::new(48000.0);
/// eq.set_gains(0.0, 0.0, 0.0);
/// assert!((eq.process(0.25) - 0.25).abs() < 1e-5);
/// ```
#[derive(Debug, Clone)]
pub struct ThreeBandEq {
    low: Biquad,
    mid: Biquad,
    high: Biquad,
    gains_db: [SmoothedParam; 3],
    sample_rate: f32,
}

impl ThreeBandEq {
    /// Flat EQ.
    pub fn new(sample_rate: f32) -> Self {
        let mut eq = Self {
            low: Biquad::new(),
            mid: Biquad::new(),
            high: Biquad::new(),
            gains_db: core::array::from_fn(|_| {
                SmoothedParam::with_config(0.0, sample_rate, PARAM_RAMP_MS)
            }),
            sample_rate,
        };
        eq.update_coefficients();
        eq
    }

    /// Set the three band gain targets in dB, each clamped to ±24.
    pub fn set_gains(&mut self, low_db: f32, mid_db: f32, high_db: f32) {
        let clamp = |g: f32| {
            if g.is_finite() {
                g.clamp(-MAX_GAIN_DB, MAX_GAIN_DB)
            } else {
                0.0
            }
        };
        for (gain, db) in self.gains_db.iter_mut().zip([low_db, mid_db, high_db]) {
            gain.set_target(clamp(db));
        }
    }

    /// Band gain targets `[low, mid, high]` in dB.
    pub fn gains_db(&self) -> [f32; 3] {
        core::array::from_fn(|i| self.gains_db[i].target())
    }

    /// Band gains `[low, mid, high]` currently applied, in dB.
    pub fn current_gains_db(&self) -> [f32; 3] {
        core::array::from_fn(|i| self.gains_db[i].get())
    }

    fn advance_gains(&mut self) {
        let mut moving = false;
        for gain in &mut self.gains_db {
            if gain.get() == gain.target() {
                continue;
            }
            gain.advance();
            if (gain.get() - gain.target()).abs() < SETTLE_DB {
                gain.snap_to_target();
            }
            moving = true;
        }
        if moving {
            self.update_coefficients();
        }
    }

    fn update_coefficients(&mut self) {
        let [low, mid, high] = self.current_gains_db();
        let sr = self.sample_rate;
        self.low
            .set_coefficients(low_shelf_coefficients(LOW_HZ, Q, low, sr));
        self.mid
            .set_coefficients(peaking_eq_coefficients(MID_HZ, Q, mid, sr));
        self.high
            .set_coefficients(high_shelf_coefficients(HIGH_HZ, Q, high, sr));
    }
}

impl Effect for ThreeBandEq {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.advance_gains();
        let x = self.low.process(input);
        let x = self.mid.process(x);
        self.high.process(x)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        for gain in &mut self.gains_db {
            gain.set_sample_rate(sample_rate);
        }
        self.update_coefficients();
    }

    fn reset(&mut self) {
        self.low.clear();
        self.mid.clear();
        self.high.clear();
        for gain in &mut self.gains_db {
            gain.snap_to_target();
        }
        self.update_coefficients();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::PI;

    fn steady_gain(eq: &mut ThreeBandEq, freq: f32) -> f32 {
        eq.reset();
        let sr = 48000.0;
        let mut peak = 0.0_f32;
        for i in 0..48000 {
            let y = eq.process((2.0 * PI * freq * i as f32 / sr).sin());
            if i > 24000 {
                peak = peak.max(y.abs());
            }
        }
        peak
    }

    #[test]
    fn test_flat_is_transparent() {
        let mut eq = ThreeBandEq::new(48000.0);
        for freq in [60.0, 1000.0, 8000.0] {
            let g = steady_gain(&mut eq, freq);
            assert!((g - 1.0).abs() < 0.02, "{freq} Hz gain {g}");
        }
    }

    #[test]
    fn test_low_cut() {
        let mut eq = ThreeBandEq::new(48000.0);
        eq.set_gains(-24.0, 0.0, 0.0);
        assert!(steady_gain(&mut eq, 50.0) < 0.15);
        assert!(steady_gain(&mut eq, 8000.0) > 0.9);
    }

    #[test]
    fn test_gains_clamped() {
        let mut eq = ThreeBandEq::new(48000.0);
        eq.set_gains(-99.0, f32::NAN, 99.0);
        assert_eq!(eq.gains_db(), [-24.0, 0.0, 24.0]);
        assert_eq!(eq.current_gains_db(), [0.0; 3]);
    }

    #[test]
    fn test_gain_step_glides() {
        let sr = 48000.0;
        let sine = |i: usize| 0.1 * (2.0 * PI * 1000.0 * i as f32 / sr).sin();
        let mut eq = ThreeBandEq::new(sr);
        for i in 0..4800 {
            eq.process(sine(i));
        }

        eq.set_gains(0.0, 24.0, 0.0);
        let mut early = 0.0_f32;
        for i in 4800..4848 {
            early = early.max(eq.process(sine(i)).abs());
        }
        // +24 dB settles near 1.58; 1 ms in, the mid gain has barely moved
        assert!(early < 0.2, "peak 1 ms after the step {early}");
        assert!(eq.current_gains_db()[1] < 1.0);

        let mut settled = 0.0_f32;
        for i in 4848..48000 {
            let y = eq.process(sine(i));
            if i > 43200 {
                settled = settled.max(y.abs());
            }
        }
        assert!(settled > 1.2, "settled peak {settled}");
        assert_eq!(eq.current_gains_db(), [0.0, 24.0, 0.0]);
    }
}
