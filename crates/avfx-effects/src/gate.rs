//! Level-detecting noise gate.
//!
//! An envelope follower meters the input. The gate is open while the metered
//! level is at or above the threshold; the gain then rises to unity within
//! 1 ms. When the level falls below the threshold the gain falls linearly to
//! zero over the release time.
//!
//! [`Gate::state`] exposes the meter for polling by the driver.

use avfx_core::{Effect, EnvelopeFollower};

const ATTACK_MS: f32 = 1.0;
const METER_ATTACK_MS: f32 = 1.0;
const METER_RELEASE_MS: f32 = 50.0;
const MIN_RELEASE_SECONDS: f32 = 0.001;

/// Snapshot of the gate's meter and settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateState {
    /// Metered input level in dB.
    pub level_db: f32,
    /// Open threshold in dB.
    pub threshold_db: f32,
    /// Release time in seconds.
    pub release_sec: f32,
    /// Whether `level_db >= threshold_db`.
    pub open: bool,
}

/// Noise gate.
///
/// # Example
///
/// ```rust
/// use avfx_core::Effect;
/// use avfx_effects::Gate;
///
/// let mut gate = Gate::new(48000.0);
/// gate.set_threshold_db(-20.0);
/// for _ in 0..4800 {
///     gate.process(0.001);
/// }
/// assert!(!gate.state().open);
/// ```
#[derive(Debug, Clone)]
pub struct Gate {
    meter: EnvelopeFollower,
    threshold_db: f32,
    release_sec: f32,
    gain: f32,
    attack_step: f32,
    release_step: f32,
    sample_rate: f32,
}

impl Gate {
    /// Gate at -60 dB threshold with 0.1 s release, starting open.
    pub fn new(sample_rate: f32) -> Self {
        let mut gate = Self {
            meter: EnvelopeFollower::with_times(sample_rate, METER_ATTACK_MS, METER_RELEASE_MS),
            threshold_db: -60.0,
            release_sec: 0.1,
            gain: 1.0,
            attack_step: 0.0,
            release_step: 0.0,
            sample_rate,
        };
        gate.recalculate_steps();
        gate
    }

    /// Open threshold in dB (-100..0).
    pub fn set_threshold_db(&mut self, threshold_db: f32) {
        if threshold_db.is_finite() {
            self.threshold_db = threshold_db.clamp(-100.0, 0.0);
        }
    }

    /// Release time in seconds, at least 1 ms.
    pub fn set_release_sec(&mut self, release_sec: f32) {
        let release = if release_sec.is_finite() {
            release_sec
        } else {
            0.0
        };
        self.release_sec = release.max(MIN_RELEASE_SECONDS);
        self.recalculate_steps();
    }

    /// Current meter reading and open/closed decision.
    pub fn state(&self) -> GateState {
        let level_db = self.meter.level_db();
        GateState {
            level_db,
            threshold_db: self.threshold_db,
            release_sec: self.release_sec,
            open: level_db >= self.threshold_db,
        }
    }

    /// Current gain applied to the signal (0..1).
    pub fn gain(&self) -> f32 {
        self.gain
    }

    fn recalculate_steps(&mut self) {
        let sr = self.sample_rate.max(1.0);
        self.attack_step = 1.0 / (ATTACK_MS / 1000.0 * sr).max(1.0);
        self.release_step = 1.0 / (self.release_sec * sr).max(1.0);
    }
}

impl Effect for Gate {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.meter.process(input);
        if self.meter.level_db() >= self.threshold_db {
            self.gain = (self.gain + self.attack_step).min(1.0);
        } else {
            self.gain = (self.gain - self.release_step).max(0.0);
        }
        input * self.gain
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.meter.set_sample_rate(sample_rate);
        self.recalculate_steps();
    }

    fn reset(&mut self) {
        self.meter.reset();
        self.gain = 1.0;
    }
}
