//! Parameter ramps for the audio graph.
//!
//! Every value the parameter store pushes into a node arrives as a new
//! target, and the node glides there sample by sample. Two shapes exist:
//!
//! - [`SmoothedParam`]: one-pole exponential glide. Retargeting mid-glide is
//!   continuous, so it suits values that change on every control tick
//!   (carrier frequency, delay time, mixes).
//! - [`LinearSmoothedParam`]: constant-rate ramp that lands exactly after the
//!   requested time. Used for master fades and the harmonizer bus.
//!
//! ```rust
//! use avfx_core::SmoothedParam;
//!
//! let mut mix = SmoothedParam::ramp(0.0, 48000.0);
//! mix.set_target(1.0);
//! let first = mix.advance();
//! assert!(first > 0.0 && first < 0.001);
//! ```

use libm::expf;

/// Ramp time used for continuously controlled node parameters, in ms.
pub const PARAM_RAMP_MS: f32 = 50.0;

/// Exponentially smoothed value.
///
/// `time_ms` is the one-pole time constant; zero follows the target at once.
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    value: f32,
    target: f32,
    coeff: f32,
    sample_rate: f32,
    time_ms: f32,
}

impl SmoothedParam {
    /// Smoothed value starting settled at `initial`.
    pub fn with_config(initial: f32, sample_rate: f32, time_ms: f32) -> Self {
        let mut param = Self {
            value: initial,
            target: initial,
            coeff: 1.0,
            sample_rate,
            time_ms,
        };
        param.update_coeff();
        param
    }

    /// Smoothed value with the [`PARAM_RAMP_MS`] time constant.
    pub fn ramp(initial: f32, sample_rate: f32) -> Self {
        Self::with_config(initial, sample_rate, PARAM_RAMP_MS)
    }

    /// Glide towards `target`.
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Change the sample rate, keeping the time constant.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_coeff();
    }

    /// Step one sample and return the new value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.value += self.coeff * (self.target - self.value);
        self.value
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> f32 {
        self.value
    }

    /// Value being approached.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Jump to the target.
    #[inline]
    pub fn snap_to_target(&mut self) {
        self.value = self.target;
    }

    // coeff = 1 - e^(-1 / (tau * fs))
    fn update_coeff(&mut self) {
        let samples = self.time_ms / 1000.0 * self.sample_rate;
        self.coeff = if samples > 0.0 {
            1.0 - expf(-1.0 / samples)
        } else {
            1.0
        };
    }
}

/// Linear ramp with an exact duration.
#[derive(Debug, Clone)]
pub struct LinearSmoothedParam {
    value: f32,
    target: f32,
    step: f32,
    remaining: u32,
    sample_rate: f32,
    time_ms: f32,
}

impl LinearSmoothedParam {
    /// Ramp starting settled at `initial`; later targets take `time_ms`.
    pub fn with_config(initial: f32, sample_rate: f32, time_ms: f32) -> Self {
        Self {
            value: initial,
            target: initial,
            step: 0.0,
            remaining: 0,
            sample_rate,
            time_ms,
        }
    }

    /// Start a ramp of the configured length towards `target`.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
        let samples = (self.time_ms / 1000.0 * self.sample_rate) as u32;
        if samples == 0 {
            self.value = target;
            self.step = 0.0;
            self.remaining = 0;
        } else {
            self.step = (target - self.value) / samples as f32;
            self.remaining = samples;
        }
    }

    /// Ramp to `target` over `time_ms`, replacing any ramp in progress.
    /// The new length also applies to later [`set_target`](Self::set_target) calls.
    pub fn ramp_to(&mut self, target: f32, time_ms: f32) {
        self.time_ms = time_ms.max(0.0);
        self.set_target(target);
    }

    /// Change the sample rate; a running ramp keeps its step.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    /// Step one sample and return the new value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        if self.remaining > 0 {
            self.remaining -= 1;
            self.value = if self.remaining == 0 {
                self.target
            } else {
                self.value + self.step
            };
        }
        self.value
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> f32 {
        self.value
    }

    /// Value being approached.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Whether a ramp is still running.
    #[inline]
    pub fn is_ramping(&self) -> bool {
        self.remaining > 0
    }

    /// Jump to the target, ending any ramp.
    pub fn snap_to_target(&mut self) {
        self.value = self.target;
        self.step = 0.0;
        self.remaining = 0;
    }
}
