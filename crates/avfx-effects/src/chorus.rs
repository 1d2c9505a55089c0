//! Two-voice chorus, used as the audio side of the liquid warp.
//!
//! Each voice reads a delay line at
//!
//! ```text
//! delay = base · (1 + depth · lfo)      (at least one sample)
//! ```
//!
//! with the two LFOs 180° apart. The voices are averaged and cross-faded
//! against the dry input by `mix`.

use avfx_core::{Effect, InterpolatedDelay, Lfo, SmoothedParam, clamp01, wet_dry_mix};

/// Longest base delay the node accepts, in milliseconds.
pub const MAX_BASE_DELAY_MS: f32 = 25.0;

const MIX_RAMP_MS: f32 = 50.0;
const RATE_RAMP_MS: f32 = 100.0;

/// Chorus with two counter-phased voices.
///
/// # Example
///
/// ```rust
/// use avfx_core::Effect;
/// use avfx_effects::Chorus;
///
/// let mut chorus = Chorus::new(48000.0);
/// chorus.set_rate(0.5);
/// chorus.set_base_delay_ms(12.0);
/// chorus.set_depth(0.6);
/// chorus.set_mix(1.0);
///
/// let output = chorus.process(0.5);
/// assert!(output.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct Chorus {
    delay1: InterpolatedDelay,
    delay2: InterpolatedDelay,
    lfo1: Lfo,
    lfo2: Lfo,
    rate: SmoothedParam,
    base_delay_ms: SmoothedParam,
    depth: SmoothedParam,
    mix: SmoothedParam,
    sample_rate: f32,
}

impl Chorus {
    /// Chorus at 0.1 Hz, 5 ms base delay, no depth and fully dry.
    pub fn new(sample_rate: f32) -> Self {
        let mut lfo2 = Lfo::new(sample_rate, 0.1);
        lfo2.set_phase(0.5);

        Self {
            delay1: Self::allocate(sample_rate),
            delay2: Self::allocate(sample_rate),
            lfo1: Lfo::new(sample_rate, 0.1),
            lfo2,
            rate: SmoothedParam::with_config(0.1, sample_rate, RATE_RAMP_MS),
            base_delay_ms: SmoothedParam::ramp(5.0, sample_rate),
            depth: SmoothedParam::ramp(0.0, sample_rate),
            mix: SmoothedParam::with_config(0.0, sample_rate, MIX_RAMP_MS),
            sample_rate,
        }
    }

    fn allocate(sample_rate: f32) -> InterpolatedDelay {
        // base · (1 + depth) peaks at twice the base delay
        InterpolatedDelay::from_time(sample_rate, 2.0 * MAX_BASE_DELAY_MS / 1000.0)
    }

    /// LFO rate in Hz (0.01–10).
    pub fn set_rate(&mut self, rate_hz: f32) {
        self.rate.set_target(rate_hz.clamp(0.01, 10.0));
    }

    /// Centre delay in milliseconds (0–25).
    pub fn set_base_delay_ms(&mut self, delay_ms: f32) {
        self.base_delay_ms
            .set_target(delay_ms.clamp(0.0, MAX_BASE_DELAY_MS));
    }

    /// Modulation depth as a fraction of the base delay (0–1).
    pub fn set_depth(&mut self, depth: f32) {
        self.depth.set_target(clamp01(depth));
    }

    /// Wet/dry mix (0–1).
    pub fn set_mix(&mut self, mix: f32) {
        self.mix.set_target(clamp01(mix));
    }

    /// Mix target.
    pub fn mix(&self) -> f32 {
        self.mix.target()
    }
}

impl Effect for Chorus {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let rate = self.rate.advance();
        let base_ms = self.base_delay_ms.advance();
        let depth = self.depth.advance();
        let mix = self.mix.advance();

        self.lfo1.set_frequency(rate);
        self.lfo2.set_frequency(rate);
        let mod1 = self.lfo1.advance();
        let mod2 = self.lfo2.advance();

        let base = base_ms / 1000.0 * self.sample_rate;
        let delay_time1 = (base * (1.0 + depth * mod1)).max(1.0);
        let delay_time2 = (base * (1.0 + depth * mod2)).max(1.0);

        let wet1 = self.delay1.read(delay_time1);
        let wet2 = self.delay2.read(delay_time2);
        self.delay1.write(input);
        self.delay2.write(input);

        let wet = (wet1 + wet2) * 0.5;
        wet_dry_mix(input, wet, mix)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.delay1 = Self::allocate(sample_rate);
        self.delay2 = Self::allocate(sample_rate);
        self.lfo1.set_sample_rate(sample_rate);
        self.lfo2.set_sample_rate(sample_rate);
        self.rate.set_sample_rate(sample_rate);
        self.base_delay_ms.set_sample_rate(sample_rate);
        self.depth.set_sample_rate(sample_rate);
        self.mix.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.delay1.clear();
        self.delay2.clear();
        self.lfo1.reset();
        self.lfo2.set_phase(0.5);
        self.rate.snap_to_target();
        self.base_delay_ms.snap_to_target();
        self.depth.snap_to_target();
        self.mix.snap_to_target();
    }
}
