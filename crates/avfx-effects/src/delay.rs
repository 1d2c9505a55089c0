//! Delay line with a feedback tap.
//!
//! ```text
//! out[n] = w[n - D]
//! w[n]   = in[n] + feedback · out[n]
//! ```
//!
//! The node outputs the delayed signal only; a delay time of zero collapses
//! to a single sample of latency. Time and feedback ramp over 50 ms.

use avfx_core::{Effect, InterpolatedDelay, SmoothedParam, clamp01, flush_denormal};

const MAX_DELAY_SECONDS: f32 = 1.0;

/// Feedback delay (0–1 s, feedback 0–1).
///
/// # Example
///
/// ```rust
/// use avfx_core::Effect;
/// use avfx_effects::FeedbackDelay;
///
/// let mut delay = FeedbackDelay::new(1000.0);
/// delay.set_delay_seconds(0.01);
/// delay.reset();
///
/// let first = delay.process(1.0);
/// assert_eq!(first, 0.0);
/// let echoed: Vec<f32> = (0..10).map(|_| delay.process(0.0)).collect();
/// assert!((echoed[9] - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct FeedbackDelay {
    line: InterpolatedDelay,
    delay_seconds: SmoothedParam,
    feedback: SmoothedParam,
    sample_rate: f32,
}

impl FeedbackDelay {
    /// Delay at 0.2 s with no feedback.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            line: InterpolatedDelay::from_time(sample_rate, MAX_DELAY_SECONDS),
            delay_seconds: SmoothedParam::ramp(0.2, sample_rate),
            feedback: SmoothedParam::ramp(0.0, sample_rate),
            sample_rate,
        }
    }

    /// Delay time in seconds (0–1).
    pub fn set_delay_seconds(&mut self, seconds: f32) {
        let seconds = if seconds.is_finite() { seconds } else { 0.0 };
        self.delay_seconds
            .set_target(seconds.clamp(0.0, MAX_DELAY_SECONDS));
    }

    /// Delay time target in seconds.
    pub fn delay_seconds(&self) -> f32 {
        self.delay_seconds.target()
    }

    /// Feedback gain (0–1).
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback.set_target(clamp01(feedback));
    }

    /// Feedback target.
    pub fn feedback(&self) -> f32 {
        self.feedback.target()
    }
}

impl Effect for FeedbackDelay {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let seconds = self.delay_seconds.advance();
        let feedback = self.feedback.advance();

        let delay_samples = (seconds * self.sample_rate).max(1.0);
        let out = self.line.read(delay_samples - 1.0);
        self.line.write(flush_denormal(input + feedback * out));
        out
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.line = InterpolatedDelay::from_time(sample_rate, MAX_DELAY_SECONDS);
        self.delay_seconds.set_sample_rate(sample_rate);
        self.feedback.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.line.clear();
        self.delay_seconds.snap_to_target();
        self.feedback.snap_to_target();
    }

    fn latency_samples(&self) -> usize {
        (self.delay_seconds.target() * self.sample_rate).max(1.0) as usize
    }
}
