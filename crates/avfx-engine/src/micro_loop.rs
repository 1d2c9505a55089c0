//! Audio micro-loop: random playhead jumps at a fixed step.

use avfx_core::Lcg;

/// Decides when and where the looping source jumps.
///
/// Every `step_ms`, with probability `intensity`, the playhead moves to a
/// uniformly random position in `[0, duration)`. The step clock starts on
/// the first call with a non-zero intensity and stops while it is zero.
///
/// # Example
///
/// ```rust
/// use avfx_engine::MicroLoop;
///
/// let mut micro = MicroLoop::new(7);
/// assert_eq!(micro.advance(0.0, 1.0, 100.0, 10.0), None);
/// let jump = micro.advance(100.0, 1.0, 100.0, 10.0).unwrap();
/// assert!((0.0..10.0).contains(&jump));
/// ```
#[derive(Debug, Clone)]
pub struct MicroLoop {
    rng: Lcg,
    last_step_ms: Option<f64>,
}

impl MicroLoop {
    /// Micro-loop drawing from a generator seeded with `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            rng: Lcg::new(seed),
            last_step_ms: None,
        }
    }

    /// Seek target in seconds if a jump fires at `now_ms`.
    pub fn advance(
        &mut self,
        now_ms: f64,
        intensity: f32,
        step_ms: f32,
        duration_sec: f32,
    ) -> Option<f32> {
        if intensity <= 0.0 || !intensity.is_finite() {
            self.last_step_ms = None;
            return None;
        }
        let Some(last) = self.last_step_ms else {
            self.last_step_ms = Some(now_ms);
            return None;
        };
        if now_ms - last < f64::from(step_ms) {
            return None;
        }
        self.last_step_ms = Some(now_ms);
        if self.rng.next_f32() >= intensity {
            return None;
        }
        let position = self.rng.next_f32() * duration_sec.max(0.0);
        tracing::trace!(position, "micro-loop jump");
        Some(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_never_jumps() {
        let mut micro = MicroLoop::new(1);
        for i in 0..100 {
            assert_eq!(micro.advance(f64::from(i) * 100.0, 0.0, 10.0, 5.0), None);
        }
    }

    #[test]
    fn test_full_intensity_jumps_every_step() {
        let mut micro = MicroLoop::new(1);
        micro.advance(0.0, 1.0, 100.0, 5.0);
        let mut jumps = 0;
        for i in 1..=20 {
            // half-step calls never fire
            assert_eq!(micro.advance(f64::from(i) * 100.0 - 50.0, 1.0, 100.0, 5.0), None);
            if let Some(pos) = micro.advance(f64::from(i) * 100.0, 1.0, 100.0, 5.0) {
                assert!((0.0..5.0).contains(&pos));
                jumps += 1;
            }
        }
        assert_eq!(jumps, 20);
    }

    #[test]
    fn test_partial_intensity_is_a_fraction() {
        let mut micro = MicroLoop::new(99);
        micro.advance(0.0, 0.3, 10.0, 5.0);
        let jumps = (1..=2000)
            .filter(|i| micro.advance(f64::from(*i) * 10.0, 0.3, 10.0, 5.0).is_some())
            .count();
        assert!((450..=750).contains(&jumps), "jumps {jumps}");
    }
}
