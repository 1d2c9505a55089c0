//! Deterministic pseudo-random source.

/// Linear congruential generator (Numerical Recipes constants).
///
/// Allocation-free and reproducible from a seed, so a seeded engine run
/// produces the same jitter, micro-loop jumps and noise every time.
///
/// ```rust
/// use avfx_core::Lcg;
///
/// let mut a = Lcg::new(7);
/// let mut b = Lcg::new(7);
/// assert_eq!(a.next_u32(), b.next_u32());
/// let x = a.next_f32();
/// assert!((0.0..1.0).contains(&x));
/// ```
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Generator seeded with `seed`.
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next raw 32-bit state.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }

    /// Uniform value in `[0, 1)` from the upper 16 bits.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 16) as f32 / 65536.0
    }

    /// Uniform value in `[-1, 1)`.
    #[inline]
    pub fn next_bipolar(&mut self) -> f32 {
        self.next_f32() * 2.0 - 1.0
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(12345)
    }
}
