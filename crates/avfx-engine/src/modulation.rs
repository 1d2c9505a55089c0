//! Single-LFO modulation of one chosen parameter.
//!
//! ```text
//! osc = (sin(2π · rate · t) · 0.5 + 0.5) · depth      ∈ [0, depth]
//! ```
//!
//! Once per tick the oscillator value is mapped into the target's range
//! and written through the store. Nothing is written while the depth is
//! zero or the target is [`LfoTarget::None`].

use core::f32::consts::PI;
use core::fmt;

use crate::params::{ParamId, ParamStore};

/// Parameter the LFO drives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LfoTarget {
    /// Modulation off
    #[default]
    None,
    /// Ring carrier frequency, `1 + osc · 2000` Hz
    RingFreq,
    /// Pixel cell size, `round(1 + osc · 127)`
    PixelSize,
    /// Delay time, `osc` seconds
    DelayTime,
    /// Feedback amount, `osc`
    Feedback,
    /// Master volume, `-40 + osc · 40` dB
    Volume,
}

impl LfoTarget {
    /// Every target, `None` first.
    pub const ALL: [LfoTarget; 6] = [
        LfoTarget::None,
        LfoTarget::RingFreq,
        LfoTarget::PixelSize,
        LfoTarget::DelayTime,
        LfoTarget::Feedback,
        LfoTarget::Volume,
    ];

    /// Stable name.
    pub const fn as_str(self) -> &'static str {
        match self {
            LfoTarget::None => "none",
            LfoTarget::RingFreq => "ring_freq",
            LfoTarget::PixelSize => "pixel_size",
            LfoTarget::DelayTime => "delay_time",
            LfoTarget::Feedback => "feedback",
            LfoTarget::Volume => "volume",
        }
    }

    /// Parse a target name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
    }

    /// Parameter written for this target.
    pub const fn param(self) -> Option<ParamId> {
        match self {
            LfoTarget::None => None,
            LfoTarget::RingFreq => Some(ParamId::RingFreq),
            LfoTarget::PixelSize => Some(ParamId::PixelSize),
            LfoTarget::DelayTime => Some(ParamId::DelayTime),
            LfoTarget::Feedback => Some(ParamId::Feedback),
            LfoTarget::Volume => Some(ParamId::Volume),
        }
    }

    /// Map an oscillator value in `[0, 1]` into this target's units.
    pub fn map(self, osc: f32) -> f32 {
        match self {
            LfoTarget::None => 0.0,
            LfoTarget::RingFreq => (1.0 + osc * 2000.0).clamp(1.0, 2000.0),
            LfoTarget::PixelSize => (1.0 + osc * 127.0).round().clamp(1.0, 128.0),
            LfoTarget::DelayTime | LfoTarget::Feedback => avfx_core::clamp01(osc),
            LfoTarget::Volume => -40.0 + osc * 40.0,
        }
    }
}

impl fmt::Display for LfoTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The modulation engine.
///
/// Stateless apart from configuration read from the store, so the same
/// `time` always yields the same write.
///
/// # Example
///
/// ```rust
/// use avfx_engine::{LfoTarget, ModulationEngine, ParamId, ParamStore};
///
/// let mut store = ParamStore::new();
/// store.set_lfo_target(LfoTarget::Feedback);
/// store.set(ParamId::LfoDepth, 1.0);
/// store.set(ParamId::LfoRate, 1.0);
///
/// // a quarter period in: sin = 1, osc = 1
/// let write = ModulationEngine.apply(&mut store, 0.25);
/// assert_eq!(write, Some((ParamId::Feedback, 1.0)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ModulationEngine;

impl ModulationEngine {
    /// Oscillator value at `time_sec`.
    pub fn oscillator(rate_hz: f32, depth: f32, time_sec: f64) -> f32 {
        // phase in f64 so long-running sessions keep their resolution
        let cycles = (f64::from(rate_hz) * time_sec).fract() as f32;
        ((2.0 * PI * cycles).sin() * 0.5 + 0.5) * depth
    }

    /// Write the modulated value into the store.
    ///
    /// Returns the parameter and the value actually stored, or `None` when
    /// modulation is off.
    pub fn apply(&self, store: &mut ParamStore, time_sec: f64) -> Option<(ParamId, f32)> {
        let target = store.lfo_target();
        let depth = store.get(ParamId::LfoDepth);
        if depth == 0.0 {
            return None;
        }
        let param = target.param()?;
        let osc = Self::oscillator(store.get(ParamId::LfoRate), depth, time_sec);
        let stored = store.set(param, target.map(osc));
        Some((param, stored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mappings() {
        assert_eq!(LfoTarget::RingFreq.map(0.0), 1.0);
        assert_eq!(LfoTarget::RingFreq.map(1.0), 2000.0);
        assert_eq!(LfoTarget::PixelSize.map(0.5), 65.0);
        assert_eq!(LfoTarget::PixelSize.map(1.0), 128.0);
        assert_eq!(LfoTarget::DelayTime.map(0.3), 0.3);
        assert_eq!(LfoTarget::Volume.map(0.0), -40.0);
        assert_eq!(LfoTarget::Volume.map(1.0), 0.0);
    }

    #[test]
    fn test_no_write_when_off() {
        let mut store = ParamStore::new();
        store.set(ParamId::LfoDepth, 1.0);
        assert_eq!(ModulationEngine.apply(&mut store, 0.25), None);

        store.set_lfo_target(LfoTarget::RingFreq);
        store.set(ParamId::LfoDepth, 0.0);
        assert_eq!(ModulationEngine.apply(&mut store, 0.25), None);
        assert_eq!(store.get(ParamId::RingFreq), 440.0);
    }

    #[test]
    fn test_oscillator_range() {
        for i in 0..1000 {
            let v = ModulationEngine::oscillator(3.7, 0.6, f64::from(i) * 0.013);
            assert!((0.0..=0.6 + 1e-6).contains(&v));
        }
        assert!((ModulationEngine::oscillator(1.0, 1.0, 0.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_volume_target_writes_db() {
        let mut store = ParamStore::new();
        store.set_lfo_target(LfoTarget::Volume);
        store.set(ParamId::LfoDepth, 0.5);
        store.set(ParamId::LfoRate, 1.0);
        let (id, v) = ModulationEngine.apply(&mut store, 0.75).unwrap();
        // sin = -1 at three quarters: osc = 0
        assert_eq!(id, ParamId::Volume);
        assert!((v + 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_names_round_trip() {
        for t in LfoTarget::ALL {
            assert_eq!(LfoTarget::from_name(t.as_str()), Some(t));
        }
    }
}
