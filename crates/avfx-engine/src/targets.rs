//! Audio automation targets derived from a parameter snapshot.
//!
//! This is the audio half of a tick: a pure mapping from control values to
//! node settings. The graph applies the result as ramps.

use avfx_core::{Waveform, clamp01, lerp};

use crate::params::{ActiveVoice, ParamId, ParamSnapshot, VOICE_SLOTS};

/// Chorus settings for the liquid warp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarpTargets {
    /// Wet amount, `depth^0.8` (0 when depth is 0)
    pub wet: f32,
    /// Chorus LFO rate, `lerp(0.05, 2.0, 1 - scale)` Hz
    pub rate_hz: f32,
    /// Centre delay, `lerp(2, 25, depth · scale)` ms
    pub base_delay_ms: f32,
    /// Modulation depth, `depth`
    pub depth: f32,
}

impl WarpTargets {
    /// Map warp depth and scale (both 0..1).
    pub fn from_depth_scale(depth: f32, scale: f32) -> Self {
        let depth = clamp01(depth);
        let scale = clamp01(scale);
        let wet = if depth > 0.0 { depth.powf(0.8) } else { 0.0 };
        Self {
            wet,
            rate_hz: lerp(0.05, 2.0, 1.0 - scale),
            base_delay_ms: lerp(2.0, 25.0, depth * scale),
            depth,
        }
    }
}

/// Every value the audio graph is retargeted to on a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioTargets {
    /// Ring carrier frequency in Hz
    pub ring_freq: f32,
    /// Ring mix
    pub ring_mix: f32,
    /// Ring carrier shape
    pub ring_wave: Waveform,
    /// Bit depth of the crusher
    pub crusher_bits: u8,
    /// Delay time in seconds
    pub delay_time: f32,
    /// Delay feedback
    pub feedback: f32,
    /// Post-delay volume in dB
    pub volume_db: f32,
    /// Liquid warp chorus
    pub warp: WarpTargets,
    /// EQ gains `[low, mid, high]` in dB
    pub eq_db: [f32; 3],
    /// Gate threshold in dB
    pub gate_threshold_db: f32,
    /// Gate release in seconds
    pub gate_release_sec: f32,
    /// Harmonizer bus on/off
    pub harmonizer_enabled: bool,
    /// Voice per slot, `None` for an empty slot
    pub voices: [Option<ActiveVoice>; VOICE_SLOTS],
}

impl AudioTargets {
    /// Derive the targets from a snapshot.
    pub fn from_snapshot(params: &ParamSnapshot) -> Self {
        Self {
            ring_freq: params.get(ParamId::RingFreq),
            ring_mix: params.get(ParamId::RingMix),
            ring_wave: params.ring_wave,
            crusher_bits: crusher_bits(params.get(ParamId::PixelSize), params.get(ParamId::PixelMix)),
            delay_time: params.get(ParamId::DelayTime),
            feedback: params.get(ParamId::Feedback),
            volume_db: params.get(ParamId::Volume),
            warp: WarpTargets::from_depth_scale(
                params.get(ParamId::WarpDepth),
                params.get(ParamId::WarpScale),
            ),
            eq_db: [
                params.get(ParamId::EqLow),
                params.get(ParamId::EqMid),
                params.get(ParamId::EqHigh),
            ],
            gate_threshold_db: params.get(ParamId::GateThreshold),
            gate_release_sec: params.get(ParamId::GateRelease),
            harmonizer_enabled: params.harmonizer_enabled,
            voices: params.active_voices(),
        }
    }
}

/// Crusher depth for a pixel cell size.
///
/// `max(1, round(cell / 16))` clamped to 16 while pixelate is mixed in;
/// full 16-bit resolution while it is not.
pub fn crusher_bits(cell: f32, pixel_mix: f32) -> u8 {
    if pixel_mix <= 0.0 || !cell.is_finite() {
        return 16;
    }
    (cell / 16.0).round().clamp(1.0, 16.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamStore;

    #[test]
    fn test_warp_mapping() {
        let off = WarpTargets::from_depth_scale(0.0, 0.3);
        assert_eq!(off.wet, 0.0);
        assert!((off.rate_hz - 1.415).abs() < 1e-4);
        assert_eq!(off.base_delay_ms, 2.0);

        let full = WarpTargets::from_depth_scale(1.0, 1.0);
        assert_eq!(full.wet, 1.0);
        assert!((full.rate_hz - 0.05).abs() < 1e-6);
        assert_eq!(full.base_delay_ms, 25.0);
        assert_eq!(full.depth, 1.0);
    }

    #[test]
    fn test_crusher_bits() {
        assert_eq!(crusher_bits(4.0, 0.0), 16);
        assert_eq!(crusher_bits(4.0, 0.5), 1);
        assert_eq!(crusher_bits(64.0, 0.5), 4);
        assert_eq!(crusher_bits(256.0, 1.0), 16);
    }

    #[test]
    fn test_defaults_leave_audio_clean() {
        let targets = AudioTargets::from_snapshot(&ParamStore::new().snapshot());
        assert_eq!(targets.ring_mix, 0.0);
        assert_eq!(targets.crusher_bits, 16);
        assert_eq!(targets.warp.wet, 0.0);
        assert_eq!(targets.voices, [None; 3]);
    }
}
