//! The parameter store: every named control both pipelines read.
//!
//! Continuous parameters are addressed by [`ParamId`] and declared by a
//! [`ParamDescriptor`]; every write is clamped into the declared range, so
//! an out-of-range value is never an error. Discrete settings (ring wave,
//! toggles, LFO target, harmonizer voices) live beside them.
//!
//! Pipelines never read the store directly. They take a [`ParamSnapshot`],
//! an owned copy, so a tick sees one consistent set of values.

use core::fmt;

use avfx_core::{ParamDescriptor, ParamScale, ParamUnit, Waveform};

use crate::modulation::LfoTarget;

/// Number of harmonizer voice slots.
pub const VOICE_SLOTS: usize = 3;

/// Largest harmonizer shift in semitones, either direction.
pub const MAX_VOICE_SEMITONES: i32 = 24;

/// Identifier of a continuous parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParamId {
    /// Ring carrier frequency
    RingFreq,
    /// Ring modulation mix
    RingMix,
    /// Pixel cell size at render resolution
    PixelSize,
    /// Pixelate blend
    PixelMix,
    /// Delay time
    DelayTime,
    /// Visual delay blend
    DelayMix,
    /// Feedback amount
    Feedback,
    /// Edge boost amount
    EdgeAmount,
    /// Posterize levels
    PosterLevels,
    /// Warp noise scale, as a fraction of the frame width
    WarpScale,
    /// Warp depth
    WarpDepth,
    /// Global contrast
    Contrast,
    /// Global luma threshold
    Threshold,
    /// Global gamma
    Gamma,
    /// LFO rate
    LfoRate,
    /// LFO depth
    LfoDepth,
    /// Micro-loop jump probability
    MicroIntensity,
    /// Micro-loop step length
    MicroStepMs,
    /// EQ low shelf gain
    EqLow,
    /// EQ mid gain
    EqMid,
    /// EQ high shelf gain
    EqHigh,
    /// Master volume
    Volume,
    /// Gate open threshold
    GateThreshold,
    /// Gate release time
    GateRelease,
    /// Master fade length
    FadeDuration,
    /// Number of harmonizer voices in play
    VoiceCount,
}

impl ParamId {
    /// Number of continuous parameters.
    pub const COUNT: usize = 26;

    /// Every parameter in table order.
    pub const ALL: [ParamId; Self::COUNT] = [
        ParamId::RingFreq,
        ParamId::RingMix,
        ParamId::PixelSize,
        ParamId::PixelMix,
        ParamId::DelayTime,
        ParamId::DelayMix,
        ParamId::Feedback,
        ParamId::EdgeAmount,
        ParamId::PosterLevels,
        ParamId::WarpScale,
        ParamId::WarpDepth,
        ParamId::Contrast,
        ParamId::Threshold,
        ParamId::Gamma,
        ParamId::LfoRate,
        ParamId::LfoDepth,
        ParamId::MicroIntensity,
        ParamId::MicroStepMs,
        ParamId::EqLow,
        ParamId::EqMid,
        ParamId::EqHigh,
        ParamId::Volume,
        ParamId::GateThreshold,
        ParamId::GateRelease,
        ParamId::FadeDuration,
        ParamId::VoiceCount,
    ];

    /// Position in [`ParamId::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Declared range, default and display metadata.
    pub const fn descriptor(self) -> ParamDescriptor {
        use ParamId as P;
        match self {
            P::RingFreq => ParamDescriptor::custom("Ring Frequency", "Freq", 1.0, 2000.0, 440.0)
                .with_unit(ParamUnit::Hertz)
                .with_scale(ParamScale::Logarithmic)
                .with_string_id("ring_freq"),
            P::RingMix => ParamDescriptor::amount("Ring Mix", "Mix", 0.0).with_string_id("ring_mix"),
            P::PixelSize => ParamDescriptor::custom("Pixel Size", "Pix", 1.0, 256.0, 4.0)
                .with_unit(ParamUnit::Pixels)
                .with_step(1.0)
                .with_string_id("pixel_size"),
            P::PixelMix => ParamDescriptor::amount("Pixel Mix", "Mix", 0.0).with_string_id("pixel_mix"),
            P::DelayTime => ParamDescriptor::custom("Delay Time", "Time", 0.0, 1.0, 0.2)
                .with_unit(ParamUnit::Seconds)
                .with_string_id("delay_time"),
            P::DelayMix => ParamDescriptor::amount("Delay Mix", "Mix", 0.0).with_string_id("delay_mix"),
            P::Feedback => ParamDescriptor::amount("Feedback", "Fdbk", 0.0).with_string_id("feedback"),
            P::EdgeAmount => ParamDescriptor::amount("Edge Boost", "Edge", 0.0).with_string_id("edge_amount"),
            P::PosterLevels => ParamDescriptor::custom("Posterize Levels", "Lvls", 0.0, 32.0, 0.0)
                .with_step(1.0)
                .with_string_id("poster_levels"),
            P::WarpScale => ParamDescriptor::amount("Warp Scale", "Scale", 0.3).with_string_id("warp_scale"),
            P::WarpDepth => ParamDescriptor::amount("Warp Depth", "Depth", 0.0).with_string_id("warp_depth"),
            P::Contrast => ParamDescriptor::custom("Contrast", "Cont", 0.0, 3.0, 1.0).with_string_id("contrast"),
            P::Threshold => ParamDescriptor::amount("Threshold", "Thrs", 0.0).with_string_id("threshold"),
            P::Gamma => ParamDescriptor::custom("Gamma", "Gam", 0.1, 4.0, 1.0).with_string_id("gamma"),
            P::LfoRate => ParamDescriptor::custom("LFO Rate", "Rate", 0.01, 20.0, 0.2)
                .with_unit(ParamUnit::Hertz)
                .with_scale(ParamScale::Logarithmic)
                .with_string_id("lfo_rate"),
            P::LfoDepth => ParamDescriptor::amount("LFO Depth", "Depth", 0.0).with_string_id("lfo_depth"),
            P::MicroIntensity => {
                ParamDescriptor::amount("Micro Intensity", "Int", 0.0).with_string_id("micro_intensity")
            }
            P::MicroStepMs => ParamDescriptor::custom("Micro Step", "Step", 10.0, 1000.0, 250.0)
                .with_unit(ParamUnit::Milliseconds)
                .with_step(1.0)
                .with_string_id("micro_step_ms"),
            P::EqLow => ParamDescriptor::gain_db("EQ Low", "Low", -24.0, 24.0, 0.0).with_string_id("eq_low"),
            P::EqMid => ParamDescriptor::gain_db("EQ Mid", "Mid", -24.0, 24.0, 0.0).with_string_id("eq_mid"),
            P::EqHigh => ParamDescriptor::gain_db("EQ High", "High", -24.0, 24.0, 0.0).with_string_id("eq_high"),
            P::Volume => ParamDescriptor::gain_db("Volume", "Vol", -60.0, 0.0, -20.0).with_string_id("volume"),
            P::GateThreshold => ParamDescriptor::gain_db("Gate Threshold", "Gate", -100.0, 0.0, -60.0)
                .with_string_id("gate_threshold"),
            P::GateRelease => ParamDescriptor::custom("Gate Release", "Rel", 0.0, 2.0, 0.1)
                .with_unit(ParamUnit::Seconds)
                .with_string_id("gate_release"),
            P::FadeDuration => ParamDescriptor::custom("Fade Duration", "Fade", 0.0, 10.0, 1.0)
                .with_unit(ParamUnit::Seconds)
                .with_string_id("fade_duration"),
            P::VoiceCount => ParamDescriptor::custom("Voices", "Voices", 1.0, 3.0, 1.0)
                .with_step(1.0)
                .with_string_id("voice_count"),
        }
    }

    /// Ramp time the audio graph applies when this parameter changes.
    pub const fn smoothing_ms(self) -> f32 {
        match self {
            ParamId::RingFreq
            | ParamId::RingMix
            | ParamId::DelayTime
            | ParamId::Feedback
            | ParamId::WarpDepth
            | ParamId::EqLow
            | ParamId::EqMid
            | ParamId::EqHigh
            | ParamId::Volume => 50.0,
            ParamId::WarpScale => 100.0,
            _ => 0.0,
        }
    }

    /// Stable string id, e.g. `"ring_freq"`.
    pub const fn as_str(self) -> &'static str {
        self.descriptor().string_id
    }

    /// Look up a parameter by string id (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One harmonizer voice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    /// Whether the voice sounds (and draws) at all.
    pub enabled: bool,
    /// Pitch offset, `-24..=24`.
    pub semitones: i32,
    /// Level, `0..=1`.
    pub mix: f32,
}

impl Voice {
    /// Voice with clamped settings.
    pub fn new(enabled: bool, semitones: i32, mix: f32) -> Self {
        Self {
            enabled,
            semitones: semitones.clamp(-MAX_VOICE_SEMITONES, MAX_VOICE_SEMITONES),
            mix: avfx_core::clamp01(mix),
        }
    }

    /// Factory voices: a fifth up, an octave up, an octave down, all off.
    pub const DEFAULTS: [Voice; VOICE_SLOTS] = [
        Voice {
            enabled: false,
            semitones: 7,
            mix: 0.2,
        },
        Voice {
            enabled: false,
            semitones: 12,
            mix: 0.2,
        },
        Voice {
            enabled: false,
            semitones: -12,
            mix: 0.2,
        },
    ];
}

/// A voice that is actually in play: harmonizer on, slot within the voice
/// count, voice enabled and mix above zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveVoice {
    /// Pitch offset
    pub semitones: i32,
    /// Level
    pub mix: f32,
}

/// Owned copy of every parameter and setting at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    values: [f32; ParamId::COUNT],
    /// Ring oscillator shape, shared by the audio carrier and the ring visual.
    pub ring_wave: Waveform,
    /// Posterize dither on/off.
    pub dither: bool,
    /// Threshold sends dark pixels to black rather than to their luma.
    pub preserve_bright: bool,
    /// Each tick starts from the base image instead of the last output.
    pub base_locked: bool,
    /// Harmonizer master switch.
    pub harmonizer_enabled: bool,
    /// Which parameter the LFO writes.
    pub lfo_target: LfoTarget,
    /// Harmonizer voice slots.
    pub voices: [Voice; VOICE_SLOTS],
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        let mut values = [0.0; ParamId::COUNT];
        for id in ParamId::ALL {
            values[id.index()] = id.descriptor().default;
        }
        Self {
            values,
            ring_wave: Waveform::Sine,
            dither: false,
            preserve_bright: true,
            base_locked: true,
            harmonizer_enabled: false,
            lfo_target: LfoTarget::None,
            voices: Voice::DEFAULTS,
        }
    }
}

impl ParamSnapshot {
    /// Value of `id`.
    #[inline]
    pub fn get(&self, id: ParamId) -> f32 {
        self.values[id.index()]
    }

    /// Posterize levels as an integer.
    pub fn poster_levels(&self) -> u32 {
        self.get(ParamId::PosterLevels) as u32
    }

    /// Number of voice slots in play (1..=3).
    pub fn voice_count(&self) -> usize {
        (self.get(ParamId::VoiceCount) as usize).clamp(1, VOICE_SLOTS)
    }

    /// Per-slot voice if it is in play, `None` otherwise.
    pub fn active_voices(&self) -> [Option<ActiveVoice>; VOICE_SLOTS] {
        let count = self.voice_count();
        let mut active = [None; VOICE_SLOTS];
        if !self.harmonizer_enabled {
            return active;
        }
        for (slot, voice) in self.voices.iter().enumerate().take(count) {
            if voice.enabled && voice.mix > 0.0 {
                active[slot] = Some(ActiveVoice {
                    semitones: voice.semitones,
                    mix: voice.mix,
                });
            }
        }
        active
    }
}

/// Single source of truth for every control.
///
/// # Example
///
/// ```rust
/// use avfx_engine::{ParamId, ParamStore};
///
/// let mut store = ParamStore::new();
/// assert_eq!(store.get(ParamId::Volume), -20.0);
///
/// // out-of-range writes clamp
/// assert_eq!(store.set(ParamId::RingFreq, 9000.0), 2000.0);
/// assert_eq!(store.snapshot().get(ParamId::RingFreq), 2000.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParamStore {
    current: ParamSnapshot,
}

impl ParamStore {
    /// Store holding every default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `id`.
    pub fn get(&self, id: ParamId) -> f32 {
        self.current.get(id)
    }

    /// Write `value`, clamped to the declared range (integer parameters are
    /// rounded). Returns the stored value.
    pub fn set(&mut self, id: ParamId, value: f32) -> f32 {
        let desc = id.descriptor();
        let mut v = desc.clamp(value);
        if desc.is_stepped() {
            v = desc.clamp(v.round());
        }
        self.current.values[id.index()] = v;
        v
    }

    /// Restore `id` to its default.
    pub fn reset(&mut self, id: ParamId) {
        self.current.values[id.index()] = id.descriptor().default;
    }

    /// Restore every parameter and setting to defaults.
    pub fn reset_all(&mut self) {
        self.current = ParamSnapshot::default();
    }

    /// Owned copy for one tick.
    pub fn snapshot(&self) -> ParamSnapshot {
        self.current
    }

    /// Ring oscillator shape.
    pub fn ring_wave(&self) -> Waveform {
        self.current.ring_wave
    }

    /// Set the ring oscillator shape.
    pub fn set_ring_wave(&mut self, wave: Waveform) {
        self.current.ring_wave = wave;
    }

    /// Posterize dither on/off.
    pub fn set_dither(&mut self, dither: bool) {
        self.current.dither = dither;
    }

    /// Threshold mode.
    pub fn set_preserve_bright(&mut self, preserve: bool) {
        self.current.preserve_bright = preserve;
    }

    /// Base-lock mode.
    pub fn set_base_locked(&mut self, locked: bool) {
        self.current.base_locked = locked;
    }

    /// Harmonizer master switch.
    pub fn set_harmonizer_enabled(&mut self, enabled: bool) {
        self.current.harmonizer_enabled = enabled;
    }

    /// LFO destination.
    pub fn lfo_target(&self) -> LfoTarget {
        self.current.lfo_target
    }

    /// Set the LFO destination.
    pub fn set_lfo_target(&mut self, target: LfoTarget) {
        self.current.lfo_target = target;
    }

    /// Voice in `slot`, or `None` past the last slot.
    pub fn voice(&self, slot: usize) -> Option<Voice> {
        self.current.voices.get(slot).copied()
    }

    /// Replace the voice in `slot` (clamped). Out-of-range slots are ignored.
    pub fn set_voice(&mut self, slot: usize, voice: Voice) {
        if let Some(v) = self.current.voices.get_mut(slot) {
            *v = Voice::new(voice.enabled, voice.semitones, voice.mix);
        }
    }

    /// Retune the voice in `slot`, leaving its other settings.
    pub fn set_voice_semitones(&mut self, slot: usize, semitones: i32) {
        if let Some(v) = self.current.voices.get_mut(slot) {
            v.semitones = semitones.clamp(-MAX_VOICE_SEMITONES, MAX_VOICE_SEMITONES);
        }
    }
}
