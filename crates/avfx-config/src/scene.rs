//! Scene file format and operations.

use std::collections::BTreeMap;
use std::path::Path;

use avfx_core::{NoteDivision, Waveform};
use avfx_engine::sequencer::MAX_STEPS;
use avfx_engine::{
    ChainOrder, Engine, LfoTarget, ParamId, StageId, StepCell, StepSequencer, Voice,
};
use avfx_engine::params::VOICE_SLOTS;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A complete engine setup: parameter values, discrete settings, chain
/// order, harmonizer voices and an optional step pattern.
///
/// Parameters are keyed by their stable string ids. Anything a scene leaves
/// out takes its default when the scene is applied.
///
/// # TOML Format
///
/// ```toml
/// name = "Echo Trails"
/// description = "Delay smear feeding back into itself"
///
/// [params]
/// delay_time = 0.35
/// delay_mix = 0.8
/// feedback = 0.6
///
/// [settings]
/// base_locked = false
/// lfo_target = "delay_time"
///
/// [[chain]]
/// stage = "delay"
///
/// [[chain]]
/// stage = "feedback"
///
/// [[voices]]
/// slot = 0
/// enabled = true
/// semitones = 7
/// mix = 0.3
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    /// Name of the scene.
    pub name: String,

    /// Optional description of the scene.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parameter values keyed by parameter id.
    #[serde(default)]
    pub params: BTreeMap<String, f64>,

    /// Discrete settings.
    #[serde(default)]
    pub settings: SceneSettings,

    /// Stage order; stages not listed follow in factory order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chain: Vec<StageConfig>,

    /// Harmonizer voices by slot.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub voices: Vec<VoiceConfig>,

    /// Step pattern for the harmonizer voices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequencer: Option<SequencerConfig>,
}

/// Discrete settings. Unset fields keep their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SceneSettings {
    /// Ring oscillator shape name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring_wave: Option<String>,
    /// Posterize dither.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dither: Option<bool>,
    /// Threshold keeps bright pixels' luma.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preserve_bright: Option<bool>,
    /// Ticks start from the base image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_locked: Option<bool>,
    /// Harmonizer master switch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harmonizer: Option<bool>,
    /// LFO destination name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lfo_target: Option<String>,
}

/// One chain entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StageConfig {
    /// Stage name (`ringmod`, `pixelate`, `delay`, `feedback`).
    pub stage: String,
    /// Whether the stage runs.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// One harmonizer voice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoiceConfig {
    /// Voice slot, `0..3`.
    pub slot: usize,
    /// Voice sounds and draws.
    #[serde(default)]
    pub enabled: bool,
    /// Pitch offset in semitones.
    #[serde(default)]
    pub semitones: i32,
    /// Level, `0..=1`.
    #[serde(default)]
    pub mix: f64,
}

/// Step pattern settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SequencerConfig {
    /// Tempo in BPM.
    #[serde(default = "default_bpm")]
    pub bpm: f64,
    /// Step length as a fraction label (`1/4`, `1/8`, `1/16`, `1/32`).
    #[serde(default = "default_division")]
    pub division: String,
    /// Pattern length in steps.
    #[serde(default = "default_length")]
    pub length: usize,
    /// Enabled cells.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepConfig>,
}

/// One enabled sequencer cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepConfig {
    /// Voice row, `0..3`.
    pub row: usize,
    /// Step index, `0..64`.
    pub step: usize,
    /// Semitone offset written when the step fires.
    pub semitones: i32,
}

fn default_true() -> bool {
    true
}

fn default_bpm() -> f64 {
    120.0
}

fn default_division() -> String {
    NoteDivision::Eighth.label().to_string()
}

fn default_length() -> usize {
    16
}

/// Scene with every name resolved, ready to push into an engine.
struct Resolved {
    params: Vec<(ParamId, f32)>,
    ring_wave: Option<Waveform>,
    lfo_target: Option<LfoTarget>,
    chain: Option<ChainOrder>,
    voices: Vec<(usize, Voice)>,
    sequencer: Option<StepSequencer>,
}

/// Parameter values are written with six decimals so saved scenes stay
/// readable.
fn tidy(value: f32) -> f64 {
    (f64::from(value) * 1e6).round() / 1e6
}

impl Scene {
    /// Create a scene with no overrides.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: BTreeMap::new(),
            settings: SceneSettings::default(),
            chain: Vec::new(),
            voices: Vec::new(),
            sequencer: None,
        }
    }

    /// Create a scene with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Override one parameter.
    pub fn with_param(mut self, id: ParamId, value: f32) -> Self {
        self.params.insert(id.as_str().to_string(), tidy(value));
        self
    }

    /// Load a scene from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let scene: Scene = toml::from_str(&content)?;
        tracing::debug!(name = %scene.name, path = %path.display(), "scene loaded");
        Ok(scene)
    }

    /// Load a scene from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the scene to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the scene to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every name and index without touching an engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolve().map(|_| ())
    }

    fn resolve(&self) -> Result<Resolved, ConfigError> {
        let params = self
            .params
            .iter()
            .map(|(name, &value)| {
                ParamId::from_name(name)
                    .map(|id| (id, value as f32))
                    .ok_or_else(|| ConfigError::UnknownParameter(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let ring_wave = self
            .settings
            .ring_wave
            .as_deref()
            .map(|name| {
                Waveform::from_name(name).ok_or_else(|| ConfigError::UnknownWave(name.to_string()))
            })
            .transpose()?;

        let lfo_target = self
            .settings
            .lfo_target
            .as_deref()
            .map(|name| {
                LfoTarget::from_name(name)
                    .ok_or_else(|| ConfigError::UnknownLfoTarget(name.to_string()))
            })
            .transpose()?;

        let chain = if self.chain.is_empty() {
            None
        } else {
            let entries = self
                .chain
                .iter()
                .map(|entry| {
                    StageId::from_name(&entry.stage)
                        .map(|id| (id, entry.enabled))
                        .ok_or_else(|| ConfigError::UnknownStage(entry.stage.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            let ids: Vec<StageId> = entries.iter().map(|&(id, _)| id).collect();
            let mut chain = ChainOrder::from_ids(&ids);
            for (id, enabled) in entries {
                chain.set_enabled(id, enabled);
            }
            Some(chain)
        };

        let voices = self
            .voices
            .iter()
            .map(|v| {
                check_index("voice", v.slot, VOICE_SLOTS)?;
                Ok((v.slot, Voice::new(v.enabled, v.semitones, v.mix as f32)))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let sequencer = self
            .sequencer
            .as_ref()
            .map(SequencerConfig::build)
            .transpose()?;

        Ok(Resolved {
            params,
            ring_wave,
            lfo_target,
            chain,
            voices,
            sequencer,
        })
    }

    /// Reset `engine` to defaults and push this scene into it.
    ///
    /// The scene is validated first; on error the engine is untouched.
    /// Values go through the parameter store, so out-of-range numbers clamp.
    pub fn apply(&self, engine: &mut Engine) -> Result<(), ConfigError> {
        let resolved = self.resolve()?;

        let store = engine.params_mut();
        store.reset_all();
        for (id, value) in resolved.params {
            store.set(id, value);
        }
        if let Some(wave) = resolved.ring_wave {
            store.set_ring_wave(wave);
        }
        if let Some(target) = resolved.lfo_target {
            store.set_lfo_target(target);
        }
        let settings = &self.settings;
        if let Some(dither) = settings.dither {
            store.set_dither(dither);
        }
        if let Some(preserve) = settings.preserve_bright {
            store.set_preserve_bright(preserve);
        }
        if let Some(locked) = settings.base_locked {
            store.set_base_locked(locked);
        }
        if let Some(enabled) = settings.harmonizer {
            store.set_harmonizer_enabled(enabled);
        }
        for (slot, voice) in resolved.voices {
            store.set_voice(slot, voice);
        }

        engine.set_chain(resolved.chain.unwrap_or_default());
        *engine.sequencer_mut() = resolved.sequencer.unwrap_or_default();
        engine.sync_audio();

        tracing::info!(scene = %self.name, "scene applied");
        Ok(())
    }

    /// Read the engine's full current setup back into a scene.
    pub fn capture(name: impl Into<String>, engine: &Engine) -> Self {
        let snapshot = engine.params().snapshot();

        let params = ParamId::ALL
            .into_iter()
            .map(|id| (id.as_str().to_string(), tidy(snapshot.get(id))))
            .collect();

        let settings = SceneSettings {
            ring_wave: Some(snapshot.ring_wave.name().to_string()),
            dither: Some(snapshot.dither),
            preserve_bright: Some(snapshot.preserve_bright),
            base_locked: Some(snapshot.base_locked),
            harmonizer: Some(snapshot.harmonizer_enabled),
            lfo_target: Some(snapshot.lfo_target.as_str().to_string()),
        };

        let chain = engine
            .chain()
            .stages()
            .iter()
            .map(|stage| StageConfig {
                stage: stage.id.as_str().to_string(),
                enabled: stage.enabled,
            })
            .collect();

        let voices = snapshot
            .voices
            .iter()
            .enumerate()
            .map(|(slot, v)| VoiceConfig {
                slot,
                enabled: v.enabled,
                semitones: v.semitones,
                mix: tidy(v.mix),
            })
            .collect();

        Self {
            name: name.into(),
            description: None,
            params,
            settings,
            chain,
            voices,
            sequencer: SequencerConfig::capture(engine.sequencer()),
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

impl SequencerConfig {
    fn build(&self) -> Result<StepSequencer, ConfigError> {
        let division = NoteDivision::from_label(&self.division)
            .ok_or_else(|| ConfigError::UnknownDivision(self.division.clone()))?;

        let mut seq = StepSequencer::new();
        seq.set_bpm(self.bpm as f32);
        seq.set_division(division);
        seq.set_length(self.length);
        for cell in &self.steps {
            check_index("sequencer row", cell.row, VOICE_SLOTS)?;
            check_index("sequencer step", cell.step, MAX_STEPS)?;
            seq.set_cell(cell.row, cell.step, StepCell::on(cell.semitones));
        }
        Ok(seq)
    }

    /// `None` for a pattern with no enabled cells.
    fn capture(seq: &StepSequencer) -> Option<Self> {
        let steps: Vec<StepConfig> = (0..VOICE_SLOTS)
            .flat_map(|row| (0..MAX_STEPS).map(move |step| (row, step)))
            .filter_map(|(row, step)| {
                seq.cell(row, step)
                    .filter(|cell| cell.enabled)
                    .map(|cell| StepConfig {
                        row,
                        step,
                        semitones: cell.semitones,
                    })
            })
            .collect();
        if steps.is_empty() {
            return None;
        }
        Some(Self {
            bpm: f64::from(seq.bpm()),
            division: seq.division().label().to_string(),
            length: seq.length(),
            steps,
        })
    }
}

fn check_index(what: &'static str, index: usize, len: usize) -> Result<(), ConfigError> {
    if index < len {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            what,
            index,
            max: len - 1,
        })
    }
}
