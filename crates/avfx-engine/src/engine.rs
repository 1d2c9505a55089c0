//! The engine adapter: owns every component and drives them from `advance`.
//!
//! A driver calls [`Engine::advance`] with a monotonic timestamp as often
//! as it likes. Each call runs, in order: the micro-loop, the step
//! sequencer, the LFO, a rate-limited visual tick, and the audio retarget.
//! Nothing here reads a clock or sleeps.

use avfx_core::{Effect, Lcg};
use avfx_effects::GateState;
use avfx_visual::{Frame, block_pattern};

use crate::audio::{AudioGraph, AudioSource};
use crate::chain::{ChainOrder, StageId};
use crate::error::Result;
use crate::micro_loop::MicroLoop;
use crate::modulation::ModulationEngine;
use crate::params::{ParamId, ParamStore};
use crate::pipeline::{PREVIEW_SIZE, RENDER_SIZE, VisualPipeline};
use crate::scheduler::{MIN_TICK_INTERVAL_MS, RenderScheduler};
use crate::sequencer::StepSequencer;
use crate::targets::AudioTargets;

/// Engine construction settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Audio sample rate in Hz.
    pub sample_rate: f32,
    /// Preview frame size.
    pub preview_size: (u32, u32),
    /// Offline render frame size.
    pub render_size: (u32, u32),
    /// Minimum spacing between visual ticks in milliseconds.
    pub min_tick_interval_ms: f64,
    /// Seed for jitter, micro-loop jumps and the fallback image.
    pub seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000.0,
            preview_size: PREVIEW_SIZE,
            render_size: RENDER_SIZE,
            min_tick_interval_ms: MIN_TICK_INTERVAL_MS,
            seed: 12345,
        }
    }
}

/// What one [`Engine::advance`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AdvanceReport {
    /// A new frame was published.
    pub ticked: bool,
    /// The micro-loop moved the audio playhead here (seconds).
    pub seek: Option<f32>,
    /// Sequencer steps fired.
    pub steps: usize,
    /// Parameter and value written by the LFO.
    pub modulated: Option<(ParamId, f32)>,
}

/// Parameter store, chain, both pipelines and the schedulers around them.
///
/// # Example
///
/// ```rust
/// use avfx_engine::{Engine, EngineConfig, ParamId};
///
/// let config = EngineConfig {
///     preview_size: (32, 32),
///     render_size: (64, 64),
///     ..EngineConfig::default()
/// };
/// let mut engine = Engine::new(config);
/// engine.params_mut().set(ParamId::EdgeAmount, 0.8);
///
/// assert!(engine.advance(0.0).ticked);
/// assert!(!engine.advance(100.0).ticked);
/// assert_eq!(engine.published().map(|f| f.size()), Some((32, 32)));
///
/// let frame = engine.render_frame(0.5).unwrap();
/// assert_eq!(frame.size(), (64, 64));
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    params: ParamStore,
    chain: ChainOrder,
    pipeline: VisualPipeline,
    audio: AudioGraph,
    scheduler: RenderScheduler,
    micro_loop: MicroLoop,
    sequencer: StepSequencer,
    rng: Lcg,
    fallback_seed: u32,
}

impl Engine {
    /// Build every component. The base image is the seeded fallback pattern.
    pub fn new(config: EngineConfig) -> Self {
        let (preview, render) = fallback_pair(&config, config.seed);
        tracing::info!(
            sample_rate = config.sample_rate,
            preview_width = config.preview_size.0,
            preview_height = config.preview_size.1,
            render_width = config.render_size.0,
            render_height = config.render_size.1,
            seed = config.seed,
            "engine ready"
        );
        Self {
            config,
            params: ParamStore::new(),
            chain: ChainOrder::new(),
            pipeline: VisualPipeline::new(preview, render),
            audio: AudioGraph::new(config.sample_rate),
            scheduler: RenderScheduler::new(config.min_tick_interval_ms),
            micro_loop: MicroLoop::new(config.seed.wrapping_add(1)),
            sequencer: StepSequencer::new(),
            rng: Lcg::new(config.seed),
            fallback_seed: config.seed,
        }
    }

    /// Settings the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The parameter store.
    pub fn params(&self) -> &ParamStore {
        &self.params
    }

    /// The parameter store, for the control surface.
    pub fn params_mut(&mut self) -> &mut ParamStore {
        &mut self.params
    }

    /// Stage order.
    pub fn chain(&self) -> &ChainOrder {
        &self.chain
    }

    /// Replace the stage order.
    pub fn set_chain(&mut self, chain: ChainOrder) {
        self.chain = chain;
        self.audio.rebuild_chain(&self.chain.ordered_ids());
    }

    /// Move a stage to 1-based `position` and tell the audio graph.
    pub fn reorder(&mut self, id: StageId, position: usize) -> bool {
        let moved = self.chain.reorder(id, position);
        if moved {
            self.audio.rebuild_chain(&self.chain.ordered_ids());
        }
        moved
    }

    /// Enable or disable a stage.
    pub fn set_stage_enabled(&mut self, id: StageId, enabled: bool) {
        self.chain.set_enabled(id, enabled);
    }

    /// The harmonizer step sequencer.
    pub fn sequencer(&self) -> &StepSequencer {
        &self.sequencer
    }

    /// Mutable access to the step sequencer.
    pub fn sequencer_mut(&mut self) -> &mut StepSequencer {
        &mut self.sequencer
    }

    /// The audio graph.
    pub fn audio(&self) -> &AudioGraph {
        &self.audio
    }

    /// The audio graph, for the render collaborator.
    pub fn audio_mut(&mut self) -> &mut AudioGraph {
        &mut self.audio
    }

    /// The visual pipeline.
    pub fn pipeline(&self) -> &VisualPipeline {
        &self.pipeline
    }

    /// Replace the looping audio source.
    pub fn load_audio(&mut self, source: AudioSource) {
        self.audio.load_source(source);
    }

    /// Replace the base images and drop the feedback frame.
    pub fn set_base_images(&mut self, preview: Frame, render: Frame) {
        tracing::info!(
            width = preview.width(),
            height = preview.height(),
            "base image"
        );
        self.pipeline.set_base(preview, render);
    }

    /// Swap in a new fallback pattern drawn from the engine's generator.
    pub fn regenerate_fallback(&mut self) {
        self.fallback_seed = self.rng.next_u32();
        let (preview, render) = fallback_pair(&self.config, self.fallback_seed);
        tracing::info!(seed = self.fallback_seed, "fallback pattern regenerated");
        self.pipeline.set_base(preview, render);
    }

    /// Last published preview frame.
    pub fn published(&self) -> Option<&Frame> {
        self.pipeline.published()
    }

    /// Drive every component up to `now_ms`.
    pub fn advance(&mut self, now_ms: f64) -> AdvanceReport {
        let mut report = AdvanceReport::default();
        let time_sec = now_ms / 1000.0;

        let snapshot = self.params.snapshot();
        report.seek = self.micro_loop.advance(
            now_ms,
            snapshot.get(ParamId::MicroIntensity),
            snapshot.get(ParamId::MicroStepMs),
            self.audio.duration_sec(),
        );
        if let Some(position) = report.seek {
            self.audio.seek(position);
        }

        report.steps = self.sequencer.advance(now_ms, &mut self.params);
        report.modulated = ModulationEngine.apply(&mut self.params, time_sec);

        let snapshot = self.params.snapshot();
        if self.scheduler.should_run(now_ms) {
            let jitter = self.rng.next_bipolar();
            match self
                .pipeline
                .tick(&snapshot, &self.chain, time_sec as f32, Some(jitter))
            {
                Ok(_) => report.ticked = true,
                Err(err) => tracing::warn!(error = %err, "visual tick dropped"),
            }
        }

        self.audio.apply_targets(&AudioTargets::from_snapshot(&snapshot));
        report
    }

    /// Offline frame at virtual `time_sec`, from the render-size base.
    ///
    /// # Errors
    ///
    /// [`TickError`](crate::TickError) when a stage fails.
    pub fn render_frame(&self, time_sec: f64) -> Result<Frame> {
        self.pipeline
            .render_frame(&self.params.snapshot(), &self.chain, time_sec as f32)
    }

    /// Push the current parameters into the audio graph.
    pub fn sync_audio(&mut self) {
        self.audio
            .apply_targets(&AudioTargets::from_snapshot(&self.params.snapshot()));
    }

    /// Run a buffer through the audio graph with the current parameters.
    pub fn process_audio(&mut self, input: &[f32], block_size: usize) -> Vec<f32> {
        self.sync_audio();
        self.audio.reset();
        self.audio.process_file(input, block_size)
    }

    /// Fade the master in over the `fade_duration` parameter.
    pub fn fade_in(&mut self) {
        let seconds = self.params.get(ParamId::FadeDuration);
        self.audio.fade_in(seconds);
    }

    /// Fade the master out over the `fade_duration` parameter.
    pub fn fade_out(&mut self) {
        let seconds = self.params.get(ParamId::FadeDuration);
        self.audio.fade_out(seconds);
    }

    /// Gate meter for polling.
    pub fn gate_state(&self) -> GateState {
        self.audio.gate_state()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn fallback_pair(config: &EngineConfig, seed: u32) -> (Frame, Frame) {
    let (pw, ph) = config.preview_size;
    let (rw, rh) = config.render_size;
    (
        block_pattern(pw, ph, &mut Lcg::new(seed)),
        block_pattern(rw, rh, &mut Lcg::new(seed)),
    )
}
