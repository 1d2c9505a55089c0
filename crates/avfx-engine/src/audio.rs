//! The audio graph: a fixed chain of nodes plus three optional voice slots.
//!
//! ## Signal Flow
//!
//! ```text
//! source ─┬─ ring ─ crusher ─ delay ─ volume ─ warp ─┬─ EQ ─ gate ─ master ─ out
//!         │                                           │
//!         └─ [voice 0..3: pitch shift · mix] ─ bus ───┘
//! ```
//!
//! Node parameters are retargeted from [`AudioTargets`] and always move by
//! ramps. The only structural change is a voice slot gaining or losing its
//! branch, which happens on enable/disable transitions and never per tick.
//! A disabled branch first fades out (its own 100 ms ramp, or the bus ramp
//! when the whole harmonizer turns off) and is disposed once silent.
//! Chain order is recorded but does not change the signal path.

use avfx_core::{Effect, LinearSmoothedParam, PARAM_RAMP_MS, SmoothedParam, db_to_linear};
use avfx_effects::{
    Bitcrusher, Chorus, FeedbackDelay, Gate, GateState, PitchShifter, RingMod, ThreeBandEq,
};

use crate::chain::StageId;
use crate::error::GraphError;
use crate::params::{ActiveVoice, VOICE_SLOTS};
use crate::targets::AudioTargets;

/// Ramp for the harmonizer bus, in milliseconds.
pub const BUS_RAMP_MS: f32 = 100.0;

/// Nodes that always exist: ring, crusher, delay, volume, warp, EQ, gate,
/// harmonizer bus and master gain.
pub const FIXED_NODE_COUNT: usize = 9;

/// Nodes a live voice branch owns: pitch shifter and mix gain.
pub const VOICE_BRANCH_NODES: usize = 2;

const DEFAULT_VOLUME_DB: f32 = -20.0;

/// Mono sample buffer played in a loop.
///
/// A source with no samples is silent; seeking it is a no-op.
#[derive(Debug, Clone)]
pub struct AudioSource {
    samples: Vec<f32>,
    position: usize,
    sample_rate: f32,
}

impl AudioSource {
    /// Loop over `samples` recorded at `sample_rate`.
    pub fn new(samples: Vec<f32>, sample_rate: f32) -> Self {
        Self {
            samples,
            position: 0,
            sample_rate,
        }
    }

    /// A source that produces zeros.
    pub fn silent(sample_rate: f32) -> Self {
        Self::new(Vec::new(), sample_rate)
    }

    /// Rate the samples were recorded at.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// No samples loaded.
    pub fn is_silent(&self) -> bool {
        self.samples.is_empty()
    }

    /// Loop length in seconds.
    pub fn duration_sec(&self) -> f32 {
        if self.sample_rate > 0.0 {
            self.samples.len() as f32 / self.sample_rate
        } else {
            0.0
        }
    }

    /// Playhead in seconds.
    pub fn position_sec(&self) -> f32 {
        if self.sample_rate > 0.0 {
            self.position as f32 / self.sample_rate
        } else {
            0.0
        }
    }

    /// Move the playhead, clamped into `[0, duration]`.
    pub fn seek(&mut self, seconds: f32) {
        if self.samples.is_empty() {
            return;
        }
        let seconds = if seconds.is_finite() { seconds } else { 0.0 };
        let target = (seconds.max(0.0) * self.sample_rate) as usize;
        self.position = target.min(self.samples.len() - 1);
    }

    /// Next sample, wrapping at the end.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let Some(&sample) = self.samples.get(self.position) else {
            return 0.0;
        };
        self.position += 1;
        if self.position >= self.samples.len() {
            self.position = 0;
        }
        sample
    }
}

/// One harmonizer voice: pitch shifter into a mix gain and a fade level.
#[derive(Debug, Clone)]
struct VoiceBranch {
    shifter: PitchShifter,
    mix: SmoothedParam,
    level: LinearSmoothedParam,
    releasing: bool,
}

impl VoiceBranch {
    /// `fade_in` starts the level at 0; otherwise the bus ramp covers the entry.
    fn try_new(
        slot: usize,
        voice: ActiveVoice,
        sample_rate: f32,
        fade_in: bool,
    ) -> Result<Self, GraphError> {
        let shifter = PitchShifter::try_new(sample_rate, voice.semitones)
            .map_err(|source| GraphError::voice(slot, source))?;
        let start = if fade_in { 0.0 } else { 1.0 };
        let mut level = LinearSmoothedParam::with_config(start, sample_rate, BUS_RAMP_MS);
        level.set_target(1.0);
        Ok(Self {
            shifter,
            mix: SmoothedParam::with_config(voice.mix, sample_rate, PARAM_RAMP_MS),
            level,
            releasing: false,
        })
    }

    fn retarget(&mut self, voice: ActiveVoice) {
        if self.releasing {
            self.releasing = false;
            self.level.set_target(1.0);
        }
        if self.shifter.semitones() != voice.semitones {
            self.shifter.set_semitones(voice.semitones);
        }
        self.mix.set_target(voice.mix);
    }

    /// Start leaving. With `fade` the branch ramps its own level to 0,
    /// otherwise it rides the bus down.
    fn release(&mut self, fade: bool) {
        self.releasing = true;
        if fade {
            self.level.set_target(0.0);
        }
    }

    /// Released and no longer audible.
    fn is_finished(&self, bus_closed: bool) -> bool {
        self.releasing && (bus_closed || (self.level.get() == 0.0 && !self.level.is_ramping()))
    }

    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.shifter.process(input) * self.mix.advance() * self.level.advance()
    }
}

/// The audio graph.
///
/// # Example
///
/// ```rust
/// use avfx_core::Effect;
/// use avfx_engine::{ActiveVoice, AudioGraph, AudioTargets, ParamStore};
///
/// let mut graph = AudioGraph::new(48000.0);
/// let mut targets = AudioTargets::from_snapshot(&ParamStore::new().snapshot());
///
/// targets.harmonizer_enabled = true;
/// targets.voices[0] = Some(ActiveVoice { semitones: 7, mix: 0.5 });
/// graph.apply_targets(&targets);
/// assert_eq!(graph.slot_node_count(0), 2);
///
/// targets.voices[0] = None;
/// graph.apply_targets(&targets);
/// assert!(!graph.is_voice_live(0));
///
/// // disposed once its 100 ms fade has run
/// let mut out = vec![0.0; 5000];
/// graph.render(&mut out);
/// assert_eq!(graph.slot_node_count(0), 0);
/// ```
#[derive(Debug, Clone)]
pub struct AudioGraph {
    source: AudioSource,
    ring: RingMod,
    crusher: Bitcrusher,
    delay: FeedbackDelay,
    volume: SmoothedParam,
    warp: Chorus,
    eq: ThreeBandEq,
    gate: Gate,
    voices: [Option<VoiceBranch>; VOICE_SLOTS],
    failed: [bool; VOICE_SLOTS],
    voice_failures: u32,
    harmony_bus: LinearSmoothedParam,
    master: LinearSmoothedParam,
    order: Vec<StageId>,
    sample_rate: f32,
}

impl AudioGraph {
    /// Build the fixed topology with a silent source.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            source: AudioSource::silent(sample_rate),
            ring: RingMod::new(sample_rate),
            crusher: Bitcrusher::new(sample_rate),
            delay: FeedbackDelay::new(sample_rate),
            volume: SmoothedParam::with_config(
                db_to_linear(DEFAULT_VOLUME_DB),
                sample_rate,
                PARAM_RAMP_MS,
            ),
            warp: Chorus::new(sample_rate),
            eq: ThreeBandEq::new(sample_rate),
            gate: Gate::new(sample_rate),
            voices: [None, None, None],
            failed: [false; VOICE_SLOTS],
            voice_failures: 0,
            harmony_bus: LinearSmoothedParam::with_config(0.0, sample_rate, BUS_RAMP_MS),
            master: LinearSmoothedParam::with_config(1.0, sample_rate, 0.0),
            order: StageId::ALL.to_vec(),
            sample_rate,
        }
    }

    /// Sample rate the nodes run at.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Replace the looping source.
    pub fn load_source(&mut self, source: AudioSource) {
        tracing::debug!(
            duration_sec = source.duration_sec(),
            silent = source.is_silent(),
            "audio source loaded"
        );
        self.source = source;
    }

    /// The looping source.
    pub fn source(&self) -> &AudioSource {
        &self.source
    }

    /// Loop length of the source in seconds (0 when silent).
    pub fn duration_sec(&self) -> f32 {
        self.source.duration_sec()
    }

    /// Seek the source, clamped into `[0, duration]`.
    pub fn seek(&mut self, seconds: f32) {
        self.source.seek(seconds);
    }

    /// Record the stage order. The signal path stays fixed.
    pub fn rebuild_chain(&mut self, order: &[StageId]) {
        self.order.clear();
        self.order.extend_from_slice(order);
    }

    /// Last order passed to [`rebuild_chain`](Self::rebuild_chain).
    pub fn chain_order(&self) -> &[StageId] {
        &self.order
    }

    /// Retarget every node and sync the voice slots.
    pub fn apply_targets(&mut self, targets: &AudioTargets) {
        self.ring.set_frequency(targets.ring_freq);
        self.ring.set_mix(targets.ring_mix);
        self.ring.set_waveform(targets.ring_wave);

        self.crusher.set_bits(targets.crusher_bits);

        self.delay.set_delay_seconds(targets.delay_time);
        self.delay.set_feedback(targets.feedback);

        self.volume.set_target(db_to_linear(targets.volume_db));

        let warp = targets.warp;
        self.warp.set_mix(warp.wet);
        self.warp.set_rate(warp.rate_hz);
        self.warp.set_base_delay_ms(warp.base_delay_ms);
        self.warp.set_depth(warp.depth);

        let [low, mid, high] = targets.eq_db;
        self.eq.set_gains(low, mid, high);

        self.gate.set_threshold_db(targets.gate_threshold_db);
        self.gate.set_release_sec(targets.gate_release_sec);

        let bus = if targets.harmonizer_enabled { 1.0 } else { 0.0 };
        if self.harmony_bus.target() != bus {
            self.harmony_bus.ramp_to(bus, BUS_RAMP_MS);
        }
        self.sync_voices(&targets.voices, targets.harmonizer_enabled);
    }

    /// Create or release voice branches whose slot changed state, retune
    /// the rest in place.
    ///
    /// A branch that fails to build is logged once and its slot stays empty
    /// until the voice is disabled and wanted again.
    fn sync_voices(&mut self, wanted: &[Option<ActiveVoice>; VOICE_SLOTS], bus_open: bool) {
        let fade_in = self.harmony_bus.get() >= 1.0;
        for (slot, want) in wanted.iter().enumerate() {
            let Some(voice) = want else {
                self.failed[slot] = false;
                if let Some(live) = self.voices[slot].as_mut().filter(|v| !v.releasing) {
                    live.release(bus_open);
                    tracing::debug!(slot, "harmonizer: voice branch releasing");
                }
                continue;
            };
            if let Some(live) = self.voices[slot].as_mut() {
                live.retarget(*voice);
                continue;
            }
            if self.failed[slot] {
                continue;
            }
            match VoiceBranch::try_new(slot, *voice, self.sample_rate, fade_in) {
                Ok(created) => {
                    tracing::debug!(
                        slot,
                        semitones = voice.semitones,
                        "harmonizer: voice branch created"
                    );
                    self.voices[slot] = Some(created);
                }
                Err(err) => {
                    self.failed[slot] = true;
                    self.voice_failures += 1;
                    tracing::warn!(error = %err, "harmonizer: voice disabled");
                }
            }
        }
    }

    fn dispose_finished_voices(&mut self) {
        let bus_closed = self.harmony_bus.get() == 0.0 && !self.harmony_bus.is_ramping();
        for (slot, branch) in self.voices.iter_mut().enumerate() {
            if branch.as_ref().is_some_and(|v| v.is_finished(bus_closed)) {
                *branch = None;
                tracing::debug!(slot, "harmonizer: voice branch disposed");
            }
        }
    }

    /// Nodes owned by voice `slot`, including a branch still fading out
    /// (0 when the slot is empty).
    pub fn slot_node_count(&self, slot: usize) -> usize {
        match self.voices.get(slot) {
            Some(Some(_)) => VOICE_BRANCH_NODES,
            _ => 0,
        }
    }

    /// Whether `slot` holds a branch that is not fading out.
    pub fn is_voice_live(&self, slot: usize) -> bool {
        matches!(self.voices.get(slot), Some(Some(v)) if !v.releasing)
    }

    /// Voice branches that failed to build since the graph was created.
    pub fn voice_failures(&self) -> u32 {
        self.voice_failures
    }

    /// Every node currently in the graph.
    pub fn node_count(&self) -> usize {
        FIXED_NODE_COUNT + (0..VOICE_SLOTS).map(|s| self.slot_node_count(s)).sum::<usize>()
    }

    /// Ramp the master gain up to unity over `seconds`.
    pub fn fade_in(&mut self, seconds: f32) {
        self.master.ramp_to(1.0, seconds.max(0.0) * 1000.0);
    }

    /// Ramp the master gain down to silence over `seconds`.
    pub fn fade_out(&mut self, seconds: f32) {
        self.master.ramp_to(0.0, seconds.max(0.0) * 1000.0);
    }

    /// Current master gain.
    pub fn master_gain(&self) -> f32 {
        self.master.get()
    }

    /// Gate meter and decision.
    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    /// Pull `output.len()` samples from the source through the graph.
    pub fn render(&mut self, output: &mut [f32]) {
        for out in output.iter_mut() {
            let input = self.source.next_sample();
            *out = self.process(input);
        }
    }

    /// Run a whole buffer through the graph in blocks of `block_size`.
    pub fn process_file(&mut self, input: &[f32], block_size: usize) -> Vec<f32> {
        let mut output = vec![0.0; input.len()];
        let block_size = block_size.max(1);

        for (in_chunk, out_chunk) in input.chunks(block_size).zip(output.chunks_mut(block_size)) {
            let len = in_chunk.len();
            self.process_block(in_chunk, &mut out_chunk[..len]);
        }

        output
    }
}

impl Effect for AudioGraph {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let x = self.ring.process(input);
        let x = self.crusher.process(x);
        let x = self.delay.process(x);
        let x = x * self.volume.advance();
        let mut x = self.warp.process(x);

        let bus = self.harmony_bus.advance();
        let mut harmony = 0.0;
        let mut releasing = false;
        for voice in self.voices.iter_mut().flatten() {
            harmony += voice.process(input);
            releasing |= voice.releasing;
        }
        x += harmony * bus;
        if releasing {
            self.dispose_finished_voices();
        }

        let x = self.eq.process(x);
        let x = self.gate.process(x);
        x * self.master.advance()
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.ring.set_sample_rate(sample_rate);
        self.crusher.set_sample_rate(sample_rate);
        self.delay.set_sample_rate(sample_rate);
        self.volume.set_sample_rate(sample_rate);
        self.warp.set_sample_rate(sample_rate);
        self.eq.set_sample_rate(sample_rate);
        self.gate.set_sample_rate(sample_rate);
        for voice in self.voices.iter_mut().flatten() {
            voice.shifter.set_sample_rate(sample_rate);
            voice.mix.set_sample_rate(sample_rate);
            voice.level.set_sample_rate(sample_rate);
        }
        self.harmony_bus.set_sample_rate(sample_rate);
        self.master.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.ring.reset();
        self.crusher.reset();
        self.delay.reset();
        self.volume.snap_to_target();
        self.warp.reset();
        self.eq.reset();
        self.gate.reset();
        for branch in &mut self.voices {
            if branch.as_ref().is_some_and(|v| v.releasing) {
                *branch = None;
            }
        }
        for voice in self.voices.iter_mut().flatten() {
            voice.shifter.reset();
            voice.mix.snap_to_target();
            voice.level.snap_to_target();
        }
        self.harmony_bus.snap_to_target();
        self.master.snap_to_target();
    }

    fn latency_samples(&self) -> usize {
        self.delay.latency_samples()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ParamId, ParamStore, Voice};

    const SR: f32 = 8000.0;

    fn targets(store: &ParamStore) -> AudioTargets {
        AudioTargets::from_snapshot(&store.snapshot())
    }

    fn sine(len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| 0.5 * (2.0 * core::f32::consts::PI * 220.0 * i as f32 / SR).sin())
            .collect()
    }

    #[test]
    fn test_voice_enable_disable_leaves_no_branch() {
        let mut store = ParamStore::new();
        let mut graph = AudioGraph::new(SR);
        store.set_harmonizer_enabled(true);
        store.set_voice(0, Voice::new(true, 7, 0.4));
        graph.apply_targets(&targets(&store));
        assert_eq!(graph.slot_node_count(0), VOICE_BRANCH_NODES);
        assert_eq!(graph.node_count(), FIXED_NODE_COUNT + VOICE_BRANCH_NODES);

        store.set_voice(0, Voice::new(false, 7, 0.4));
        graph.apply_targets(&targets(&store));
        assert!(!graph.is_voice_live(0));
        graph.process_file(&sine(1000), 64);
        assert_eq!(graph.slot_node_count(0), 0);
        assert_eq!(graph.node_count(), FIXED_NODE_COUNT);
    }

    #[test]
    fn test_harmonizer_off_disposes_every_branch() {
        let mut store = ParamStore::new();
        let mut graph = AudioGraph::new(SR);
        store.set_harmonizer_enabled(true);
        store.set(ParamId::VoiceCount, 3.0);
        for slot in 0..VOICE_SLOTS {
            store.set_voice(slot, Voice::new(true, 12, 0.3));
        }
        graph.apply_targets(&targets(&store));
        assert_eq!(graph.node_count(), FIXED_NODE_COUNT + 3 * VOICE_BRANCH_NODES);

        store.set_harmonizer_enabled(false);
        graph.apply_targets(&targets(&store));
        graph.process_file(&sine(1000), 64);
        assert_eq!(graph.node_count(), FIXED_NODE_COUNT);
    }

    /// DC in the first second reaches the output only through the voices:
    /// the main path is still waiting on the 1 s delay.
    fn steady_voice_graph(store: &mut ParamStore) -> AudioGraph {
        let mut graph = AudioGraph::new(SR);
        store.set(ParamId::DelayTime, 1.0);
        store.set_harmonizer_enabled(true);
        store.set_voice(0, Voice::new(true, 12, 1.0));
        graph.apply_targets(&targets(store));
        graph.reset();
        graph.process_file(&[0.5; 1200], 64);
        graph
    }

    fn peak(samples: &[f32]) -> f32 {
        samples.iter().fold(0.0_f32, |m, s| m.max(s.abs()))
    }

    #[test]
    fn test_harmonizer_off_fades_over_bus_ramp() {
        let mut store = ParamStore::new();
        let mut graph = steady_voice_graph(&mut store);
        let on = peak(&graph.process_file(&[0.5; 40], 40));
        assert!((on - 0.5).abs() < 1e-3, "voice level {on}");

        store.set_harmonizer_enabled(false);
        graph.apply_targets(&targets(&store));
        let out = graph.process_file(&[0.5; 80], 80);
        // 5 to 10 ms after the switch the bus is still above 0.9
        let early = out[40..].iter().fold(f32::MAX, |m, s| m.min(s.abs()));
        assert!(early > 0.85 * on, "{early} vs {on}");
        assert_eq!(graph.slot_node_count(0), VOICE_BRANCH_NODES);

        let tail = graph.process_file(&[0.5; 800], 80);
        assert!(tail[720..].iter().all(|s| s.abs() < 1e-6));
        assert_eq!(graph.slot_node_count(0), 0);
    }

    #[test]
    fn test_voice_off_fades_on_its_own_ramp() {
        let mut store = ParamStore::new();
        let mut graph = steady_voice_graph(&mut store);

        store.set_voice(0, Voice::new(false, 12, 1.0));
        graph.apply_targets(&targets(&store));
        let out = graph.process_file(&[0.5; 80], 80);
        assert!(out[79] > 0.85 * 0.5, "{}", out[79]);
        assert_eq!(graph.slot_node_count(0), VOICE_BRANCH_NODES);

        graph.process_file(&[0.5; 800], 80);
        assert_eq!(graph.slot_node_count(0), 0);
    }

    #[test]
    fn test_reenabled_voice_keeps_fading_branch() {
        let mut store = ParamStore::new();
        let mut graph = steady_voice_graph(&mut store);
        store.set_voice(0, Voice::new(false, 12, 1.0));
        graph.apply_targets(&targets(&store));
        graph.process_file(&[0.5; 200], 80);

        store.set_voice(0, Voice::new(true, 12, 1.0));
        graph.apply_targets(&targets(&store));
        assert!(graph.is_voice_live(0));
        let out = graph.process_file(&[0.5; 1000], 80);
        assert!((out[999] - 0.5).abs() < 1e-3, "{}", out[999]);
        assert_eq!(graph.slot_node_count(0), VOICE_BRANCH_NODES);
    }

    #[test]
    fn test_retune_keeps_branch() {
        let mut store = ParamStore::new();
        let mut graph = AudioGraph::new(SR);
        store.set_harmonizer_enabled(true);
        store.set_voice(0, Voice::new(true, 7, 0.4));
        graph.apply_targets(&targets(&store));
        store.set_voice_semitones(0, -5);
        graph.apply_targets(&targets(&store));
        let shifted = graph.voices[0].as_ref().map(|v| v.shifter.semitones());
        assert_eq!(shifted, Some(-5));
    }

    #[test]
    fn test_failed_voice_is_treated_as_disabled() {
        // a 10 Hz graph cannot hold a 100 ms pitch window
        let mut graph = AudioGraph::new(10.0);
        let mut store = ParamStore::new();
        store.set_harmonizer_enabled(true);
        store.set_voice(0, Voice::new(true, 7, 0.4));
        graph.apply_targets(&targets(&store));
        assert_eq!(graph.slot_node_count(0), 0);
        assert_eq!(graph.node_count(), FIXED_NODE_COUNT);

        // no rebuild attempt while the voice stays wanted
        graph.apply_targets(&targets(&store));
        graph.apply_targets(&targets(&store));
        assert_eq!(graph.voice_failures(), 1);

        store.set_voice(0, Voice::new(false, 7, 0.4));
        graph.apply_targets(&targets(&store));
        store.set_voice(0, Voice::new(true, 7, 0.4));
        graph.apply_targets(&targets(&store));
        assert_eq!(graph.voice_failures(), 2);
        assert_eq!(graph.slot_node_count(0), 0);
    }

    #[test]
    fn test_chain_order_recorded_only() {
        let mut graph = AudioGraph::new(SR);
        let input = sine(4000);
        let mut reference = graph.clone();
        graph.rebuild_chain(&[StageId::Feedback, StageId::Delay]);
        assert_eq!(graph.chain_order(), &[StageId::Feedback, StageId::Delay]);
        assert_eq!(graph.process_file(&input, 64), reference.process_file(&input, 64));
    }

    #[test]
    fn test_fade_out_reaches_silence() {
        let mut graph = AudioGraph::new(SR);
        graph.fade_out(0.1);
        let out = graph.process_file(&sine(8000), 256);
        assert!(out[1000..].iter().all(|&s| s == 0.0));
        assert_eq!(graph.master_gain(), 0.0);

        graph.fade_in(0.0);
        graph.process(0.0);
        assert_eq!(graph.master_gain(), 1.0);
    }

    #[test]
    fn test_output_is_delayed_and_finite() {
        let mut graph = AudioGraph::new(SR);
        let out = graph.process_file(&sine(8000), 128);
        assert!(out.iter().all(|s| s.is_finite()));
        // default 0.2 s delay: nothing before the echo arrives
        assert!(out[..1500].iter().all(|s| s.abs() < 1e-6));
        assert!(out[2400..].iter().any(|s| s.abs() > 1e-3));
    }

    #[test]
    fn test_render_pulls_looping_source() {
        let mut graph = AudioGraph::new(SR);
        graph.load_source(AudioSource::new(sine(100), SR));
        let mut out = vec![0.0; 450];
        graph.render(&mut out);
        assert!(out.iter().all(|s| s.is_finite()));
        assert_eq!(graph.source().position_sec(), 50.0 / SR);
    }

    #[test]
    fn test_source_seek_clamps() {
        let mut source = AudioSource::new(vec![0.1; 1000], 1000.0);
        source.seek(5.0);
        assert!((source.position_sec() - 0.999).abs() < 1e-6);
        source.seek(-1.0);
        assert_eq!(source.position_sec(), 0.0);

        let mut silent = AudioSource::silent(1000.0);
        silent.seek(1.0);
        assert_eq!(silent.next_sample(), 0.0);
        assert_eq!(silent.duration_sec(), 0.0);
    }
}
