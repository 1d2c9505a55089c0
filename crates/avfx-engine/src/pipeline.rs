//! The visual pipeline: one pass of pixel ops per tick.
//!
//! ```text
//! input ─ jitter ─ ring ─ harmonizer overlay ─ [chain stages in order]
//!       ─ posterize ─ warp ─ edge ─ global adjust ─ output
//! ```
//!
//! [`apply_stages`] is the pure per-frame function. [`VisualPipeline`]
//! wraps it with the base image and the one retained feedback frame.

use avfx_visual::{
    Frame, GlobalAdjust, OverlayVoice, Posterize, RingVisual, blend, edge_detect, fractal_warp,
    global_adjust, harmonizer_overlay, pixelate, posterize, ring_visual, shift,
};

use crate::chain::{ChainOrder, StageId};
use crate::error::{Result, TickError};
use crate::params::{ParamId, ParamSnapshot};

/// Preview resolution.
pub const PREVIEW_SIZE: (u32, u32) = (512, 512);

/// Offline render resolution. Pixel cell sizes are measured at this width.
pub const RENDER_SIZE: (u32, u32) = (1024, 1024);

/// Per-call inputs to [`apply_stages`] that do not come from the store.
#[derive(Debug, Clone, Copy)]
pub struct StageContext<'a> {
    /// Animation time in seconds.
    pub time: f32,
    /// Micro-jitter draw in `[-1, 1]`; `None` skips the jitter.
    pub jitter: Option<f32>,
    /// Previous output for the feedback stage; `None` skips it.
    pub feedback: Option<&'a Frame>,
    /// Frame width over render width, applied to the pixel cell size.
    pub cell_scale: f32,
}

impl StageContext<'_> {
    /// Offline context at `time`: no jitter, no feedback, full-size cells.
    pub fn offline(time: f32) -> Self {
        StageContext {
            time,
            jitter: None,
            feedback: None,
            cell_scale: 1.0,
        }
    }
}

/// Run every stage on `input` and return the new frame.
///
/// With all mixes at zero and neutral tone settings the output equals the
/// input.
///
/// # Errors
///
/// [`TickError`] if the feedback frame does not match the input size.
pub fn apply_stages(
    input: &Frame,
    params: &ParamSnapshot,
    chain: &ChainOrder,
    ctx: &StageContext<'_>,
) -> Result<Frame> {
    let width = input.width() as f32;
    let mut work = input.clone();

    let intensity = params.get(ParamId::MicroIntensity);
    if let Some(draw) = ctx.jitter.filter(|_| intensity > 0.0) {
        let step_ms = params.get(ParamId::MicroStepMs);
        let segment = (step_ms / 1000.0 * width * 0.5).floor().max(1.0);
        let px = (draw * intensity * segment).floor() as i64;
        if px != 0 {
            work = shift(&work, px);
        }
    }

    let ring_mix = params.get(ParamId::RingMix);
    if ring_mix > 0.0 && chain.is_enabled(StageId::RingMod) {
        let settings = RingVisual {
            frequency: params.get(ParamId::RingFreq),
            mix: ring_mix,
            wave: params.ring_wave,
        };
        work = ring_visual(&work, settings, ctx.time);
    }

    let voices = params.active_voices().map(|v| {
        v.map(|v| OverlayVoice {
            semitones: v.semitones,
            mix: v.mix,
        })
    });
    if voices.iter().any(Option::is_some) {
        work = harmonizer_overlay(&work, &voices, ctx.time);
    }

    for stage in chain.stages().iter().filter(|s| s.enabled) {
        match stage.id {
            StageId::RingMod => {}
            StageId::Pixelate => {
                let mix = params.get(ParamId::PixelMix);
                if mix > 0.0 {
                    let cell = params.get(ParamId::PixelSize) * ctx.cell_scale;
                    let effect = pixelate(&work, cell);
                    work = blend(&work, &effect, mix).map_err(|e| TickError::frame("pixelate", e))?;
                }
            }
            StageId::Delay => {
                let mix = params.get(ParamId::DelayMix);
                if mix > 0.0 {
                    let px = (params.get(ParamId::DelayTime) * width * 0.25).floor() as i64;
                    let effect = shift(&work, px);
                    work = blend(&work, &effect, mix).map_err(|e| TickError::frame("delay", e))?;
                }
            }
            StageId::Feedback => {
                let amount = params.get(ParamId::Feedback);
                if let Some(previous) = ctx.feedback.filter(|_| amount > 0.0) {
                    work = blend(&work, previous, amount)
                        .map_err(|e| TickError::frame("feedback", e))?;
                }
            }
        }
    }

    let levels = params.poster_levels();
    if levels > 1 {
        work = posterize(&work, Posterize::new(levels).with_dither(params.dither));
    }

    let depth = params.get(ParamId::WarpDepth);
    if depth > 0.0 {
        let cell = width * params.get(ParamId::WarpScale);
        work = fractal_warp(&work, cell, depth, ctx.time);
    }

    let edge = params.get(ParamId::EdgeAmount);
    if edge > 0.0 {
        let edges = edge_detect(&work, edge);
        work = blend(&work, &edges, (edge * 0.5).min(1.0)).map_err(|e| TickError::frame("edge", e))?;
    }

    let tone = GlobalAdjust {
        contrast: params.get(ParamId::Contrast),
        threshold: params.get(ParamId::Threshold),
        gamma: params.get(ParamId::Gamma),
        preserve_bright: params.preserve_bright,
    };
    Ok(global_adjust(&work, tone))
}

/// Base images plus the one retained output frame.
///
/// # Example
///
/// ```rust
/// use avfx_engine::{ChainOrder, ParamStore, VisualPipeline};
/// use avfx_visual::Frame;
///
/// let base = Frame::filled(8, 8, [40, 80, 120, 255]);
/// let mut pipeline = VisualPipeline::new(base.clone(), base.clone());
///
/// let out = pipeline.tick(&ParamStore::new().snapshot(), &ChainOrder::new(), 0.0, None).unwrap();
/// assert_eq!(out, &base);
/// ```
#[derive(Debug, Clone)]
pub struct VisualPipeline {
    base: Frame,
    render_base: Frame,
    published: Option<Frame>,
    render_width: u32,
}

impl VisualPipeline {
    /// Pipeline over a preview-size base and a render-size base.
    pub fn new(base: Frame, render_base: Frame) -> Self {
        let render_width = render_base.width();
        Self {
            base,
            render_base,
            published: None,
            render_width,
        }
    }

    /// Replace both base images. The feedback frame is dropped.
    pub fn set_base(&mut self, base: Frame, render_base: Frame) {
        self.render_width = render_base.width();
        self.base = base;
        self.render_base = render_base;
        self.published = None;
    }

    /// Preview-size base image.
    pub fn base(&self) -> &Frame {
        &self.base
    }

    /// Render-size base image.
    pub fn render_base(&self) -> &Frame {
        &self.render_base
    }

    /// Last published frame, if any tick has completed.
    pub fn published(&self) -> Option<&Frame> {
        self.published.as_ref()
    }

    /// Drop the feedback frame so the next tick starts from the base.
    pub fn clear_feedback(&mut self) {
        self.published = None;
    }

    /// Run one preview tick and publish the result.
    ///
    /// Base-locked ticks read the base image; otherwise the previous output
    /// is the input. On error nothing is published and the previous frame
    /// stays current.
    ///
    /// # Errors
    ///
    /// [`TickError`] when a stage fails.
    pub fn tick(
        &mut self,
        params: &ParamSnapshot,
        chain: &ChainOrder,
        time: f32,
        jitter: Option<f32>,
    ) -> Result<&Frame> {
        let input = match (&self.published, params.base_locked) {
            (Some(previous), false) => previous,
            _ => &self.base,
        };
        let cell_scale = if self.render_width > 0 {
            self.base.width() as f32 / self.render_width as f32
        } else {
            1.0
        };
        let ctx = StageContext {
            time,
            jitter,
            feedback: self.published.as_ref(),
            cell_scale,
        };
        let frame = apply_stages(input, params, chain, &ctx)?;
        let published: &Frame = self.published.insert(frame);
        Ok(published)
    }

    /// Render one offline frame at `time` from the render-size base.
    ///
    /// Never reads or writes the feedback frame, so the result depends only
    /// on the arguments.
    ///
    /// # Errors
    ///
    /// [`TickError`] when a stage fails.
    pub fn render_frame(&self, params: &ParamSnapshot, chain: &ChainOrder, time: f32) -> Result<Frame> {
        apply_stages(&self.render_base, params, chain, &StageContext::offline(time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamStore;

    fn ramp(width: u32) -> Frame {
        let pixels = (0..width)
            .flat_map(|x| {
                let v = (x * 30) as u8;
                [v, v, v, 255]
            })
            .collect();
        Frame::from_rgba(width, 1, pixels).unwrap()
    }

    #[test]
    fn test_defaults_are_identity() {
        let base = ramp(8);
        let params = ParamStore::new().snapshot();
        let out = apply_stages(&base, &params, &ChainOrder::new(), &StageContext::offline(3.0)).unwrap();
        assert_eq!(out, base);
    }

    #[test]
    fn test_delay_stage_shift() {
        let base = ramp(8);
        let mut store = ParamStore::new();
        store.set(ParamId::DelayTime, 1.0);
        store.set(ParamId::DelayMix, 1.0);
        let out = apply_stages(&base, &store.snapshot(), &ChainOrder::new(), &StageContext::offline(0.0))
            .unwrap();
        assert_eq!(out, shift(&base, 2));
    }

    #[test]
    fn test_disabled_stage_is_skipped() {
        let base = ramp(8);
        let mut store = ParamStore::new();
        store.set(ParamId::DelayTime, 1.0);
        store.set(ParamId::DelayMix, 1.0);
        let mut chain = ChainOrder::new();
        chain.set_enabled(StageId::Delay, false);
        let out = apply_stages(&base, &store.snapshot(), &chain, &StageContext::offline(0.0)).unwrap();
        assert_eq!(out, base);
    }

    #[test]
    fn test_unlocked_ticks_accumulate() {
        let base = ramp(8);
        let mut store = ParamStore::new();
        store.set(ParamId::DelayTime, 1.0);
        store.set(ParamId::DelayMix, 1.0);
        let chain = ChainOrder::new();

        let mut locked = VisualPipeline::new(base.clone(), base.clone());
        locked.tick(&store.snapshot(), &chain, 0.0, None).unwrap();
        let out = locked.tick(&store.snapshot(), &chain, 0.0, None).unwrap();
        assert_eq!(out, &shift(&base, 2));

        store.set_base_locked(false);
        let mut free = VisualPipeline::new(base.clone(), base.clone());
        free.tick(&store.snapshot(), &chain, 0.0, None).unwrap();
        let out = free.tick(&store.snapshot(), &chain, 0.0, None).unwrap();
        assert_eq!(out, &shift(&base, 4));
    }

    #[test]
    fn test_feedback_follows_chain_order() {
        let base = ramp(8);
        let mut store = ParamStore::new();
        store.set(ParamId::DelayTime, 1.0);
        store.set(ParamId::DelayMix, 1.0);
        store.set(ParamId::Feedback, 1.0);

        // delay then feedback: the feedback blend replaces the shift with itself
        let delay_first = ChainOrder::from_ids(&[StageId::Delay, StageId::Feedback]);
        let mut pipeline = VisualPipeline::new(base.clone(), base.clone());
        pipeline.tick(&store.snapshot(), &delay_first, 0.0, None).unwrap();
        let out = pipeline.tick(&store.snapshot(), &delay_first, 0.0, None).unwrap();
        assert_eq!(out, &shift(&base, 2));

        // feedback then delay: the previous output is shifted again
        let feedback_first = ChainOrder::from_ids(&[StageId::Feedback, StageId::Delay]);
        let mut pipeline = VisualPipeline::new(base.clone(), base.clone());
        pipeline.tick(&store.snapshot(), &feedback_first, 0.0, None).unwrap();
        let out = pipeline.tick(&store.snapshot(), &feedback_first, 0.0, None).unwrap();
        assert_eq!(out, &shift(&base, 4));
    }

    #[test]
    fn test_render_frame_ignores_feedback() {
        let base = ramp(8);
        let mut store = ParamStore::new();
        store.set(ParamId::Feedback, 1.0);
        store.set(ParamId::DelayTime, 1.0);
        store.set(ParamId::DelayMix, 0.5);
        let chain = ChainOrder::new();
        let mut pipeline = VisualPipeline::new(base.clone(), base.clone());
        let before = pipeline.render_frame(&store.snapshot(), &chain, 1.0).unwrap();
        for _ in 0..3 {
            pipeline.tick(&store.snapshot(), &chain, 1.0, None).unwrap();
        }
        let after = pipeline.render_frame(&store.snapshot(), &chain, 1.0).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_mismatched_feedback_keeps_previous_frame() {
        let base = ramp(8);
        let mut store = ParamStore::new();
        store.set(ParamId::Feedback, 0.5);
        let stale = ramp(4);
        let ctx = StageContext {
            feedback: Some(&stale),
            ..StageContext::offline(0.0)
        };
        let err = apply_stages(&base, &store.snapshot(), &ChainOrder::new(), &ctx).unwrap_err();
        assert!(err.to_string().starts_with("visual stage feedback"));
    }

    #[test]
    fn test_jitter_shift() {
        let base = ramp(8);
        let mut store = ParamStore::new();
        store.set(ParamId::MicroIntensity, 1.0);
        store.set(ParamId::MicroStepMs, 1000.0);
        let ctx = StageContext {
            jitter: Some(0.5),
            ..StageContext::offline(0.0)
        };
        // segment = floor(1 · 8 · 0.5) = 4, shift = floor(0.5 · 4) = 2
        let out = apply_stages(&base, &store.snapshot(), &ChainOrder::new(), &ctx).unwrap();
        assert_eq!(out, shift(&base, 2));
    }

    #[test]
    fn test_set_base_drops_feedback() {
        let base = ramp(8);
        let mut pipeline = VisualPipeline::new(base.clone(), base.clone());
        pipeline.tick(&ParamStore::new().snapshot(), &ChainOrder::new(), 0.0, None).unwrap();
        assert!(pipeline.published().is_some());
        pipeline.set_base(ramp(4), ramp(8));
        assert!(pipeline.published().is_none());
    }
}
