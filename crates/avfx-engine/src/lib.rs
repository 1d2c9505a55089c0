//! avfx Engine - the dual visual/audio effect engine
//!
//! One control surface, two pipelines:
//!
//! - [`ParamStore`] - Every named control, clamped on write, read by snapshot
//! - [`ChainOrder`] - Reorderable stage permutation shared by both pipelines
//! - [`VisualPipeline`] - Pixel ops per tick with one retained feedback frame
//! - [`AudioGraph`] - Fixed node topology with three optional voice branches
//! - [`ModulationEngine`] - One LFO writing one chosen parameter
//! - [`RenderScheduler`] / [`ExportPlan`] - Tick rate limiting and offline framing
//! - [`MicroLoop`] and [`StepSequencer`] - Timed playhead jumps and voice retunes
//!
//! [`Engine`] owns all of them and is driven by [`Engine::advance`] with an
//! external timestamp, so a headless run needs no real timers.
//!
//! ## Example
//!
//! ```rust
//! use avfx_engine::{Engine, EngineConfig, ExportPlan, ParamId, StageId};
//!
//! let mut engine = Engine::new(EngineConfig {
//!     preview_size: (16, 16),
//!     render_size: (32, 32),
//!     ..EngineConfig::default()
//! });
//! engine.params_mut().set(ParamId::PixelMix, 1.0);
//! engine.reorder(StageId::Delay, 1);
//!
//! for t in ExportPlan::new(1.0, 2).frame_times() {
//!     let frame = engine.render_frame(t).unwrap();
//!     assert_eq!(frame.size(), (32, 32));
//! }
//! ```

pub mod audio;
pub mod chain;
pub mod engine;
pub mod error;
pub mod micro_loop;
pub mod modulation;
pub mod params;
pub mod pipeline;
pub mod scheduler;
pub mod sequencer;
pub mod targets;

pub use audio::{AudioGraph, AudioSource};
pub use chain::{ChainOrder, Stage, StageId};
pub use engine::{AdvanceReport, Engine, EngineConfig};
pub use error::{GraphError, TickError};
pub use micro_loop::MicroLoop;
pub use modulation::{LfoTarget, ModulationEngine};
pub use params::{ActiveVoice, ParamId, ParamSnapshot, ParamStore, Voice};
pub use pipeline::{PREVIEW_SIZE, RENDER_SIZE, StageContext, VisualPipeline, apply_stages};
pub use scheduler::{ExportPlan, RenderScheduler};
pub use sequencer::{StepCell, StepSequencer};
pub use targets::{AudioTargets, WarpTargets};
