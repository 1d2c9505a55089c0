//! Scene management for avfx.
//!
//! A scene is a TOML document holding everything needed to reproduce an
//! engine setup: parameter values keyed by id, the ring wave and other
//! toggles, the chain order, harmonizer voices and an optional step
//! pattern.
//!
//! # Features
//!
//! - **Scenes**: [`Scene::load`], [`Scene::save`], [`Scene::apply`] and
//!   [`Scene::capture`]
//! - **Factory scenes**: built in, always available
//! - **Paths**: user scenes under the platform config directory
//!
//! # Example
//!
//! ```rust,no_run
//! use avfx_config::{Scene, resolve_scene, user_scenes_dir};
//! use avfx_engine::{Engine, ParamId};
//!
//! let mut engine = Engine::default();
//! resolve_scene("echo_trails").unwrap().apply(&mut engine).unwrap();
//!
//! engine.params_mut().set(ParamId::Feedback, 0.8);
//! Scene::capture("Longer Trails", &engine)
//!     .save(user_scenes_dir().join("longer_trails.toml"))
//!     .unwrap();
//! ```

mod error;
mod scene;

/// Platform-specific paths for user scenes.
pub mod paths;

/// Factory scenes bundled with the library.
pub mod factory;

pub use error::ConfigError;
pub use factory::{
    FACTORY_SCENE_NAMES, factory_scenes, get_factory_scene, is_factory_scene, resolve_scene,
};
pub use paths::{
    ensure_user_scenes_dir, find_scene, list_user_scenes, scene_name_from_path, user_config_dir,
    user_scenes_dir,
};
pub use scene::{Scene, SceneSettings, SequencerConfig, StageConfig, StepConfig, VoiceConfig};
