//! Factory scenes bundled with the library.
//!
//! Each is a TOML document embedded at compile time, so they are always
//! available without files on disk.

use crate::{ConfigError, Scene};

/// Factory scene names, in display order.
pub static FACTORY_SCENE_NAMES: &[&str] = &[
    "init",
    "ring_drift",
    "mosaic_crush",
    "echo_trails",
    "liquid",
    "choir",
    "ghost_edges",
];

static FACTORY_SCENES_TOML: &[(&str, &str)] = &[
    ("init", INIT),
    ("ring_drift", RING_DRIFT),
    ("mosaic_crush", MOSAIC_CRUSH),
    ("echo_trails", ECHO_TRAILS),
    ("liquid", LIQUID),
    ("choir", CHOIR),
    ("ghost_edges", GHOST_EDGES),
];

const INIT: &str = r#"
name = "Init"
description = "Every parameter at its default: the base image and the dry source"
"#;

const RING_DRIFT: &str = r#"
name = "Ring Drift"
description = "Ring modulation with the LFO sweeping the carrier"

[params]
ring_freq = 180
ring_mix = 0.7
lfo_rate = 0.15
lfo_depth = 0.6

[settings]
ring_wave = "sine"
lfo_target = "ring_freq"
"#;

const MOSAIC_CRUSH: &str = r#"
name = "Mosaic Crush"
description = "Coarse pixel blocks and posterized colour over a bit-reduced signal"

[params]
pixel_size = 48
pixel_mix = 1.0
poster_levels = 5
contrast = 1.3

[settings]
dither = true

[[chain]]
stage = "pixelate"

[[chain]]
stage = "ringmod"
"#;

const ECHO_TRAILS: &str = r#"
name = "Echo Trails"
description = "Delay smear fed back into itself, drifting with each tick"

[params]
delay_time = 0.35
delay_mix = 0.8
feedback = 0.55
micro_intensity = 0.2
micro_step_ms = 400

[settings]
base_locked = false
lfo_target = "delay_time"

[[chain]]
stage = "delay"

[[chain]]
stage = "feedback"
"#;

const LIQUID: &str = r#"
name = "Liquid"
description = "Fractal warp on the image, chorus wash on the audio"

[params]
warp_depth = 0.6
warp_scale = 0.25
gamma = 0.8
eq_high = -6
"#;

const CHOIR: &str = r#"
name = "Choir"
description = "Three harmonizer voices stepping through a pattern"

[params]
voice_count = 3

[settings]
harmonizer = true

[[voices]]
slot = 0
enabled = true
semitones = 7
mix = 0.3

[[voices]]
slot = 1
enabled = true
semitones = 12
mix = 0.2

[[voices]]
slot = 2
enabled = true
semitones = -12
mix = 0.25

[sequencer]
bpm = 96
division = "1/8"
length = 8

[[sequencer.steps]]
row = 0
step = 0
semitones = 7

[[sequencer.steps]]
row = 0
step = 4
semitones = 5

[[sequencer.steps]]
row = 1
step = 2
semitones = 12

[[sequencer.steps]]
row = 1
step = 6
semitones = 10
"#;

const GHOST_EDGES: &str = r#"
name = "Ghost Edges"
description = "Sobel outlines over a thresholded image, gated audio"

[params]
edge_amount = 0.8
threshold = 0.4
contrast = 1.6
gate_threshold = -40
gate_release = 0.3

[settings]
preserve_bright = false
"#;

/// Every factory scene, parsed.
///
/// A scene that fails to parse is logged and skipped.
pub fn factory_scenes() -> Vec<Scene> {
    FACTORY_SCENES_TOML
        .iter()
        .filter_map(|(name, toml)| match Scene::from_toml(toml) {
            Ok(scene) => Some(scene),
            Err(e) => {
                tracing::warn!(scene = *name, error = %e, "factory scene failed to parse");
                None
            }
        })
        .collect()
}

/// A factory scene by name (case-insensitive).
pub fn get_factory_scene(name: &str) -> Option<Scene> {
    FACTORY_SCENES_TOML
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .and_then(|(_, toml)| Scene::from_toml(toml).ok())
}

/// Whether `name` is a factory scene.
pub fn is_factory_scene(name: &str) -> bool {
    FACTORY_SCENE_NAMES
        .iter()
        .any(|n| n.eq_ignore_ascii_case(name))
}

/// Resolve a factory scene name, a user scene name, or a path to a scene
/// file, in that order.
///
/// # Errors
///
/// [`ConfigError::SceneNotFound`] if nothing matches, or the load error of
/// the matched file.
pub fn resolve_scene(name: &str) -> Result<Scene, ConfigError> {
    if let Some(scene) = get_factory_scene(name) {
        return Ok(scene);
    }
    match crate::paths::find_scene(name) {
        Some(path) => Scene::load(path),
        None => Err(ConfigError::SceneNotFound(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_factory_scenes_parse_and_validate() {
        let scenes = factory_scenes();
        assert_eq!(scenes.len(), FACTORY_SCENE_NAMES.len());
        for scene in &scenes {
            scene
                .validate()
                .unwrap_or_else(|e| panic!("factory scene '{}' invalid: {e}", scene.name));
        }
    }

    #[test]
    fn test_names_match_table() {
        for (name, _) in FACTORY_SCENES_TOML {
            assert!(FACTORY_SCENE_NAMES.contains(name));
        }
    }

    #[test]
    fn test_get_factory_scene() {
        let scene = get_factory_scene("Echo_Trails").unwrap();
        assert_eq!(scene.name, "Echo Trails");
        assert_eq!(scene.settings.base_locked, Some(false));
        assert!(get_factory_scene("nonexistent").is_none());
    }

    #[test]
    fn test_is_factory_scene() {
        assert!(is_factory_scene("init"));
        assert!(is_factory_scene("CHOIR"));
        assert!(!is_factory_scene("my_custom_scene"));
    }

    #[test]
    fn test_resolve_scene() {
        assert_eq!(resolve_scene("liquid").unwrap().name, "Liquid");
        assert!(matches!(
            resolve_scene("no_such_scene_12345"),
            Err(ConfigError::SceneNotFound(_))
        ));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mine.toml");
        Scene::new("Mine").save(&path).unwrap();
        assert_eq!(resolve_scene(path.to_str().unwrap()).unwrap().name, "Mine");
    }
}
