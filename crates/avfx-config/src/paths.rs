//! Platform-specific paths for user scenes.
//!
//! - **User scenes**: `~/.config/avfx/scenes/` (Linux),
//!   `~/Library/Application Support/avfx/scenes/` (macOS),
//!   `%APPDATA%\avfx\scenes\` (Windows)

use std::path::{Path, PathBuf};

const APP_NAME: &str = "avfx";
const SCENES_SUBDIR: &str = "scenes";

/// Returns the user configuration directory, or `./avfx` if the platform
/// config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the user scenes directory.
pub fn user_scenes_dir() -> PathBuf {
    user_config_dir().join(SCENES_SUBDIR)
}

/// Find a scene file by name.
///
/// `name` may be a path to an existing file, or a scene name (with or
/// without `.toml`) looked up in the user scenes directory.
pub fn find_scene(name: &str) -> Option<PathBuf> {
    find_scene_in(name, &user_scenes_dir())
}

fn find_scene_in(name: &str, dir: &Path) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    };
    let user_path = dir.join(filename);
    user_path.is_file().then_some(user_path)
}

/// Ensure the user scenes directory exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_scenes_dir() -> Result<PathBuf, crate::ConfigError> {
    let dir = user_scenes_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| crate::ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// List scene files in the user scenes directory, sorted by path.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_user_scenes() -> Vec<PathBuf> {
    list_scenes_in_dir(&user_scenes_dir())
}

fn list_scenes_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut scenes: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    scenes.sort();
    scenes
}

/// Scene name from a file path (the file stem).
///
/// ```rust
/// use avfx_config::paths::scene_name_from_path;
/// use std::path::Path;
///
/// let name = scene_name_from_path(Path::new("/path/to/dusk.toml"));
/// assert_eq!(name, Some("dusk".to_string()));
/// ```
pub fn scene_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(ToString::to_string)
}
