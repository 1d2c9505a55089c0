//! Scene listing and inspection.

use avfx_config::{Scene, factory_scenes, list_user_scenes, scene_name_from_path, user_scenes_dir};
use clap::Args;

use super::common::load_scene;

#[derive(Args)]
pub struct ScenesArgs {
    /// Print one scene as TOML
    #[arg(long, value_name = "NAME")]
    show: Option<String>,
}

pub fn run(args: ScenesArgs) -> anyhow::Result<()> {
    if let Some(name) = &args.show {
        let scene = load_scene(name)?;
        scene.validate()?;
        print!("{}", scene.to_toml()?);
        return Ok(());
    }

    println!("Factory Scenes:");
    println!("===============");
    for scene in factory_scenes() {
        let key = scene_key(&scene);
        let desc = scene.description.as_deref().unwrap_or("");
        println!("  {key:16} - {desc}");
    }
    println!();

    println!("User Scenes:");
    println!("============");
    let user = list_user_scenes();
    if user.is_empty() {
        println!("  (none)");
    } else {
        for path in user {
            let name = scene_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
            match Scene::load(&path) {
                Ok(scene) => {
                    let desc = scene.description.as_deref().unwrap_or("");
                    println!("  {name:16} - {desc}");
                }
                Err(e) => println!("  {name:16} - (unreadable: {e})"),
            }
        }
    }
    println!();
    println!("User scenes directory: {}", user_scenes_dir().display());

    Ok(())
}

/// Lookup key of a factory scene: its name lowercased with `_` for spaces.
fn scene_key(scene: &Scene) -> String {
    scene.name.to_lowercase().replace(' ', "_")
}
