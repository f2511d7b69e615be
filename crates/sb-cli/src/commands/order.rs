use std::path::Path;

use sb_build::ProjectSource;

use super::NodeArg;

pub fn push(
    dir: &Path,
    kind: NodeArg,
    name: &str,
    to: Option<&str>,
    chapter: Option<&str>,
) -> Result<(), String> {
    let project = super::open_project(dir)?;
    let file_kind = kind.file_kind();
    if !project.exists(file_kind, name) {
        return Err(format!(
            "{file_kind} not found: \"{name}\" (create it with 'storybuilder add {file_kind} {name}')"
        ));
    }

    let order = project.load_order().map_err(|e| e.to_string())?;
    let updated = match (kind, to) {
        (NodeArg::Chapter, _) => order.insert_chapter(name),
        (NodeArg::Episode, Some(chapter)) => order.insert_episode(name, chapter),
        (NodeArg::Scene, Some(episode)) => match chapter {
            Some(chapter) => order.insert_scene_under(name, chapter, episode),
            None => order.insert_scene(name, episode),
        },
        (_, None) => return Err(format!("--to <parent> is required for a {file_kind}")),
    }
    .map_err(|e| e.to_string())?;
    project.save_order(&updated).map_err(|e| e.to_string())?;

    match to {
        Some(parent) => println!("  Pushed {file_kind} '{name}' into '{parent}'"),
        None => println!("  Pushed {file_kind} '{name}'"),
    }
    Ok(())
}

pub fn reject(dir: &Path, kind: NodeArg, name: &str) -> Result<(), String> {
    let project = super::open_project(dir)?;
    let order = project.load_order().map_err(|e| e.to_string())?;
    let updated = match kind {
        NodeArg::Chapter => order.remove_chapter(name),
        NodeArg::Episode => order.remove_episode(name),
        NodeArg::Scene => order.remove_scene(name),
    }
    .map_err(|e| e.to_string())?;
    project.save_order(&updated).map_err(|e| e.to_string())?;
    println!("  Rejected {} '{name}' from the order", kind.file_kind());
    Ok(())
}
