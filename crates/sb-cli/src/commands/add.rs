use std::path::Path;

use super::KindArg;

pub fn run(dir: &Path, kind: KindArg, name: &str) -> Result<(), String> {
    let project = super::open_project(dir)?;
    let kind = kind.require_file_kind("add")?;
    let path = project.add(kind, name).map_err(|e| e.to_string())?;
    println!("  Created {kind} '{name}' at {}", path.display());
    if kind.node_kind().is_some() {
        println!("  Link it into the story with: storybuilder push {kind} {name}");
    }
    Ok(())
}
