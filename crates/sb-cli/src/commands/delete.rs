use std::path::Path;

use super::KindArg;

pub fn run(dir: &Path, kind: KindArg, name: &str) -> Result<(), String> {
    let project = super::open_project(dir)?;
    let kind = kind.require_file_kind("delete")?;
    let target = project.delete(kind, name).map_err(|e| e.to_string())?;
    println!("  Moved {kind} '{name}' to {}", target.display());
    Ok(())
}
