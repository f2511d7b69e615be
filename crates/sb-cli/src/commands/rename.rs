use std::path::Path;

use super::KindArg;

pub fn run(dir: &Path, kind: KindArg, old: &str, new: &str) -> Result<(), String> {
    let project = super::open_project(dir)?;
    let kind = kind.require_file_kind("rename")?;
    project.rename(kind, old, new).map_err(|e| e.to_string())?;
    println!("  Renamed {kind} '{old}' to '{new}'");
    Ok(())
}
