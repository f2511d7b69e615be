use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use sb_build::ProjectDir;
use sb_build::project::DEFAULT_ID;

use super::KindArg;

const DEFAULT_EDITOR: &str = "vi";

pub fn run(dir: &Path, kind: KindArg, name: Option<&str>) -> Result<(), String> {
    let project = super::open_project(dir)?;
    let path = target_path(&project, kind, name.unwrap_or(DEFAULT_ID));
    if !path.is_file() {
        return Err(format!("file not found: {}", path.display()));
    }

    let editor = env::var("EDITOR")
        .ok()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string());
    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .map_err(|e| format!("cannot launch editor '{editor}': {e}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("editor '{editor}' exited with {status}"))
    }
}

fn target_path(project: &ProjectDir, kind: KindArg, name: &str) -> PathBuf {
    match kind.file_kind() {
        Some(file_kind) => project.path(file_kind, name),
        None if kind == KindArg::Order => project.order_path(),
        None => project.book_path(),
    }
}
