use std::path::Path;

pub fn run(dir: &Path) -> Result<(), String> {
    let project = super::open_project(dir)?;
    let removed = project.clear_trash().map_err(|e| e.to_string())?;
    match removed {
        0 => println!("  Trash is already empty."),
        1 => println!("  Removed 1 file from trash."),
        n => println!("  Removed {n} files from trash."),
    }
    Ok(())
}
