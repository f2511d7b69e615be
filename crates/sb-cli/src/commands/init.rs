use std::path::Path;

use sb_build::ProjectDir;
use sb_build::project::DEFAULT_ID;

pub fn run(dir: &Path, title: Option<&str>) -> Result<(), String> {
    let title = match title {
        Some(t) => t.to_string(),
        None => default_title(dir),
    };
    let project = ProjectDir::init(dir, &title).map_err(|e| e.to_string())?;

    println!("Created project '{}' in {}/", title, project.root().display());
    println!("  project.yml  book.yml  order.yml");
    println!("  chapter, episode and scene '{DEFAULT_ID}' linked into the order");
    println!();
    println!("Get started:");
    println!("  storybuilder edit scene      # Write the first scene");
    println!("  storybuilder build           # Render outline, plot, script and novel");

    Ok(())
}

fn default_title(dir: &Path) -> String {
    dir.canonicalize()
        .ok()
        .as_deref()
        .unwrap_or(dir)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled".to_string())
}
