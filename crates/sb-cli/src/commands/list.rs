use std::fs;
use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use sb_build::{FileKind, ProjectDir, ProjectSource};
use sb_core::{NoteData, StoryError, StoryResult};

use super::KindArg;

pub fn run(dir: &Path, kind: KindArg) -> Result<(), String> {
    let project = super::open_project(dir)?;

    let rows: Vec<(String, String)> = match kind.file_kind() {
        None if kind == KindArg::Order => {
            print!("{}", project.order_text().map_err(|e| e.to_string())?);
            return Ok(());
        }
        None => {
            let book = project.load_book().map_err(|e| e.to_string())?;
            vec![("book".to_string(), book.title)]
        }
        Some(file_kind) => {
            let ids = project.list(file_kind).map_err(|e| e.to_string())?;
            ids.into_iter()
                .map(|id| {
                    let label = describe(&project, file_kind, &id)?;
                    Ok((id, label))
                })
                .collect::<StoryResult<Vec<_>>>()
                .map_err(|e| e.to_string())?
        }
    };

    if rows.is_empty() {
        println!("  No files found.");
        return Ok(());
    }

    let label_header = match kind.file_kind() {
        Some(FileKind::Person | FileKind::Stage | FileKind::Item | FileKind::Word) => "Name",
        _ => "Title",
    };
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", label_header]);
    for (id, label) in &rows {
        let label = if label.is_empty() { "—" } else { label.as_str() };
        table.add_row(vec![id.as_str(), label]);
    }

    println!("{table}");
    println!();
    println!("  {} files", rows.len());

    Ok(())
}

/// Title or display name of one file.
fn describe(project: &ProjectDir, kind: FileKind, id: &str) -> StoryResult<String> {
    Ok(match kind {
        FileKind::Chapter => project.load_chapter(id)?.title,
        FileKind::Episode => project.load_episode(id)?.title,
        FileKind::Scene => project.load_scene(id)?.title,
        FileKind::Note => {
            let path = project.path(kind, id);
            let text = fs::read_to_string(&path).map_err(|source| StoryError::Io {
                path: path.clone(),
                source,
            })?;
            NoteData::from_markdown(&path, &text)?.title
        }
        FileKind::Person => project.load_person(id)?.name,
        FileKind::Stage => project.load_stage(id)?.name,
        FileKind::Item => project.load_item(id)?.name,
        FileKind::Word => project.load_word(id)?.name,
    })
}
