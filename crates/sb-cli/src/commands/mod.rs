pub mod add;
pub mod build;
pub mod clear_trash;
pub mod delete;
pub mod edit;
pub mod init;
pub mod list;
pub mod order;
pub mod rename;

use std::path::Path;

use clap::ValueEnum;
use sb_build::{FileKind, ProjectDir};

/// Kinds accepted by the file commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Book,
    Order,
    Chapter,
    Episode,
    Scene,
    Note,
    Person,
    Stage,
    Item,
    Word,
}

impl KindArg {
    /// The per-id file kind, or `None` for the single book and order documents.
    pub fn file_kind(self) -> Option<FileKind> {
        match self {
            Self::Book | Self::Order => None,
            Self::Chapter => Some(FileKind::Chapter),
            Self::Episode => Some(FileKind::Episode),
            Self::Scene => Some(FileKind::Scene),
            Self::Note => Some(FileKind::Note),
            Self::Person => Some(FileKind::Person),
            Self::Stage => Some(FileKind::Stage),
            Self::Item => Some(FileKind::Item),
            Self::Word => Some(FileKind::Word),
        }
    }

    /// Like [`KindArg::file_kind`], but an error for book and order.
    pub fn require_file_kind(self, command: &str) -> Result<FileKind, String> {
        self.file_kind().ok_or_else(|| {
            let name = self.to_possible_value().map(|v| v.get_name().to_string());
            format!(
                "'{command}' does not apply to {}",
                name.unwrap_or_default()
            )
        })
    }
}

/// Order-tree levels accepted by `push` and `reject`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NodeArg {
    Chapter,
    Episode,
    Scene,
}

impl NodeArg {
    pub fn file_kind(self) -> FileKind {
        match self {
            Self::Chapter => FileKind::Chapter,
            Self::Episode => FileKind::Episode,
            Self::Scene => FileKind::Scene,
        }
    }
}

/// Open the project rooted at `dir`.
fn open_project(dir: &Path) -> Result<ProjectDir, String> {
    ProjectDir::open(dir).map_err(|e| format!("{e} (run 'storybuilder init' first)"))
}
