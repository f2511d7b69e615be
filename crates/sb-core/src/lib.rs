//! Core types for Storybuilder: the order tree, node data, name database,
//! and tag substitution.
//!
//! This crate knows nothing about markup or rendering. It defines the data
//! the compilation pipeline works on and the error type every stage shares.

/// Node documents (book, chapter, episode, scene, person, ...).
pub mod data;
/// Error types used throughout the workspace.
pub mod error;
/// Front-matter splitting for Markdown documents.
pub mod frontmatter;
/// Name database and per-person calling tables.
pub mod names;
/// The book → chapter → episode → scene order tree.
pub mod order;
/// Build event reporting.
pub mod report;
/// Loaded nodes in reading order.
pub mod story;
/// `$key` tag substitution.
pub mod tag;

/// Re-export node data types.
pub use data::{
    BookData, ChapterData, EntityKind, EpisodeData, ItemData, NoteData, PersonData, PlotData,
    SceneData, StageData, WordData,
};
/// Re-export error types.
pub use error::{StoryError, StoryResult};
/// Re-export name types.
pub use names::{Callings, NameDatabase};
/// Re-export order tree types.
pub use order::{NodeKind, NodeRef, OrderTree};
/// Re-export reporting types.
pub use report::{BuildEvent, NullReporter, OutputKind, Reporter, TracingReporter};
/// Re-export build record types.
pub use story::{BuildRecord, NodeData};
