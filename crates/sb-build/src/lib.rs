//! Storybuilder project handling and build orchestration.
//!
//! A project is a directory of YAML and Markdown documents. [`ProjectDir`]
//! manages that layout; [`Builder`] reads it through [`ProjectSource`],
//! renders the outline, plot, script and novel, and writes them through an
//! [`OutputSink`].

/// The build pipeline.
pub mod builder;
/// `project.yml` and build options.
pub mod config;
/// On-disk project layout and file operations.
pub mod project;
/// Storage traits the builder reads from and writes to.
pub mod source;

pub use builder::{Builder, References};
pub use config::{BuildConfig, ProjectConfig};
pub use project::{FileKind, ProjectDir};
pub use source::{OutputSink, ProjectSource};
