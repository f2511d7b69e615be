//! Renderers for Storybuilder artifacts.
//!
//! Every renderer returns a sequence of output fragments. A fragment ends in
//! `\n` when it ends a line; the written file is their concatenation. Name
//! substitution is left to the caller.

/// Table of contents shared by every artifact.
pub mod contents;
/// Prose rendering.
pub mod novel;
/// Per-level outlines.
pub mod outline;
/// Per-level five-part plots.
pub mod plot;
/// Screenplay rendering.
pub mod script;
/// Shared text helpers.
pub mod text;

use sb_core::BuildRecord;

pub use contents::contents;
pub use novel::NovelFormatter;
pub use outline::outline;
pub use plot::plot;
pub use script::ScriptFormatter;
pub use text::{break_line, complete_punctuation};

/// Assemble an artifact: contents, a break line, then `body`.
pub fn artifact(records: &[BuildRecord], body: Vec<String>) -> Vec<String> {
    let mut out = contents(records);
    out.push(break_line());
    out.extend(body);
    out
}
