//! Scene markup for Storybuilder.
//!
//! A scene body is parsed line by line into [`ActionRecord`]s, run through
//! the instruction pass (layout markers and subject aliases) and the calling
//! pass (per-speaker tags), then converted into [`StoryCode`]s for the
//! renderers.

/// Per-subject calling tag substitution.
pub mod calling;
/// Record-to-code conversion.
pub mod code;
/// Pretty rendering of located markup errors.
pub mod diagnostics;
/// `!` instruction processing.
pub mod instruction;
/// Line parser.
pub mod parser;
/// Action record types.
pub mod record;

pub use calling::apply_callings;
pub use code::{CodeHead, StoryCode, convert, convert_all};
pub use diagnostics::Diagnostic;
pub use instruction::{InstructionProcessor, apply_instructions, process_scene};
pub use parser::parse_line;
pub use record::{Action, ActionRecord, Instruction, Target, Verb};
