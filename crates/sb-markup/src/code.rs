//! Story codes: the renderer-facing form of action records.

use std::fmt;

use crate::record::{ActionRecord, Target, Verb};

/// Semantic tag of a [`StoryCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeHead {
    /// Book title.
    BookTitle,
    /// Chapter title.
    ChapterTitle,
    /// Episode title.
    EpisodeTitle,
    /// Scene title.
    SceneTitle,
    /// Heading inside a scene.
    HeadTitle,
    /// Scene camera.
    SceneCamera,
    /// Scene stage.
    SceneStage,
    /// Scene year.
    SceneYear,
    /// Scene date.
    SceneDate,
    /// Scene time of day.
    SceneTime,
    /// Start of a scene body.
    SceneStart,
    /// End of a scene body.
    SceneEnd,
    /// Spoken line.
    Dialogue,
    /// Inner monologue.
    Monologue,
    /// Narration.
    Description,
    /// Line break.
    Break,
    /// Paragraph indent.
    Indent,
}

impl CodeHead {
    /// Kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::BookTitle => "book-title",
            Self::ChapterTitle => "chapter-title",
            Self::EpisodeTitle => "episode-title",
            Self::SceneTitle => "scene-title",
            Self::HeadTitle => "head-title",
            Self::SceneCamera => "scene-camera",
            Self::SceneStage => "scene-stage",
            Self::SceneYear => "scene-year",
            Self::SceneDate => "scene-date",
            Self::SceneTime => "scene-time",
            Self::SceneStart => "scene-start",
            Self::SceneEnd => "scene-end",
            Self::Dialogue => "dialogue",
            Self::Monologue => "monologue",
            Self::Description => "description",
            Self::Break => "break",
            Self::Indent => "indent",
        }
    }
}

impl fmt::Display for CodeHead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One renderable unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryCode {
    /// What the code is.
    pub head: CodeHead,
    /// Text to render.
    pub body: String,
    /// Speaker of dialogue and monologue, subject of description.
    pub foot: Option<String>,
}

impl StoryCode {
    /// A code without a foot.
    pub fn new(head: CodeHead, body: impl Into<String>) -> Self {
        Self {
            head,
            body: body.into(),
            foot: None,
        }
    }

    /// A code with an empty body.
    pub fn marker(head: CodeHead) -> Self {
        Self::new(head, "")
    }

    /// Set the foot.
    pub fn with_foot(mut self, foot: impl Into<String>) -> Self {
        self.foot = Some(foot.into());
        self
    }
}

/// Convert one record. Comments, free text and instructions yield nothing.
pub fn convert(record: &ActionRecord, target: Target) -> Option<StoryCode> {
    let code = match record {
        ActionRecord::BookTitle(t) => StoryCode::new(CodeHead::BookTitle, t),
        ActionRecord::ChapterTitle(t) => StoryCode::new(CodeHead::ChapterTitle, t),
        ActionRecord::EpisodeTitle(t) => StoryCode::new(CodeHead::EpisodeTitle, t),
        ActionRecord::SceneTitle(t) => StoryCode::new(CodeHead::SceneTitle, t),
        ActionRecord::HeadTitle(t) => StoryCode::new(CodeHead::HeadTitle, t),
        ActionRecord::SceneCamera(t) => StoryCode::new(CodeHead::SceneCamera, t),
        ActionRecord::SceneStage(t) => StoryCode::new(CodeHead::SceneStage, t),
        ActionRecord::SceneYear(t) => StoryCode::new(CodeHead::SceneYear, t),
        ActionRecord::SceneDate(t) => StoryCode::new(CodeHead::SceneDate, t),
        ActionRecord::SceneTime(t) => StoryCode::new(CodeHead::SceneTime, t),
        ActionRecord::SceneStart => StoryCode::marker(CodeHead::SceneStart),
        ActionRecord::SceneEnd => StoryCode::marker(CodeHead::SceneEnd),
        ActionRecord::Break => StoryCode::marker(CodeHead::Break),
        ActionRecord::Indent => StoryCode::marker(CodeHead::Indent),
        ActionRecord::Action(action) => {
            let head = match action.verb {
                Verb::Talk => CodeHead::Dialogue,
                Verb::Think => CodeHead::Monologue,
                Verb::Other(_) => CodeHead::Description,
            };
            let (primary, fallback) = match target {
                Target::Script => (&action.outline, &action.desc),
                Target::Novel => (&action.desc, &action.outline),
            };
            let body = if primary.is_empty() { fallback } else { primary };
            StoryCode::new(head, body).with_foot(&action.subject)
        }
        ActionRecord::Comment(_) | ActionRecord::Text(_) | ActionRecord::Instruction(_) => {
            return None;
        }
    };
    Some(code)
}

/// Convert a record stream, dropping records without a code.
pub fn convert_all(records: &[ActionRecord], target: Target) -> Vec<StoryCode> {
    records.iter().filter_map(|r| convert(r, target)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Action, Instruction};

    #[test]
    fn dialogue_in_script_uses_outline() {
        let record = ActionRecord::Action(Action::new("alice", Verb::Talk, "Hello there", ""));
        assert_eq!(
            convert(&record, Target::Script),
            Some(StoryCode::new(CodeHead::Dialogue, "Hello there").with_foot("alice"))
        );
    }

    #[test]
    fn novel_prefers_desc_and_falls_back() {
        let both = ActionRecord::Action(Action::new("a", Verb::Think, "short", "long"));
        let outline_only = ActionRecord::Action(Action::new("a", Verb::Talk, "short", ""));
        assert_eq!(convert(&both, Target::Novel).unwrap().body, "long");
        assert_eq!(convert(&outline_only, Target::Novel).unwrap().body, "short");
        assert_eq!(
            convert(&both, Target::Novel).unwrap().head,
            CodeHead::Monologue
        );
    }

    #[test]
    fn other_verbs_are_description() {
        let record = ActionRecord::Action(Action::new("a", Verb::Other("run".into()), "", "走った"));
        let code = convert(&record, Target::Script).unwrap();
        assert_eq!(code.head, CodeHead::Description);
        assert_eq!(code.body, "走った");
    }

    #[test]
    fn passthrough_and_dropped_records() {
        assert_eq!(
            convert(&ActionRecord::SceneStage("港".into()), Target::Novel),
            Some(StoryCode::new(CodeHead::SceneStage, "港"))
        );
        assert_eq!(
            convert(&ActionRecord::HeadTitle("Chapter One".into()), Target::Script),
            Some(StoryCode::new(CodeHead::HeadTitle, "Chapter One"))
        );
        assert_eq!(convert(&ActionRecord::Comment("# x".into()), Target::Script), None);
        assert_eq!(convert(&ActionRecord::Text("x".into()), Target::Script), None);
        let instruction = ActionRecord::Instruction(Instruction {
            subject: "P".into(),
            argument: String::new(),
        });
        assert_eq!(convert(&instruction, Target::Script), None);
    }

    #[test]
    fn convert_all_skips_dropped() {
        let codes = convert_all(
            &[
                ActionRecord::SceneStart,
                ActionRecord::Text("ignored".into()),
                ActionRecord::Break,
            ],
            Target::Novel,
        );
        let heads: Vec<_> = codes.iter().map(|c| c.head).collect();
        assert_eq!(heads, vec![CodeHead::SceneStart, CodeHead::Break]);
    }
}
