use std::fmt;

/// Which rendering an action stream is being prepared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    /// Screenplay: short `outline` text, speakers shown.
    Script,
    /// Prose: long `desc` text.
    #[default]
    Novel,
}

/// What an action line's subject does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    /// Spoken line.
    Talk,
    /// Inner monologue.
    Think,
    /// Anything else, rendered as description.
    Other(String),
}

impl Verb {
    /// Parse a verb as written in an action header.
    pub fn parse(s: &str) -> Self {
        match s {
            "talk" => Self::Talk,
            "think" => Self::Think,
            other => Self::Other(other.to_string()),
        }
    }

    /// The verb as written.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Talk => "talk",
            Self::Think => "think",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `[subject:verb:outline]desc # note` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Acting or speaking entity id.
    pub subject: String,
    /// What the subject does.
    pub verb: Verb,
    /// Short form, used by the script.
    pub outline: String,
    /// Long form, used by the novel.
    pub desc: String,
    /// Reserved modifiers.
    pub flags: Vec<String>,
    /// Inline comment.
    pub note: String,
}

impl Action {
    /// An action with no flags and no note.
    pub fn new(
        subject: impl Into<String>,
        verb: Verb,
        outline: impl Into<String>,
        desc: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            verb,
            outline: outline.into(),
            desc: desc.into(),
            flags: Vec::new(),
            note: String::new(),
        }
    }
}

/// An `!X argument` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// One-letter instruction code (`P`, `E`, `B`, `A`).
    pub subject: String,
    /// Everything after the code, e.g. `short=origin` for `A`.
    pub argument: String,
}

/// One structured line of the story stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRecord {
    /// `# ...` comment, kept verbatim.
    Comment(String),
    /// `## ...` heading inside a scene.
    HeadTitle(String),
    /// Bracketed action line.
    Action(Action),
    /// Free text line.
    Text(String),
    /// `!` instruction line.
    Instruction(Instruction),
    /// Book title.
    BookTitle(String),
    /// Chapter title.
    ChapterTitle(String),
    /// Episode title.
    EpisodeTitle(String),
    /// Scene title.
    SceneTitle(String),
    /// Scene camera.
    SceneCamera(String),
    /// Scene stage.
    SceneStage(String),
    /// Scene year.
    SceneYear(String),
    /// Scene date.
    SceneDate(String),
    /// Scene time of day.
    SceneTime(String),
    /// Start of a scene body.
    SceneStart,
    /// End of a scene body.
    SceneEnd,
    /// Line break marker.
    Break,
    /// Paragraph indent marker.
    Indent,
}

impl ActionRecord {
    /// The kind name, as used in messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Comment(_) => "comment",
            Self::HeadTitle(_) => "head-title",
            Self::Action(_) => "action",
            Self::Text(_) => "text",
            Self::Instruction(_) => "instruction",
            Self::BookTitle(_) => "book-title",
            Self::ChapterTitle(_) => "chapter-title",
            Self::EpisodeTitle(_) => "episode-title",
            Self::SceneTitle(_) => "scene-title",
            Self::SceneCamera(_) => "scene-camera",
            Self::SceneStage(_) => "scene-stage",
            Self::SceneYear(_) => "scene-year",
            Self::SceneDate(_) => "scene-date",
            Self::SceneTime(_) => "scene-time",
            Self::SceneStart => "scene-start",
            Self::SceneEnd => "scene-end",
            Self::Break => "break",
            Self::Indent => "indent",
        }
    }
}
