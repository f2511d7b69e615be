use std::path::PathBuf;

/// Alias for `Result<T, StoryError>`.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors that can occur while loading, editing, or compiling a story project.
#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    /// The order document does not have the expected book/chapter/episode/scene shape.
    #[error("invalid order structure: {0}")]
    InvalidStructure(String),

    /// A referenced node or entity does not exist.
    #[error("{kind} not found: \"{id}\"")]
    NotFound {
        /// What was looked up (chapter, episode, person, ...).
        kind: &'static str,
        /// The identifier that was not found.
        id: String,
    },

    /// A file or order entry that should be new already exists.
    #[error("{kind} already exists: \"{id}\"")]
    AlreadyExists {
        /// What was being created (chapter, person, ...).
        kind: &'static str,
        /// The identifier that is taken.
        id: String,
    },

    /// A scene line could not be parsed.
    #[error("markup syntax error: {message} in \"{line}\"")]
    MarkupSyntax {
        /// The offending line.
        line: String,
        /// What is wrong with it.
        message: String,
    },

    /// A markup error located inside a scene document.
    #[error("scene \"{scene}\", line {line_no}: {source}")]
    InScene {
        /// Scene identifier.
        scene: String,
        /// 1-based line number within the scene file.
        line_no: usize,
        /// The underlying error.
        #[source]
        source: Box<StoryError>,
    },

    /// An instruction line used a subject other than `P`, `E`, `B` or `A`.
    #[error("unknown instruction: \"{0}\"")]
    UnknownInstruction(String),

    /// Node data failed validation when loaded.
    #[error("invalid data in {}: {message}", path.display())]
    InvalidData {
        /// The file that was being loaded.
        path: PathBuf,
        /// Description of the problem.
        message: String,
    },

    /// A file could not be read or written.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A YAML document could not be parsed or emitted.
    #[error("YAML error in {}: {source}", path.display())]
    Yaml {
        /// The document involved.
        path: PathBuf,
        /// The underlying serde_yaml error.
        #[source]
        source: serde_yaml::Error,
    },
}

impl StoryError {
    /// Build a `NotFound` error.
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Build an `AlreadyExists` error.
    pub fn already_exists(kind: &'static str, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            kind,
            id: id.into(),
        }
    }

    /// Build a `MarkupSyntax` error.
    pub fn markup(line: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MarkupSyntax {
            line: line.into(),
            message: message.into(),
        }
    }

    /// Attach scene location to an error raised while processing a scene body.
    pub fn in_scene(self, scene: impl Into<String>, line_no: usize) -> Self {
        Self::InScene {
            scene: scene.into(),
            line_no,
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let e = StoryError::not_found("chapter", "prologue");
        assert_eq!(e.to_string(), "chapter not found: \"prologue\"");
    }

    #[test]
    fn already_exists_display() {
        let e = StoryError::already_exists("person", "taro");
        assert_eq!(e.to_string(), "person already exists: \"taro\"");
    }

    #[test]
    fn in_scene_wraps_source() {
        let e = StoryError::markup("[a:b]", "expected 3 header fields, found 2").in_scene("intro", 4);
        assert_eq!(
            e.to_string(),
            "scene \"intro\", line 4: markup syntax error: expected 3 header fields, found 2 in \"[a:b]\""
        );
    }
}
