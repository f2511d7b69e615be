use std::fmt;
use std::ops::Range;

use ariadne::{Color, Label, Report, ReportKind, Source};
use sb_core::StoryError;

/// A markup error located in a scene file.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Character range of the offending line in the source.
    pub span: Range<usize>,
    /// Headline message.
    pub message: String,
    /// Text attached to the highlighted line.
    pub label: Option<String>,
}

impl Diagnostic {
    /// An error diagnostic over `span`.
    pub fn error(span: Range<usize>, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            label: None,
        }
    }

    /// Attach a label to the highlighted span.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Build a diagnostic for an error raised while parsing a scene body.
    ///
    /// Only `InScene` errors carry a location; everything else returns `None`.
    pub fn from_error(err: &StoryError, source: &str) -> Option<Self> {
        let StoryError::InScene {
            scene,
            line_no,
            source: inner,
        } = err
        else {
            return None;
        };
        let span = line_span(source, *line_no)?;
        let (message, label) = match inner.as_ref() {
            StoryError::MarkupSyntax { message, .. } => {
                ("markup syntax error".to_string(), message.clone())
            }
            other => (other.to_string(), other.to_string()),
        };
        Some(Self::error(span, format!("{message} in scene \"{scene}\"")).with_label(label))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

/// Character range of the 1-based `line_no` in `source`, without its newline.
pub fn line_span(source: &str, line_no: usize) -> Option<Range<usize>> {
    let mut start = 0;
    for (idx, line) in source.split('\n').enumerate() {
        let len = line.trim_end_matches('\r').chars().count();
        if idx + 1 == line_no {
            return Some(start..start + len);
        }
        start += line.chars().count() + 1;
    }
    None
}

/// Render diagnostics using ariadne for pretty terminal output.
pub fn render_diagnostics(source: &str, filename: &str, diagnostics: &[Diagnostic]) -> String {
    let mut output = Vec::new();

    for diag in diagnostics {
        let span = (filename, diag.span.clone());
        let label_text = diag.label.as_deref().unwrap_or(&diag.message);
        Report::build(ReportKind::Error, span)
            .with_message(&diag.message)
            .with_label(
                Label::new((filename, diag.span.clone()))
                    .with_message(label_text)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut output)
            .ok();
    }

    String::from_utf8(output).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = "---\ntitle: 港\n---\n[taro:talk:やあ]\n[broken]\n";

    fn scene_error() -> StoryError {
        StoryError::markup("[broken]", "expected 3 header fields (subject:verb:outline), found 1")
            .in_scene("harbor", 5)
    }

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic::error(0..5, "markup syntax error in scene \"harbor\"");
        assert_eq!(d.to_string(), "error: markup syntax error in scene \"harbor\"");
    }

    #[test]
    fn line_span_counts_characters() {
        assert_eq!(line_span(SCENE, 1), Some(0..3));
        assert_eq!(line_span(SCENE, 2), Some(4..12));
        assert_eq!(line_span(SCENE, 5), Some(32..40));
        assert_eq!(line_span(SCENE, 42), None);
    }

    #[test]
    fn from_error_locates_the_line() {
        let d = Diagnostic::from_error(&scene_error(), SCENE).unwrap();
        assert_eq!(d.span, 32..40);
        assert_eq!(d.message, "markup syntax error in scene \"harbor\"");
        assert!(d.label.unwrap().contains("header fields"));
    }

    #[test]
    fn unlocated_errors_have_no_diagnostic() {
        let err = StoryError::UnknownInstruction("Z".into());
        assert!(Diagnostic::from_error(&err, SCENE).is_none());
    }

    #[test]
    fn render_produces_output() {
        let d = Diagnostic::from_error(&scene_error(), SCENE).unwrap();
        let output = render_diagnostics(SCENE, "scenes/harbor.md", &[d]);
        assert!(!output.is_empty());
        assert!(output.contains("markup syntax error"));
    }
}
