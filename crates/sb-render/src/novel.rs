use sb_markup::{CodeHead, StoryCode};

use crate::text::{complete_punctuation, heading};

/// Renders story codes as prose.
///
/// Scene metadata and in-scene headings are not part of the prose and are
/// dropped. Dialogue is shown without its speaker.
#[derive(Debug, Clone, Default)]
pub struct NovelFormatter {
    show_scene_title: bool,
}

impl NovelFormatter {
    /// A formatter that hides scene titles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show each scene's title as a level-4 heading.
    pub fn with_scene_title(mut self, show: bool) -> Self {
        self.show_scene_title = show;
        self
    }

    /// Render `codes` into output fragments.
    pub fn format(&self, codes: &[StoryCode]) -> Vec<String> {
        codes.iter().filter_map(|code| self.render(code)).collect()
    }

    fn render(&self, code: &StoryCode) -> Option<String> {
        let body = code.body.as_str();
        let text = match code.head {
            CodeHead::BookTitle => heading(1, body),
            CodeHead::ChapterTitle => heading(2, body),
            CodeHead::EpisodeTitle => heading(3, body),
            CodeHead::SceneTitle if self.show_scene_title => heading(4, body),
            CodeHead::Dialogue => format!("「{body}」"),
            CodeHead::Monologue | CodeHead::Description => complete_punctuation(body),
            CodeHead::Break => "\n".to_string(),
            CodeHead::Indent => "　".to_string(),
            CodeHead::SceneTitle
            | CodeHead::HeadTitle
            | CodeHead::SceneCamera
            | CodeHead::SceneStage
            | CodeHead::SceneYear
            | CodeHead::SceneDate
            | CodeHead::SceneTime
            | CodeHead::SceneStart
            | CodeHead::SceneEnd => return None,
        };
        Some(text)
    }
}
