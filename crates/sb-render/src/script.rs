//! Screenplay rendering.
//!
//! Scene metadata codes arrive before `scene-start` and are held until it,
//! then emitted as a single `○stage（time）` heading.

use sb_markup::{CodeHead, StoryCode};

use crate::text::{complete_punctuation, heading};

#[derive(Debug, Default)]
struct SceneHeader {
    camera: String,
    stage: String,
    year: String,
    date: String,
    time: String,
}

/// Renders story codes as a script.
#[derive(Debug, Clone, Default)]
pub struct ScriptFormatter {
    detail: bool,
    speaker_prefix: String,
}

impl ScriptFormatter {
    /// A formatter with plain scene headings and raw speaker ids.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append year, date and camera to scene headings.
    pub fn with_detail(mut self, detail: bool) -> Self {
        self.detail = detail;
        self
    }

    /// Write speakers as `{prefix}{id}` so name substitution resolves them.
    pub fn with_speaker_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.speaker_prefix = prefix.into();
        self
    }

    /// Render `codes` into output fragments.
    pub fn format(&self, codes: &[StoryCode]) -> Vec<String> {
        let mut out = Vec::new();
        let mut header = SceneHeader::default();

        for code in codes {
            let body = code.body.as_str();
            match code.head {
                CodeHead::BookTitle => out.push(heading(1, body)),
                CodeHead::ChapterTitle => out.push(heading(2, body)),
                CodeHead::EpisodeTitle => out.push(heading(3, body)),
                CodeHead::SceneTitle => out.push(heading(4, body)),
                CodeHead::HeadTitle => out.push(format!("◆{body}\n")),
                CodeHead::SceneCamera => header.camera = body.to_string(),
                CodeHead::SceneStage => header.stage = body.to_string(),
                CodeHead::SceneYear => header.year = body.to_string(),
                CodeHead::SceneDate => header.date = body.to_string(),
                CodeHead::SceneTime => header.time = body.to_string(),
                CodeHead::SceneStart => out.push(self.scene_heading(&header)),
                CodeHead::SceneEnd => {
                    out.push("\n".to_string());
                    header = SceneHeader::default();
                }
                CodeHead::Dialogue => out.push(format!("{}「{body}」", self.speaker(code))),
                CodeHead::Monologue => out.push(format!("{}Ｍ『{body}』", self.speaker(code))),
                CodeHead::Description => out.push(complete_punctuation(body)),
                CodeHead::Break => out.push("\n".to_string()),
                CodeHead::Indent => out.push("　".to_string()),
            }
        }
        out
    }

    fn speaker(&self, code: &StoryCode) -> String {
        format!(
            "{}{}",
            self.speaker_prefix,
            code.foot.as_deref().unwrap_or_default()
        )
    }

    fn scene_heading(&self, header: &SceneHeader) -> String {
        let mut line = format!("○{}（{}）", header.stage, header.time);
        if self.detail {
            for part in [&header.year, &header.date] {
                if !part.is_empty() {
                    line.push(' ');
                    line.push_str(part);
                }
            }
            if !header.camera.is_empty() {
                line.push_str(&format!(" [{}]", header.camera));
            }
        }
        line.push('\n');
        line
    }
}
