use sb_core::{BuildRecord, NodeKind};

use crate::text::break_line;

/// Levels in rendering order.
pub(crate) const LEVELS: [NodeKind; 4] = [
    NodeKind::Book,
    NodeKind::Chapter,
    NodeKind::Episode,
    NodeKind::Scene,
];

fn section_heading(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Book => "## BOOK outline\n\n",
        NodeKind::Chapter => "## Chapter outlines\n\n",
        NodeKind::Episode => "## Episode outlines\n\n",
        NodeKind::Scene => "## Scene outlines\n\n",
    }
}

/// Outline body: one section per level, each entry a bold title followed
/// by the indented outline. Sections are separated by break lines.
pub fn outline(records: &[BuildRecord]) -> Vec<String> {
    let mut out = Vec::new();
    for (idx, kind) in LEVELS.into_iter().enumerate() {
        if idx > 0 {
            out.push(break_line());
        }
        out.push(section_heading(kind).to_string());
        for record in records.iter().filter(|r| r.kind == kind) {
            out.push(format!("**{}**\n", record.title()));
            out.push(format!("    {}\n\n", record.data.outline()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use sb_core::data::{ContainerData, SceneData};

    use super::*;

    #[test]
    fn sections_in_level_order() {
        let records = vec![
            BuildRecord::book(ContainerData {
                title: "Book".into(),
                outline: "A voyage.".into(),
                ..ContainerData::default()
            }),
            BuildRecord::container(
                NodeKind::Chapter,
                "c1",
                ContainerData {
                    title: "Start".into(),
                    outline: "They set out.".into(),
                    ..ContainerData::default()
                },
            ),
            BuildRecord::scene(
                "s1",
                SceneData {
                    title: "Harbor".into(),
                    outline: "Fog.".into(),
                    ..SceneData::default()
                },
            ),
        ];
        let text = outline(&records).concat();
        let dashes = "-".repeat(64);
        let expected = format!(
            "## BOOK outline\n\n**Book**\n    A voyage.\n\n{dashes}\n\
             ## Chapter outlines\n\n**Start**\n    They set out.\n\n{dashes}\n\
             ## Episode outlines\n\n{dashes}\n\
             ## Scene outlines\n\n**Harbor**\n    Fog.\n\n"
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn empty_story_still_has_all_headings() {
        let out = outline(&[]);
        assert_eq!(out.len(), 7);
        assert_eq!(out[0], "## BOOK outline\n\n");
        assert_eq!(out[6], "## Scene outlines\n\n");
    }
}
