use sb_core::{BuildRecord, NodeKind};

use crate::outline::LEVELS;
use crate::text::break_line;

const EMPTY_PART: &str = "-";
const PART_SEPARATOR: &str = "    ↓\n";

fn section_heading(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Book => "## BOOK plot\n\n",
        NodeKind::Chapter => "## Chapter plots\n\n",
        NodeKind::Episode => "## Episode plots\n\n",
        NodeKind::Scene => "## Scene plots\n\n",
    }
}

/// Plot body: per level, each entry's title and its six plot parts from
/// setup to resolution.
pub fn plot(records: &[BuildRecord]) -> Vec<String> {
    let mut out = Vec::new();
    for (idx, kind) in LEVELS.into_iter().enumerate() {
        if idx > 0 {
            out.push(break_line());
        }
        out.push(section_heading(kind).to_string());
        for record in records.iter().filter(|r| r.kind == kind) {
            out.push(format!("**{}**\n", record.title()));
            for (n, part) in record.data.plot().parts().into_iter().enumerate() {
                if n > 0 {
                    out.push(PART_SEPARATOR.to_string());
                }
                let part = if part.is_empty() { EMPTY_PART } else { part };
                out.push(format!("    {part}\n"));
            }
            out.push("\n".to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use sb_core::data::{ContainerData, PlotData};

    use super::*;

    #[test]
    fn parts_are_chained_with_arrows() {
        let records = vec![BuildRecord::book(ContainerData {
            title: "Book".into(),
            plot: PlotData {
                setup: "港町".into(),
                climax: "嵐".into(),
                ..PlotData::default()
            },
            ..ContainerData::default()
        })];
        let out = plot(&records);
        let book_section: String = out
            .iter()
            .take_while(|f| !f.starts_with('-'))
            .map(String::as_str)
            .collect();
        insta::assert_snapshot!(book_section, @r"
## BOOK plot

**Book**
    港町
    ↓
    -
    ↓
    -
    ↓
    -
    ↓
    嵐
    ↓
    -
");
    }

    #[test]
    fn level_headings() {
        let text = plot(&[]).concat();
        for heading in ["## BOOK plot", "## Chapter plots", "## Episode plots", "## Scene plots"] {
            assert!(text.contains(heading), "missing {heading}");
        }
    }
}
