use sb_core::{BuildRecord, NodeKind};

/// Table of contents: book title, `====`, then every chapter, episode and
/// scene numbered with its own running counter across the book.
pub fn contents(records: &[BuildRecord]) -> Vec<String> {
    let mut out = Vec::new();
    let book_title = records
        .iter()
        .find(|r| r.kind == NodeKind::Book)
        .map(BuildRecord::title)
        .unwrap_or_default();
    out.push(format!("{book_title}\n"));
    out.push("====\n\n".to_string());
    out.push("## Contents\n\n".to_string());

    let (mut chapter, mut episode, mut scene) = (0, 0, 0);
    for record in records {
        let title = record.title();
        match record.kind {
            NodeKind::Book => {}
            NodeKind::Chapter => {
                chapter += 1;
                out.push(format!("{chapter}. {title}\n"));
            }
            NodeKind::Episode => {
                episode += 1;
                out.push(format!("    {episode}. {title}\n"));
            }
            NodeKind::Scene => {
                scene += 1;
                out.push(format!("        {scene}. {title}\n"));
            }
        }
    }
    out
}
