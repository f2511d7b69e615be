//! Splitting Markdown documents into a YAML front-matter block and body lines.

/// Line that opens and closes a front-matter block.
pub const DELIMITER: &str = "---";

/// A Markdown document split into its parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// YAML source between the delimiters, if the document has a block.
    pub front: Option<String>,
    /// Every line outside the block, newline-stripped, in order.
    pub body: Vec<String>,
    /// 1-based line number in the source text of each `body` line.
    pub line_numbers: Vec<usize>,
}

/// Split a document on its first `---` … `---` block.
///
/// Later `---` lines are ordinary body lines. An unterminated block runs to
/// the end of the document.
pub fn split(text: &str) -> Document {
    let mut front: Option<Vec<&str>> = None;
    let mut body = Vec::new();
    let mut line_numbers = Vec::new();
    let mut inside = false;

    for (idx, line) in text.lines().enumerate() {
        if line == DELIMITER && front.is_none() && !inside {
            inside = true;
            front = Some(Vec::new());
            continue;
        }
        if inside {
            if line == DELIMITER {
                inside = false;
            } else if let Some(lines) = front.as_mut() {
                lines.push(line);
            }
            continue;
        }
        body.push(line.to_string());
        line_numbers.push(idx + 1);
    }

    Document {
        front: front.map(|lines| lines.join("\n")),
        body,
        line_numbers,
    }
}
