/// Width of the separator between artifact sections.
pub const BREAK_LINE_WIDTH: usize = 64;

/// Sentence terminators that suppress punctuation completion.
const TERMINATORS: [char; 2] = ['。', '、'];

/// Full stop appended by [`complete_punctuation`].
const FULL_STOP: char = '。';

/// A line of `-` separating artifact sections.
pub fn break_line() -> String {
    let mut line = "-".repeat(BREAK_LINE_WIDTH);
    line.push('\n');
    line
}

/// End `body` with a Japanese full stop unless it already ends in `。` or `、`.
///
/// Empty bodies stay empty.
pub fn complete_punctuation(body: &str) -> String {
    match body.chars().last() {
        None => String::new(),
        Some(c) if TERMINATORS.contains(&c) => body.to_string(),
        Some(_) => format!("{body}{FULL_STOP}"),
    }
}

/// A Markdown heading of `level` followed by a blank line.
pub(crate) fn heading(level: usize, title: &str) -> String {
    format!("{} {title}\n\n", "#".repeat(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn break_line_is_64_dashes() {
        let line = break_line();
        assert_eq!(line.len(), BREAK_LINE_WIDTH + 1);
        assert!(line.trim_end().chars().all(|c| c == '-'));
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn punctuation_completion() {
        assert_eq!(complete_punctuation("歩いた"), "歩いた。");
        assert_eq!(complete_punctuation("歩いた。"), "歩いた。");
        assert_eq!(complete_punctuation("そして、"), "そして、");
        assert_eq!(complete_punctuation(""), "");
    }

    #[test]
    fn completion_is_idempotent() {
        let once = complete_punctuation("雨が降る");
        assert_eq!(complete_punctuation(&once), once);
    }

    #[test]
    fn heading_levels() {
        assert_eq!(heading(1, "Book"), "# Book\n\n");
        assert_eq!(heading(4, "Scene"), "#### Scene\n\n");
    }
}
