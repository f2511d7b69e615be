//! Scene markup line parser.
//!
//! Each body line of a scene document is one of:
//!
//! | Line                                | Record      |
//! |-------------------------------------|-------------|
//! | (empty)                             | none        |
//! | `## heading`                        | head-title  |
//! | `# comment`                         | comment     |
//! | `!X argument` (`X` one letter)      | instruction |
//! | `[subject:verb:outline]desc # note` | action      |
//! | anything else                       | text        |

use sb_core::{StoryError, StoryResult};

use crate::record::{Action, ActionRecord, Instruction, Verb};

const HEAD_TITLE_MARK: &str = "## ";
const COMMENT_MARK: &str = "# ";
const INSTRUCTION_MARK: char = '!';
const ACTION_OPEN: char = '[';
const ACTION_CLOSE: char = ']';
const HEADER_SEPARATOR: char = ':';
const HEADER_FIELDS: usize = 3;

/// Parse one newline-stripped line.
///
/// Returns `Ok(None)` for empty lines. Only action lines can fail.
pub fn parse_line(line: &str) -> StoryResult<Option<ActionRecord>> {
    if line.is_empty() {
        return Ok(None);
    }
    if let Some(rest) = line.strip_prefix(HEAD_TITLE_MARK) {
        return Ok(Some(ActionRecord::HeadTitle(rest.to_string())));
    }
    if line.starts_with(COMMENT_MARK) {
        return Ok(Some(ActionRecord::Comment(line.to_string())));
    }
    if let Some(instruction) = parse_instruction(line) {
        return Ok(Some(instruction));
    }
    if line.starts_with(ACTION_OPEN) {
        return parse_action(line).map(Some);
    }
    Ok(Some(ActionRecord::Text(line.to_string())))
}

/// `!` followed by one ASCII letter, then whitespace or the end of the line.
/// Anything else starting with `!` is ordinary text.
fn parse_instruction(line: &str) -> Option<ActionRecord> {
    let rest = line.strip_prefix(INSTRUCTION_MARK)?;
    let mut chars = rest.chars();
    let code = chars.next().filter(char::is_ascii_alphabetic)?;
    let argument = chars.as_str();
    if !argument.is_empty() && !argument.starts_with(char::is_whitespace) {
        return None;
    }
    Some(ActionRecord::Instruction(Instruction {
        subject: code.to_string(),
        argument: argument.trim().to_string(),
    }))
}

fn parse_action(line: &str) -> StoryResult<ActionRecord> {
    let (main, note) = line
        .split_once(COMMENT_MARK)
        .map(|(m, n)| (m, n.trim()))
        .unwrap_or((line, ""));

    let inner = &main[ACTION_OPEN.len_utf8()..];
    let (header, desc) = inner
        .split_once(ACTION_CLOSE)
        .ok_or_else(|| StoryError::markup(line, "missing closing `]` in action header"))?;

    let fields: Vec<&str> = header.split(HEADER_SEPARATOR).collect();
    let [subject, verb, outline] = fields.as_slice() else {
        return Err(StoryError::markup(
            line,
            format!(
                "expected {HEADER_FIELDS} header fields (subject:verb:outline), found {}",
                fields.len()
            ),
        ));
    };

    Ok(ActionRecord::Action(Action {
        subject: subject.trim().to_string(),
        verb: Verb::parse(verb.trim()),
        outline: outline.trim().to_string(),
        desc: desc.trim_end().to_string(),
        flags: Vec::new(),
        note: note.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn action(line: &str) -> Action {
        match parse_line(line).unwrap() {
            Some(ActionRecord::Action(a)) => a,
            other => panic!("expected action, got {other:?}"),
        }
    }

    #[test]
    fn empty_line_is_none() {
        assert_eq!(parse_line("").unwrap(), None);
    }

    #[test]
    fn head_title() {
        assert_eq!(
            parse_line("## Chapter One").unwrap(),
            Some(ActionRecord::HeadTitle("Chapter One".into()))
        );
    }

    #[test]
    fn comment_keeps_whole_line() {
        assert_eq!(
            parse_line("# fix this later").unwrap(),
            Some(ActionRecord::Comment("# fix this later".into()))
        );
    }

    #[test]
    fn hash_without_space_is_text() {
        assert_eq!(
            parse_line("#hashtag").unwrap(),
            Some(ActionRecord::Text("#hashtag".into()))
        );
    }

    #[test]
    fn dialogue_action() {
        let a = action("[alice:talk:Hello there]");
        assert_eq!(a.subject, "alice");
        assert_eq!(a.verb, Verb::Talk);
        assert_eq!(a.outline, "Hello there");
        assert_eq!(a.desc, "");
        assert_eq!(a.note, "");
    }

    #[test]
    fn action_with_desc_and_note() {
        let a = action("[taro:walk:港へ]彼はゆっくり港へ歩いた # 要確認");
        assert_eq!(a.verb, Verb::Other("walk".into()));
        assert_eq!(a.outline, "港へ");
        assert_eq!(a.desc, "彼はゆっくり港へ歩いた");
        assert_eq!(a.note, "要確認");
    }

    #[test]
    fn action_with_empty_outline() {
        let a = action("[hana:think:]どうしよう");
        assert_eq!(a.verb, Verb::Think);
        assert_eq!(a.outline, "");
        assert_eq!(a.desc, "どうしよう");
    }

    #[test]
    fn wrong_field_count_is_an_error() {
        for line in ["[alice:talk]hi", "[alice]hi", "[a:b:c:d]hi"] {
            match parse_line(line) {
                Err(StoryError::MarkupSyntax { line: l, message }) => {
                    assert_eq!(l, line);
                    assert!(message.contains("header fields"));
                }
                other => panic!("expected MarkupSyntax for {line}, got {other:?}"),
            }
        }
    }

    #[test]
    fn unclosed_header_is_an_error() {
        assert!(matches!(
            parse_line("[alice:talk:hi"),
            Err(StoryError::MarkupSyntax { .. })
        ));
    }

    #[test]
    fn instruction_lines() {
        assert_eq!(
            parse_line("!P").unwrap(),
            Some(ActionRecord::Instruction(Instruction {
                subject: "P".into(),
                argument: String::new(),
            }))
        );
        assert_eq!(
            parse_line("!A short=alice_full_id").unwrap(),
            Some(ActionRecord::Instruction(Instruction {
                subject: "A".into(),
                argument: "short=alice_full_id".into(),
            }))
        );
    }

    #[test]
    fn bang_prose_is_text() {
        for line in ["!", "!? 何だって", "!!", "!Pause", "! P", "!あ"] {
            assert_eq!(
                parse_line(line).unwrap(),
                Some(ActionRecord::Text(line.into())),
                "{line}"
            );
        }
    }

    proptest! {
        #[test]
        fn parsing_is_total_without_bracket(line in "!?[^\\[\\n][^\\n]{0,40}") {
            let first = parse_line(&line);
            prop_assert!(first.is_ok());
            prop_assert_eq!(first.unwrap(), parse_line(&line).unwrap());
        }
    }
}
