//! Layout instructions and subject aliases.
//!
//! `!P` opens a paragraph, `!E` ends one, `!B` forces a line break and
//! `!A short=origin` registers an alias for action subjects. The processor
//! consumes these records and emits `Break`/`Indent` markers in their place.

use std::collections::HashMap;

use sb_core::{StoryError, StoryResult};

use crate::parser::parse_line;
use crate::record::{Action, ActionRecord, Instruction, Target, Verb};

/// Layout mode of the running text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Every action on its own line.
    #[default]
    Break,
    /// Actions run together until `!E`.
    Paragraph,
}

/// Single-pass instruction state machine.
#[derive(Debug, Clone, Default)]
pub struct InstructionProcessor {
    target: Target,
    mode: Mode,
    has_first_indent: bool,
    aliases: HashMap<String, String>,
}

impl InstructionProcessor {
    /// A processor in break mode with no aliases.
    pub fn new(target: Target) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Current layout mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The subject an alias resolves to, or the name itself.
    pub fn resolve<'a>(&'a self, subject: &'a str) -> &'a str {
        self.aliases.get(subject).map(String::as_str).unwrap_or(subject)
    }

    /// Process a full record stream.
    pub fn run(mut self, records: Vec<ActionRecord>) -> StoryResult<Vec<ActionRecord>> {
        let mut out = Vec::with_capacity(records.len());
        for record in records {
            self.push(record, &mut out)?;
        }
        Ok(out)
    }

    /// Process one record, appending its output to `out`.
    pub fn push(&mut self, record: ActionRecord, out: &mut Vec<ActionRecord>) -> StoryResult<()> {
        match record {
            ActionRecord::Instruction(instruction) => self.apply(&instruction, out),
            ActionRecord::Action(mut action) => {
                action.subject = self.resolve(&action.subject).to_string();
                if !self.keeps(&action) {
                    return Ok(());
                }
                let is_dialogue = action.verb == Verb::Talk;
                match self.mode {
                    Mode::Break => {
                        if !is_dialogue {
                            out.push(ActionRecord::Indent);
                        }
                        out.push(ActionRecord::Action(action));
                        out.push(ActionRecord::Break);
                    }
                    Mode::Paragraph => {
                        if !self.has_first_indent {
                            out.push(ActionRecord::Indent);
                            self.has_first_indent = true;
                        }
                        out.push(ActionRecord::Action(action));
                    }
                }
                Ok(())
            }
            other => {
                out.push(other);
                Ok(())
            }
        }
    }

    /// Parse a scene body line by line and process each record, keeping the
    /// mode and aliases left by earlier scenes.
    ///
    /// Errors carry the scene id and the file line number from `line_numbers`
    /// (falling back to the 1-based body index).
    pub fn push_scene(
        &mut self,
        scene: &str,
        lines: &[String],
        line_numbers: &[usize],
        out: &mut Vec<ActionRecord>,
    ) -> StoryResult<()> {
        for (idx, line) in lines.iter().enumerate() {
            let line_no = line_numbers.get(idx).copied().unwrap_or(idx + 1);
            let located = |e: StoryError| e.in_scene(scene, line_no);
            if let Some(record) = parse_line(line).map_err(located)? {
                self.push(record, out).map_err(located)?;
            }
        }
        Ok(())
    }

    fn apply(&mut self, instruction: &Instruction, out: &mut Vec<ActionRecord>) -> StoryResult<()> {
        match instruction.subject.as_str() {
            "P" => self.mode = Mode::Paragraph,
            "E" => {
                self.mode = Mode::Break;
                self.has_first_indent = false;
                out.push(ActionRecord::Break);
            }
            "B" => {
                self.mode = Mode::Break;
                out.push(ActionRecord::Break);
            }
            "A" => {
                let (short, origin) = instruction.argument.split_once('=').ok_or_else(|| {
                    StoryError::markup(
                        format!("!A {}", instruction.argument),
                        "alias needs the form `short=origin`",
                    )
                })?;
                self.aliases
                    .insert(short.trim().to_string(), origin.trim().to_string());
            }
            other => return Err(StoryError::UnknownInstruction(other.to_string())),
        }
        Ok(())
    }

    fn keeps(&self, action: &Action) -> bool {
        match self.target {
            Target::Script => {
                !(matches!(action.verb, Verb::Talk | Verb::Think) && action.outline.is_empty())
            }
            Target::Novel => {
                !action.desc.is_empty()
                    || (action.verb == Verb::Talk && !action.outline.is_empty())
            }
        }
    }
}

/// Run the instruction pass over `records` for `target`.
pub fn apply_instructions(
    records: Vec<ActionRecord>,
    target: Target,
) -> StoryResult<Vec<ActionRecord>> {
    InstructionProcessor::new(target).run(records)
}

/// Parse and process a scene body with a fresh processor.
///
/// Errors carry the scene id and the file line number from `line_numbers`
/// (falling back to the 1-based body index).
pub fn process_scene(
    scene: &str,
    lines: &[String],
    line_numbers: &[usize],
    target: Target,
) -> StoryResult<Vec<ActionRecord>> {
    let mut out = Vec::new();
    InstructionProcessor::new(target).push_scene(scene, lines, line_numbers, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn act(subject: &str, verb: Verb, outline: &str, desc: &str) -> ActionRecord {
        ActionRecord::Action(Action::new(subject, verb, outline, desc))
    }

    fn instr(subject: &str, argument: &str) -> ActionRecord {
        ActionRecord::Instruction(Instruction {
            subject: subject.into(),
            argument: argument.into(),
        })
    }

    fn kinds(records: &[ActionRecord]) -> Vec<&'static str> {
        records.iter().map(ActionRecord::kind).collect()
    }

    #[test]
    fn break_mode_indents_descriptions_only() {
        let out = apply_instructions(
            vec![
                act("taro", Verb::Other("walk".into()), "歩く", "歩いた"),
                act("taro", Verb::Talk, "やあ", ""),
            ],
            Target::Script,
        )
        .unwrap();
        assert_eq!(
            kinds(&out),
            vec!["indent", "action", "break", "action", "break"]
        );
    }

    #[test]
    fn paragraph_mode_indents_once() {
        let out = apply_instructions(
            vec![
                instr("P", ""),
                act("a", Verb::Other("x".into()), "", "one"),
                act("a", Verb::Other("x".into()), "", "two"),
                instr("E", ""),
                act("a", Verb::Other("x".into()), "", "three"),
            ],
            Target::Novel,
        )
        .unwrap();
        assert_eq!(
            kinds(&out),
            vec!["indent", "action", "action", "break", "indent", "action", "break"]
        );
    }

    #[test]
    fn repeated_paragraph_keeps_single_indent() {
        let out = apply_instructions(
            vec![
                instr("P", ""),
                act("a", Verb::Other("x".into()), "", "one"),
                instr("P", ""),
                act("a", Verb::Other("x".into()), "", "two"),
            ],
            Target::Novel,
        )
        .unwrap();
        assert_eq!(kinds(&out), vec!["indent", "action", "action"]);
    }

    #[test]
    fn paragraph_after_break_keeps_indent_state() {
        let out = apply_instructions(
            vec![
                instr("P", ""),
                act("a", Verb::Other("x".into()), "", "one"),
                instr("B", ""),
                instr("P", ""),
                act("a", Verb::Other("x".into()), "", "two"),
                instr("E", ""),
                instr("P", ""),
                act("a", Verb::Other("x".into()), "", "three"),
            ],
            Target::Novel,
        )
        .unwrap();
        assert_eq!(
            kinds(&out),
            vec!["indent", "action", "break", "action", "break", "indent", "action"]
        );
    }

    #[test]
    fn state_carries_across_scenes() {
        let mut processor = InstructionProcessor::new(Target::Novel);
        let mut out = Vec::new();
        processor
            .push_scene("s1", &lines(&["!A t=taro", "!P", "[t:walk:]歩いた"]), &[], &mut out)
            .unwrap();
        processor
            .push_scene("s2", &lines(&["[t:run:]走った", "!E"]), &[], &mut out)
            .unwrap();
        assert_eq!(kinds(&out), vec!["indent", "action", "action", "break"]);
        match &out[2] {
            ActionRecord::Action(a) => assert_eq!(a.subject, "taro"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn break_instruction_forces_break_mode() {
        let mut p = InstructionProcessor::new(Target::Novel);
        let mut out = Vec::new();
        p.push(instr("P", ""), &mut out).unwrap();
        assert_eq!(p.mode(), Mode::Paragraph);
        p.push(instr("B", ""), &mut out).unwrap();
        assert_eq!(p.mode(), Mode::Break);
        assert_eq!(out, vec![ActionRecord::Break]);
    }

    #[test]
    fn alias_rewrites_later_subjects() {
        let out = apply_instructions(
            vec![
                instr("A", "short=alice_full_id"),
                act("short", Verb::Talk, "hi", ""),
            ],
            Target::Script,
        )
        .unwrap();
        match &out[0] {
            ActionRecord::Action(a) => assert_eq!(a.subject, "alice_full_id"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn alias_without_equals_is_syntax_error() {
        let err = apply_instructions(vec![instr("A", "short")], Target::Script).unwrap_err();
        assert!(matches!(err, StoryError::MarkupSyntax { .. }));
    }

    #[test]
    fn unknown_instruction_is_fatal() {
        let err = apply_instructions(vec![instr("Z", "")], Target::Novel).unwrap_err();
        assert!(matches!(err, StoryError::UnknownInstruction(code) if code == "Z"));
    }

    #[test]
    fn script_drops_empty_dialogue() {
        let out = apply_instructions(
            vec![
                act("a", Verb::Talk, "", "said nothing"),
                act("a", Verb::Think, "", "thought"),
            ],
            Target::Script,
        )
        .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn novel_keeps_dialogue_with_outline_only() {
        let out = apply_instructions(
            vec![
                act("a", Verb::Talk, "hi", ""),
                act("a", Verb::Other("look".into()), "looks", ""),
            ],
            Target::Novel,
        )
        .unwrap();
        assert_eq!(kinds(&out), vec!["action", "break"]);
    }

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn scene_body_is_parsed_and_processed() {
        let body = lines(&["!A t=taro", "", "[t:talk:やあ]", "# note to self"]);
        let out = process_scene("harbor", &body, &[4, 5, 6, 7], Target::Script).unwrap();
        assert_eq!(kinds(&out), vec!["action", "break", "comment"]);
        match &out[0] {
            ActionRecord::Action(a) => assert_eq!(a.subject, "taro"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn syntax_errors_carry_file_line() {
        let body = lines(&["[a:talk:ok]", "[broken]"]);
        let err = process_scene("intro", &body, &[8, 9], Target::Novel).unwrap_err();
        match err {
            StoryError::InScene { scene, line_no, .. } => {
                assert_eq!(scene, "intro");
                assert_eq!(line_no, 9);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn instruction_errors_carry_body_index_without_numbers() {
        let body = lines(&["text", "!Q"]);
        let err = process_scene("s", &body, &[], Target::Novel).unwrap_err();
        match err {
            StoryError::InScene { line_no, source, .. } => {
                assert_eq!(line_no, 2);
                assert!(matches!(*source, StoryError::UnknownInstruction(_)));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn other_records_pass_through() {
        let records = vec![
            ActionRecord::SceneStart,
            ActionRecord::Comment("# c".into()),
            ActionRecord::SceneEnd,
        ];
        let out = apply_instructions(records.clone(), Target::Novel).unwrap();
        assert_eq!(out, records);
    }
}
