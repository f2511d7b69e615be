//! Per-subject calling tags.
//!
//! Characters refer to each other differently: inside an action performed by
//! `taro`, `$hana` may mean "Hana-chan". Each action's text fields are run
//! through the subject's calling table before the story codes are built.

use sb_core::names::Callings;
use sb_core::tag;
use sb_core::{BuildEvent, Reporter};

use crate::record::{Action, ActionRecord, Verb};

/// Apply calling tags to every action in `records`.
///
/// Subjects without a table are reported once per action and left unchanged.
pub fn apply_callings(
    records: Vec<ActionRecord>,
    callings: &Callings,
    prefix: &str,
    reporter: &dyn Reporter,
) -> Vec<ActionRecord> {
    records
        .into_iter()
        .map(|record| match record {
            ActionRecord::Action(action) => {
                ActionRecord::Action(convert_action(action, callings, prefix, reporter))
            }
            other => other,
        })
        .collect()
}

fn convert_action(
    action: Action,
    callings: &Callings,
    prefix: &str,
    reporter: &dyn Reporter,
) -> Action {
    let Some(tags) = callings.tags_for(&action.subject) else {
        reporter.report(&BuildEvent::NoCallingTable {
            subject: action.subject.clone(),
        });
        return action;
    };
    let sub = |text: &str| tag::substitute(text, tags.iter().map(|(k, v)| (k, v)), prefix);
    let verb = match action.verb {
        Verb::Other(verb) => Verb::Other(sub(&verb)),
        known => known,
    };
    Action {
        verb,
        outline: sub(&action.outline),
        desc: sub(&action.desc),
        note: sub(&action.note),
        ..action
    }
}
