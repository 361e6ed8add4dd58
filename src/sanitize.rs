//! Reduces parsed cues to speaker-attributable dialogue.
//!
//! Every cue is judged on its own lines only, so the output keeps the input
//! order and dropping one cue never affects its neighbours. Running the
//! pipeline over its own output changes nothing.

use serde::{Deserialize, Serialize};

use crate::model::Cue;

/// How much a matching line takes with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropScope {
    Cue,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizePolicy {
    /// Lines opening with `- `, two speakers sharing one cue.
    pub dashed: DropScope,
    /// Lines with a parenthesised sound or action description.
    pub non_verbal: DropScope,
}

impl Default for SanitizePolicy {
    fn default() -> Self {
        Self {
            dashed: DropScope::Cue,
            non_verbal: DropScope::Line,
        }
    }
}

/// Per-rule tally of what a sanitize pass removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    pub input: usize,
    pub kept: usize,
    pub markup: usize,
    pub dashed: usize,
    pub non_verbal: usize,
    pub emptied: usize,
}

enum Verdict {
    Keep(Cue),
    Drop(DropReason),
}

#[derive(Debug, Clone, Copy)]
enum DropReason {
    Markup,
    Dashed,
    NonVerbal,
    Emptied,
}

pub fn sanitize(cues: &[Cue]) -> Vec<Cue> {
    sanitize_with(cues, &SanitizePolicy::default()).0
}

pub fn sanitize_with(cues: &[Cue], policy: &SanitizePolicy) -> (Vec<Cue>, SanitizeReport) {
    let mut report = SanitizeReport {
        input: cues.len(),
        ..SanitizeReport::default()
    };

    let kept: Vec<Cue> = cues
        .iter()
        .filter_map(|cue| match sanitize_cue(cue, policy) {
            Verdict::Keep(cue) => Some(cue),
            Verdict::Drop(reason) => {
                match reason {
                    DropReason::Markup => report.markup += 1,
                    DropReason::Dashed => report.dashed += 1,
                    DropReason::NonVerbal => report.non_verbal += 1,
                    DropReason::Emptied => report.emptied += 1,
                }
                tracing::debug!(index = cue.index, ?reason, "dropped cue");
                None
            }
        })
        .collect();

    report.kept = kept.len();
    tracing::info!(
        input = report.input,
        kept = report.kept,
        markup = report.markup,
        dashed = report.dashed,
        non_verbal = report.non_verbal,
        emptied = report.emptied,
        "sanitized cues"
    );

    (kept, report)
}

fn sanitize_cue(cue: &Cue, policy: &SanitizePolicy) -> Verdict {
    let mut lines: Vec<String> = Vec::with_capacity(cue.text.len());

    for line in &cue.text {
        if is_markup(line) {
            return Verdict::Drop(DropReason::Markup);
        }

        if is_dashed(line) {
            match policy.dashed {
                DropScope::Cue => return Verdict::Drop(DropReason::Dashed),
                DropScope::Line => {
                    tracing::debug!(
                        index = cue.index,
                        line = line.as_str(),
                        "removing dashed line"
                    );
                    continue;
                }
            }
        }

        if is_non_verbal(line) {
            match policy.non_verbal {
                DropScope::Cue => return Verdict::Drop(DropReason::NonVerbal),
                DropScope::Line => {
                    tracing::debug!(
                        index = cue.index,
                        line = line.as_str(),
                        "removing non-verbal line"
                    );
                    continue;
                }
            }
        }

        let Some(spoken) = strip_clarification(line) else {
            tracing::debug!(index = cue.index, line = line.as_str(), "removing bare clarification");
            continue;
        };

        let filtered = keep_allowed_chars(spoken);
        if filtered.trim().is_empty() {
            continue;
        }
        lines.push(filtered);
    }

    if lines.is_empty() {
        return Verdict::Drop(DropReason::Emptied);
    }

    Verdict::Keep(Cue {
        index: cue.index,
        start: cue.start,
        end: cue.end,
        text: vec![merge_lines(&lines)],
    })
}

/// Rendering directives such as `{\move(10,10,190,230)\fad(0,1)}`.
fn is_markup(line: &str) -> bool {
    line.contains("{\\")
}

fn is_dashed(line: &str) -> bool {
    line.starts_with("- ")
}

fn is_non_verbal(line: &str) -> bool {
    line.contains('(')
}

/// Drops an off-screen speaker prefix: `Dan: Hey` becomes ` Hey`. Returns
/// `None` when nothing follows the colon.
pub fn strip_clarification(line: &str) -> Option<&str> {
    match line.split_once(':') {
        Some((_, "")) => None,
        Some((_, rest)) => Some(rest),
        None => Some(line),
    }
}

/// Keeps ASCII letters, digits, space and `. , ! ? '`; everything else is
/// deleted outright.
pub fn keep_allowed_chars(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | ',' | '!' | '?' | '\''))
        .collect()
}

/// Joins lines into one, each line's content preceded by a single space.
fn merge_lines(lines: &[String]) -> String {
    let mut merged = String::new();
    for line in lines {
        merged.push(' ');
        merged.push_str(line.trim_start_matches(' '));
    }
    merged
}
