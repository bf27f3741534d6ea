//! Consistency sweep over annotated text.
//!
//! Not a grammar checker: it flags changes that carry nothing, and tag
//! markup that survived [`recover`](crate::codec::recover) because the scanner
//! could not match it. No repair is attempted.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::codec;
use crate::rope::{Span, preview};

fn residual_tag() -> &'static Regex {
    // Any open or close tag of ours, with or without attributes
    static RESIDUAL_TAG: OnceLock<Regex> = OnceLock::new();
    RESIDUAL_TAG.get_or_init(|| {
        Regex::new(r"</?(?:edit|del|ins)(?:\s[^>]*)?>").expect("Invalid residual tag regex")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// A change with neither a deletion nor an insertion.
    EmptyChange { index: usize, span: Span },
    /// Tag markup left in the recovered text. `offset` is into the recovered text.
    ResidualMarkup { offset: usize, snippet: String },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::EmptyChange { index, span } => write!(
                f,
                "change {index} at {}..{} has neither deletion nor insertion",
                span.start, span.end
            ),
            Problem::ResidualMarkup { offset, snippet } => {
                write!(f, "unparsed tag markup at offset {offset}: {snippet}")
            }
        }
    }
}

/// Lists every consistency problem in `text`.
pub fn validate(text: &str) -> Vec<Problem> {
    let changes = codec::parse(text);
    let mut problems: Vec<Problem> = changes
        .iter()
        .filter(|c| c.is_empty())
        .map(|c| Problem::EmptyChange {
            index: c.index,
            span: c.span,
        })
        .collect();

    let recovered = codec::rewrite(text, &changes, |c| c.deleted_text().to_string());
    problems.extend(residual_tag().find_iter(&recovered).map(|m| {
        Problem::ResidualMarkup {
            offset: m.start(),
            snippet: preview(m.as_str(), 40),
        }
    }));

    problems
}
