use std::sync::OnceLock;

use regex::Regex;

use super::events::Verdict;

/// The literal a service answers with when a block needs no change.
pub const NO_CHANGE_MARKER: &str = "lgtm";

/// The service's answer for one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Judgment {
    /// No change proposed.
    Lgtm,
    /// The raw answer body: the whole block with tags embedded (full-block
    /// mode) or just the tag spans with their anchors (compact mode).
    Revised(String),
}

impl Judgment {
    pub fn from_body(body: &str) -> Self {
        if body.trim().eq_ignore_ascii_case(NO_CHANGE_MARKER) {
            Judgment::Lgtm
        } else {
            Judgment::Revised(body.to_string())
        }
    }

    pub fn verdict(&self) -> Verdict {
        match self {
            Judgment::Lgtm => Verdict::Lgtm,
            Judgment::Revised(_) => Verdict::Changes,
        }
    }
}

fn judgment_header() -> &'static Regex {
    // Optional indent, block number, then one space or tab, then the first
    // line of the body
    static JUDGMENT_HEADER: OnceLock<Regex> = OnceLock::new();
    JUDGMENT_HEADER.get_or_init(|| {
        Regex::new(r"^[ \t]*(\d+)(?:[ \t](.*))?$").expect("Invalid judgment regex")
    })
}

/// Splits `N rest` into the block number and the rest of the line.
///
/// Returns `None` for continuation lines.
pub fn parse_header(line: &str) -> Option<(usize, &str)> {
    let caps = judgment_header().captures(line)?;
    let number = caps.get(1)?.as_str().parse().ok()?;
    let rest = caps.get(2).map_or("", |m| m.as_str());
    Some((number, rest))
}
