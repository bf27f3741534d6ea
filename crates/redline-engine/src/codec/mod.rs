//! # Annotation Codec
//!
//! The inline grammar that carries a proposed change inside document text.
//!
//! ## Wire grammar
//!
//! ```text
//! <edit comment="R"><del>D</del><ins>I</ins></edit>     combined (canonical)
//! <edit comment="R"><ins>I</ins><del>D</del></edit>     sub-spans in either order
//! <del comment="R" replace-with="I">D</del>             split, same-tag replacement
//! <del comment="R">D</del><ins>I</ins>                  split, adjacent sibling
//! <ins comment="R">I</ins>                              split, insertion only
//! ```
//!
//! Attribute values are entity-escaped; bodies are raw and opaque. A change
//! carries a deletion, an insertion, or both. Empty bodies count as absent.
//!
//! ## Contracts
//!
//! - [`recover`] replaces every change with its deletion and must give back
//!   the exact pre-annotation text. Everything else in the crate leans on this.
//! - [`accept_all_resolve`] replaces every change with its insertion.
//! - [`parse`] offsets are byte offsets into the string that was parsed and
//!   are invalid as soon as that string changes; re-parse instead of patching.

pub mod cursor;
pub mod escape;
pub mod markup;
pub mod scanner;
pub mod types;

pub use crate::validate::validate;
pub use markup::render;
pub use types::{ChangeRecord, Decision, TagStyle};

/// Parses every change span in `text`, in appearance order.
pub fn parse(text: &str) -> Vec<ChangeRecord> {
    scanner::scan(text)
}

/// Replaces each change span in `text` with `replace(change)`.
///
/// `changes` must come from parsing `text` itself.
pub fn rewrite(
    text: &str,
    changes: &[ChangeRecord],
    mut replace: impl FnMut(&ChangeRecord) -> String,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for change in changes {
        out.push_str(&text[cursor..change.span.start]);
        out.push_str(&replace(change));
        cursor = change.span.end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Resolves every change according to `decide`.
pub fn resolve(text: &str, mut decide: impl FnMut(&ChangeRecord) -> Decision) -> String {
    let changes = parse(text);
    rewrite(text, &changes, |c| c.resolve(decide(c)).to_string())
}

/// The pre-annotation text: every change resolved to its deletion.
pub fn recover(text: &str) -> String {
    resolve(text, |_| Decision::Rejected)
}

/// The fully edited text: every change resolved to its insertion.
pub fn accept_all_resolve(text: &str) -> String {
    resolve(text, |_| Decision::Accepted)
}

/// Rewrites every change span into the canonical combined form.
///
/// Text outside change spans is untouched.
pub fn normalize(text: &str) -> String {
    let changes = parse(text);
    rewrite(text, &changes, |c| c.to_markup(TagStyle::Combined))
}
