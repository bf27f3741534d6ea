use crate::codec::{self, ChangeRecord, TagStyle};
use crate::rope::{Span, preview};
use crate::segment::{Block, BlockNumber};

use super::warning::Warning;

/// Splices the change spans of a compact answer into the block.
///
/// Changes are placed one at a time, in the order they appear in the answer,
/// against the block as modified by the changes before them:
///
/// - a change with a deletion goes where the deleted text first occurs;
/// - an insertion-only change goes right after its anchor, the answer text
///   between the previous span and this one.
///
/// Occurrences overlapping markup already spliced in are skipped. Anything
/// that cannot be placed leaves the block untouched and is reported.
pub fn apply(block: &Block, answer: &str, warnings: &mut Vec<Warning>) -> String {
    let changes = codec::parse(answer);
    if changes.is_empty() {
        warnings.push(Warning::NoChangeSpans {
            block: block.number,
        });
        return block.text.clone();
    }

    let mut splicer = Splicer::new(block.number, &block.text);
    let mut previous_end = 0;
    for change in &changes {
        let anchor = clean_anchor(&answer[previous_end..change.span.start]);
        previous_end = change.span.end;
        splicer.place(change, anchor, warnings);
    }
    splicer.text
}

struct Splicer {
    block: BlockNumber,
    text: String,
    /// Markup already spliced into `text`, kept in sync as `text` changes.
    placed: Vec<Span>,
}

impl Splicer {
    fn new(block: BlockNumber, text: &str) -> Self {
        Self {
            block,
            text: text.to_string(),
            placed: vec![],
        }
    }

    fn place(&mut self, change: &ChangeRecord, anchor: &str, warnings: &mut Vec<Warning>) {
        if change.is_empty() {
            warnings.push(Warning::EmptyChange {
                block: self.block,
                index: change.index,
            });
            return;
        }

        if let Some(deleted) = &change.deleted {
            match self.find_free(deleted) {
                Some(at) => {
                    let markup = change.to_markup(TagStyle::Combined);
                    self.splice(Span::new(at, at + deleted.len()), &markup);
                }
                None => warnings.push(Warning::DeletionNotFound {
                    block: self.block,
                    text: preview(deleted, 60),
                }),
            }
            return;
        }

        let Some(at) = (!anchor.is_empty())
            .then(|| self.find_free(anchor))
            .flatten()
        else {
            warnings.push(Warning::AnchorNotFound {
                block: self.block,
                anchor: preview(anchor, 60),
            });
            return;
        };

        let inserted = change.inserted_text();
        let separated = if inserted.starts_with(char::is_whitespace) {
            inserted.to_string()
        } else {
            format!(" {inserted}")
        };
        let markup = change.with_inserted(&separated).to_markup(TagStyle::Combined);
        let insert_at = at + anchor.len();
        self.splice(Span::new(insert_at, insert_at), &markup);
    }

    /// First occurrence of `needle` that does not overlap placed markup.
    fn find_free(&self, needle: &str) -> Option<usize> {
        let mut from = 0;
        while let Some(offset) = self.text[from..].find(needle) {
            let at = from + offset;
            let candidate = Span::new(at, at + needle.len());
            if !self.placed.iter().any(|p| p.overlaps(candidate)) {
                return Some(at);
            }
            from = at + self.text[at..].chars().next().map_or(1, char::len_utf8);
        }
        None
    }

    fn splice(&mut self, target: Span, markup: &str) {
        self.text.replace_range(target.range(), markup);
        for p in &mut self.placed {
            if p.start >= target.end {
                *p = Span::new(
                    p.start - target.len() + markup.len(),
                    p.end - target.len() + markup.len(),
                );
            }
        }
        self.placed
            .push(Span::new(target.start, target.start + markup.len()));
    }
}

/// Strips whitespace and one pair of surrounding quotes from an anchor.
fn clean_anchor(raw: &str) -> &str {
    let trimmed = raw.trim();
    for (open, close) in [('"', '"'), ('\'', '\''), ('“', '”'), ('‘', '’')] {
        if let Some(inner) = trimmed
            .strip_prefix(open)
            .and_then(|s| s.strip_suffix(close))
        {
            return inner.trim();
        }
    }
    trimmed
}
