//! # Block Segmentation
//!
//! Splits a document into an optional verbatim header and an ordered list of
//! numbered body blocks.
//!
//! ## Rules
//!
//! - A header exists only when the text opens with a `---` line and a later
//!   line closes it with another `---` line. It is never parsed further.
//! - The body is scanned line by line. Blank lines separate blocks, except
//!   inside a fenced literal region (```` ``` ```` or `~~~`, any info string).
//! - Each block has its trailing whitespace trimmed. Blocks that are entirely
//!   whitespace are dropped.
//! - An unterminated literal region is accepted and runs to the end.
//!
//! ## Addressing
//!
//! Blocks are numbered `1..=N` in document order when the document is
//! segmented and never renumbered. The block number is the only way the
//! stream parser, reconstruction and generation request refer to a block.
//!
//! Every block keeps the byte span of its trimmed text inside the body, so
//! [`Segmented::rejoin`] can put a document back together with the original
//! separators copied verbatim.

pub mod builder;
pub mod fence;
pub mod header;

use std::fmt;

use xi_rope::Rope;

use crate::rope::{Span, lines_with_spans, slice_to_string};

pub use builder::{BlockBuilder, RawBlock};
pub use fence::{CodeFence, FenceKind, FenceSig};
pub use header::split_header;

/// 1-based position of a block within one segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockNumber(usize);

impl BlockNumber {
    /// Returns `None` for zero, which is never a valid block number.
    pub fn new(n: usize) -> Option<Self> {
        (n > 0).then_some(Self(n))
    }

    pub fn from_index(index: usize) -> Self {
        Self(index + 1)
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 - 1
    }
}

impl fmt::Display for BlockNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One addressable unit of body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub number: BlockNumber,
    /// Span of `text` inside [`Segmented::body`].
    pub span: Span,
    /// Block text with trailing whitespace trimmed.
    pub text: String,
    /// Whether the block contains (or opens) a fenced literal region.
    pub literal: bool,
}

/// A segmented document: header, body and the blocks of the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmented {
    pub header: Option<String>,
    pub body: String,
    pub blocks: Vec<Block>,
}

impl Segmented {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block(&self, number: BlockNumber) -> Option<&Block> {
        self.blocks.get(number.index())
    }

    /// Rebuilds the body, substituting each block with `replace(block)`.
    ///
    /// Everything between blocks (blank lines, trimmed trailing whitespace)
    /// is copied from the original body unchanged.
    pub fn rejoin(&self, mut replace: impl FnMut(&Block) -> String) -> String {
        let mut out = String::with_capacity(self.body.len());
        let mut cursor = 0;
        for block in &self.blocks {
            out.push_str(&self.body[cursor..block.span.start]);
            out.push_str(&replace(block));
            cursor = block.span.end;
        }
        out.push_str(&self.body[cursor..]);
        out
    }

    /// Prepends the preserved header to a body.
    pub fn to_document(&self, body: &str) -> String {
        match &self.header {
            Some(header) => format!("{header}{body}"),
            None => body.to_string(),
        }
    }
}

/// Segments `text` into header and numbered blocks.
pub fn segment(text: &str) -> Segmented {
    let (header, body) = split_header(text);
    let rope = Rope::from(body);

    let mut builder = BlockBuilder::new();
    for line in lines_with_spans(&rope) {
        builder.push(&line);
    }

    let blocks = builder
        .finish()
        .into_iter()
        .filter_map(|raw| {
            let text = slice_to_string(&rope, raw.span);
            let trimmed = text.trim_end();
            if trimmed.trim_start().is_empty() {
                return None;
            }
            Some((
                Span::new(raw.span.start, raw.span.start + trimmed.len()),
                trimmed.to_string(),
                raw.literal,
            ))
        })
        .enumerate()
        .map(|(i, (span, text, literal))| Block {
            number: BlockNumber::from_index(i),
            span,
            text,
            literal,
        })
        .collect();

    Segmented {
        header: header.map(str::to_string),
        body: body.to_string(),
        blocks,
    }
}
