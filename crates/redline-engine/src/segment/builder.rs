use crate::rope::{LineRef, Span};

use super::fence::{CodeFence, FenceKind};

/// An untrimmed run of lines that will become one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBlock {
    /// From the start of the first line to the end of the last line.
    pub span: Span,
    /// Whether the run opened a literal region at some point.
    pub literal: bool,
}

#[derive(Debug, Clone, Copy)]
enum State {
    Between,
    Block {
        start: usize,
        last_line_end: usize,
        literal: bool,
    },
}

/// Line-at-a-time block splitter.
///
/// Blank lines close the current block unless a literal region is open.
/// Fence lines toggle the literal region; they never open or close a block
/// by themselves.
pub struct BlockBuilder {
    state: State,
    fence: Option<FenceKind>,
    out: Vec<RawBlock>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            state: State::Between,
            fence: None,
            out: vec![],
        }
    }

    pub fn push(&mut self, line: &LineRef) {
        let sig = CodeFence::sig(line.content());

        if let Some(kind) = self.fence {
            self.extend(line.span, false);
            if CodeFence::closes(kind, sig) {
                self.fence = None;
            }
            return;
        }

        if line.is_blank() {
            self.flush();
            return;
        }

        if let Some(sig) = sig {
            self.fence = Some(CodeFence::kind(sig));
        }
        self.extend(line.span, self.fence.is_some());
    }

    pub fn finish(mut self) -> Vec<RawBlock> {
        // EOF flush; an unterminated fence is kept as-is
        self.flush();
        self.out
    }

    fn extend(&mut self, line: Span, opened_literal: bool) {
        self.state = match self.state {
            State::Between => State::Block {
                start: line.start,
                last_line_end: line.end,
                literal: opened_literal,
            },
            State::Block { start, literal, .. } => State::Block {
                start,
                last_line_end: line.end,
                literal: literal || opened_literal,
            },
        };
    }

    fn flush(&mut self) {
        if let State::Block {
            start,
            last_line_end,
            literal,
        } = std::mem::replace(&mut self.state, State::Between)
        {
            self.out.push(RawBlock {
                span: Span::new(start, last_line_end),
                literal,
            });
        }
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}
