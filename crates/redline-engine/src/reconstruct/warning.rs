use std::fmt;

use crate::segment::BlockNumber;

/// A non-fatal problem found while merging judgments into the document.
///
/// Every warning means some block (or part of one) was kept as it was.
/// The exception is `RoundTripMismatch`, where the service's version is used
/// anyway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// No judgment arrived for the block; it passes through unchanged.
    MissingJudgment { block: BlockNumber },
    /// The judgment body was blank; the block passes through unchanged.
    EmptyJudgment { block: BlockNumber },
    /// A judgment addressed a block that does not exist.
    UnknownBlock { block: BlockNumber },
    /// Rejecting every change in the full-block answer does not give back the
    /// original block. The answer is used regardless.
    RoundTripMismatch {
        block: BlockNumber,
        expected: String,
        recovered: String,
    },
    /// A compact answer contained no change spans.
    NoChangeSpans { block: BlockNumber },
    /// A change carried neither a deletion nor an insertion and was skipped.
    EmptyChange { block: BlockNumber, index: usize },
    /// The deleted text does not occur in the block.
    DeletionNotFound { block: BlockNumber, text: String },
    /// The anchor for an insertion does not occur in the block.
    AnchorNotFound { block: BlockNumber, anchor: String },
}

impl Warning {
    pub fn block(&self) -> BlockNumber {
        match self {
            Warning::MissingJudgment { block }
            | Warning::EmptyJudgment { block }
            | Warning::UnknownBlock { block }
            | Warning::RoundTripMismatch { block, .. }
            | Warning::NoChangeSpans { block }
            | Warning::EmptyChange { block, .. }
            | Warning::DeletionNotFound { block, .. }
            | Warning::AnchorNotFound { block, .. } => *block,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MissingJudgment { block } => {
                write!(f, "block {block}: no judgment received, left unchanged")
            }
            Warning::EmptyJudgment { block } => {
                write!(f, "block {block}: empty judgment, left unchanged")
            }
            Warning::UnknownBlock { block } => {
                write!(f, "block {block}: judgment for a block that does not exist")
            }
            Warning::RoundTripMismatch {
                block,
                expected,
                recovered,
            } => write!(
                f,
                "block {block}: rejecting all changes gives {recovered:?}, expected {expected:?}"
            ),
            Warning::NoChangeSpans { block } => {
                write!(f, "block {block}: compact judgment has no change spans")
            }
            Warning::EmptyChange { block, index } => write!(
                f,
                "block {block}: change {index} has neither deletion nor insertion"
            ),
            Warning::DeletionNotFound { block, text } => {
                write!(f, "block {block}: deleted text {text:?} not found")
            }
            Warning::AnchorNotFound { block, anchor } => {
                write!(f, "block {block}: anchor {anchor:?} not found")
            }
        }
    }
}
