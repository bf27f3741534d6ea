use crate::reconstruct::Reconstruction;
use crate::segment::BlockNumber;

/// What the generation channel delivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationEvent {
    /// The service started its reasoning phase.
    ReasoningStarted,
    /// The service started writing its answer.
    AnswerStarted,
    /// A piece of answer text, of any size, possibly mid-line.
    Fragment(String),
    /// The answer is complete.
    Finished,
    /// The transport or the service failed; nothing should be committed.
    Failed(String),
}

/// Stream phase, reported once per transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Waiting,
    Reasoning,
    Answering,
}

/// Classification of one completed block judgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Lgtm,
    Changes,
}

/// What a run reports back to its caller, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum RunSignal {
    Status(Phase),
    Progress {
        completed: usize,
        total: usize,
        block: BlockNumber,
        verdict: Verdict,
    },
    /// Terminal: the reconstructed document.
    Done(Reconstruction),
    /// Terminal: the run failed and produced nothing.
    Error(String),
}

impl RunSignal {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunSignal::Done(_) | RunSignal::Error(_))
    }
}
