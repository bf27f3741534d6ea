#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("No change {index}: {pending} pending")]
    NoSuchChange { index: usize, pending: usize },
    #[error("An annotation run is already active")]
    RunActive,
    #[error("No annotation run is active")]
    NoActiveRun,
    #[error("Run ticket does not match the session's current run or text")]
    StaleRun,
    #[error("Session invariant violated: {0}")]
    Invariant(String),
}
