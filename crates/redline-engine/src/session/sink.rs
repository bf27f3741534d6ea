use crate::io::IoError;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Failed to write document: {0}")]
    Io(#[from] IoError),
    #[error("Save rejected: {0}")]
    Rejected(String),
}

/// Where a session writes the document after every resolved mutation.
///
/// The session hands over the full document (header plus plain text). The
/// format is opaque UTF-8; retries are the caller's business.
pub trait PersistenceSink {
    fn save(&mut self, document: &str) -> Result<(), SinkError>;
}

/// What happened to the write-through after a mutation.
#[derive(Debug)]
pub enum Persisted {
    Saved,
    /// The in-memory state was kept; only the write failed.
    Failed(SinkError),
    /// Nothing was written: the operation changed nothing, or the session has
    /// no sink.
    Skipped,
}

impl Persisted {
    pub fn is_saved(&self) -> bool {
        matches!(self, Persisted::Saved)
    }
}
