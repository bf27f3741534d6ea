pub mod checks;
pub mod codec;
pub mod io;
pub mod reconstruct;
pub mod rope;
pub mod segment;
pub mod session;
pub mod stream;
pub mod validate;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use checks::{CheckDefinition, CheckError, CheckLookup, GenerationRequest, StaticChecks};
pub use codec::{ChangeRecord, Decision, TagStyle};
pub use io::{FileSink, IoError, read_file, write_file};
pub use reconstruct::{OutputMode, Reconstruction, Warning, reconstruct};
pub use segment::{Block, BlockNumber, Segmented, segment};
pub use session::{
    DEFAULT_HISTORY_DEPTH, Persisted, PersistenceSink, Resolved, RunTicket, Session,
    SessionError, SinkError,
};
pub use stream::{AnnotationRun, GenerationEvent, Phase, RunOutcome, RunSignal, Verdict, drive};
pub use validate::{Problem, validate};
