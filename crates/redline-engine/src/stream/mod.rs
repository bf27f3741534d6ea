//! # Streaming Output Parser
//!
//! Turns the generation service's answer, delivered as fragments of any size,
//! into per-block judgments.
//!
//! ## Line protocol
//!
//! ~~~text
//! 1 lgtm
//! 2 The cat <del comment="tense" replace-with="sits">sat</del>.
//! 3 ```rust
//! let x = <del comment="typo">1</del><ins>2</ins>;
//! ```
//! ~~~
//!
//! A line starting with a block number and a space opens that block's
//! judgment. Any other line continues the open judgment, which is how
//! multi-line blocks (fenced code in particular) come back. A judgment is
//! complete when the next one opens or the stream finishes.
//!
//! [`AnnotationRun`] is the synchronous state machine. [`drive`] pumps it from
//! a tokio channel.

pub mod driver;
pub mod events;
pub mod judgment;
pub mod run;

pub use driver::{RunOutcome, drive};
pub use events::{GenerationEvent, Phase, RunSignal, Verdict};
pub use judgment::{Judgment, NO_CHANGE_MARKER};
pub use run::AnnotationRun;
