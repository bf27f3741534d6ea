//! Named checks and the request handed to the generation transport.

use std::collections::BTreeMap;

use crate::reconstruct::OutputMode;
use crate::segment::Segmented;

/// One check: the instruction sent along with the document, and the answer
/// convention the instruction asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckDefinition {
    pub instruction: String,
    pub mode: OutputMode,
}

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("Failed to read checks: {0}")]
    Read(String),
    #[error("Failed to parse checks: {0}")]
    Parse(String),
}

/// Resolves a check name. Called once per run, so implementations backed by
/// files see external edits on the next run.
pub trait CheckLookup {
    fn lookup(&self, name: &str) -> Result<Option<CheckDefinition>, CheckError>;
}

/// Fixed in-memory checks.
#[derive(Debug, Clone, Default)]
pub struct StaticChecks(pub BTreeMap<String, CheckDefinition>);

impl StaticChecks {
    pub fn with(mut self, name: &str, definition: CheckDefinition) -> Self {
        self.0.insert(name.to_string(), definition);
        self
    }
}

impl CheckLookup for StaticChecks {
    fn lookup(&self, name: &str) -> Result<Option<CheckDefinition>, CheckError> {
        Ok(self.0.get(name).cloned())
    }
}

/// Everything the transport needs for one run. The core does no network I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub instruction: String,
    pub mode: OutputMode,
    /// `N text` per block, blank-line separated. The header is not included.
    pub numbered_body: String,
    pub block_count: usize,
}

impl GenerationRequest {
    pub fn new(document: &Segmented, check: CheckDefinition) -> Self {
        let numbered_body = document
            .blocks
            .iter()
            .map(|block| format!("{} {}", block.number, block.text))
            .collect::<Vec<_>>()
            .join("\n\n");
        Self {
            instruction: check.instruction,
            mode: check.mode,
            numbered_body,
            block_count: document.len(),
        }
    }
}
