use redline_engine::{CheckDefinition, CheckError, CheckLookup, OutputMode};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
struct ChecksTable {
    #[serde(default)]
    checks: BTreeMap<String, RawCheck>,
}

#[derive(Debug, Deserialize)]
struct RawCheck {
    instruction: String,
    mode: Option<OutputMode>,
}

/// Check definitions in a TOML file:
///
/// ```toml
/// [checks.grammar]
/// instruction = "Fix grammar and spelling only."
/// mode = "compact"
/// ```
///
/// The file is read again on every lookup, so edits made while the program
/// runs apply to the next run. A missing file means no checks.
#[derive(Debug, Clone)]
pub struct ChecksFile {
    path: PathBuf,
    default_mode: OutputMode,
}

impl ChecksFile {
    pub fn new(path: impl Into<PathBuf>, default_mode: OutputMode) -> Self {
        Self {
            path: path.into(),
            default_mode,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All check names, sorted.
    pub fn names(&self) -> Result<Vec<String>, CheckError> {
        Ok(self.read()?.checks.into_keys().collect())
    }

    fn read(&self) -> Result<ChecksTable, CheckError> {
        if !self.path.exists() {
            log::debug!("no checks file at {}", self.path.display());
            return Ok(ChecksTable::default());
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| CheckError::Read(format!("{}: {e}", self.path.display())))?;
        toml::from_str(&content)
            .map_err(|e| CheckError::Parse(format!("{}: {e}", self.path.display())))
    }
}

impl CheckLookup for ChecksFile {
    fn lookup(&self, name: &str) -> Result<Option<CheckDefinition>, CheckError> {
        let mut table = self.read()?;
        Ok(table.checks.remove(name).map(|raw| CheckDefinition {
            instruction: raw.instruction,
            mode: raw.mode.unwrap_or(self.default_mode),
        }))
    }
}
