use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use tempfile::TempDir;

use crate::session::{PersistenceSink, SinkError};

/// Create a temporary documents directory
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test document with content
pub fn create_test_file(dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}

/// Records every saved document; clones share the record.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    saved: Rc<RefCell<Vec<String>>>,
}

impl MemorySink {
    pub fn saved(&self) -> Vec<String> {
        self.saved.borrow().clone()
    }
}

impl PersistenceSink for MemorySink {
    fn save(&mut self, document: &str) -> Result<(), SinkError> {
        self.saved.borrow_mut().push(document.to_string());
        Ok(())
    }
}

/// Rejects every save.
pub struct FailingSink;

impl PersistenceSink for FailingSink {
    fn save(&mut self, _document: &str) -> Result<(), SinkError> {
        Err(SinkError::Rejected("disk full".to_string()))
    }
}
