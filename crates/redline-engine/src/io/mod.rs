use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

use crate::session::{PersistenceSink, SinkError};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid documents directory: {0}")]
    InvalidDocumentsDir(String),
}

/// Read a document and return its content
pub fn read_file(relative_path: &RelativePath, root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write content to a document
pub fn write_file(relative_path: &RelativePath, root: &Path, content: &str) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(root);

    // Create parent directories if they don't exist
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

pub fn validate_documents_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidDocumentsDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

/// Saves a session's document to one file under a root directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    pub root: PathBuf,
    pub path: RelativePathBuf,
}

impl FileSink {
    pub fn new(root: impl Into<PathBuf>, path: impl Into<RelativePathBuf>) -> Self {
        Self {
            root: root.into(),
            path: path.into(),
        }
    }
}

impl PersistenceSink for FileSink {
    fn save(&mut self, document: &str) -> Result<(), SinkError> {
        write_file(&self.path, &self.root, document)?;
        log::debug!("saved {}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_dir, create_test_file};

    #[test]
    fn test_read_file_success() {
        let dir = create_test_dir();
        create_test_file(&dir, "test.md", "# Test Content\n\nParagraph");

        let relative_path = RelativePath::new("test.md");
        let content = read_file(relative_path, dir.path()).unwrap();
        assert_eq!(content, "# Test Content\n\nParagraph");
    }

    #[test]
    fn test_read_file_not_found() {
        let dir = create_test_dir();
        let relative_path = RelativePath::new("nonexistent.md");
        let result = read_file(relative_path, dir.path());
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_write_file_creates_parent_directories() {
        let dir = create_test_dir();
        let relative_path = RelativePath::new("folder/subfolder/new_file.md");

        write_file(relative_path, dir.path(), "# Nested").unwrap();

        assert_eq!(read_file(relative_path, dir.path()).unwrap(), "# Nested");
        assert!(dir.path().join("folder").join("subfolder").is_dir());
    }

    #[test]
    fn test_write_file_overwrites_existing() {
        let dir = create_test_dir();
        create_test_file(&dir, "existing.md", "# Original Content");

        let relative_path = RelativePath::new("existing.md");
        write_file(relative_path, dir.path(), "# Updated").unwrap();

        assert_eq!(read_file(relative_path, dir.path()).unwrap(), "# Updated");
    }

    #[test]
    fn test_validate_documents_dir() {
        let dir = create_test_dir();
        assert!(validate_documents_dir(dir.path()).is_ok());
        assert!(matches!(
            validate_documents_dir(Path::new("/nonexistent/path")),
            Err(IoError::InvalidDocumentsDir(_))
        ));
    }

    #[test]
    fn test_file_sink_writes_whole_document() {
        let dir = create_test_dir();
        let mut sink = FileSink::new(dir.path(), "drafts/essay.md");

        sink.save("---\nk: v\n---\nBody").unwrap();
        sink.save("---\nk: v\n---\nBody, revised").unwrap();

        let content = read_file(RelativePath::new("drafts/essay.md"), dir.path()).unwrap();
        assert_eq!(content, "---\nk: v\n---\nBody, revised");
    }

    #[test]
    fn test_file_sink_reports_write_failure() {
        let dir = create_test_dir();
        create_test_file(&dir, "blocker", "not a directory");
        let mut sink = FileSink::new(dir.path(), "blocker/essay.md");

        let err = sink.save("text").unwrap_err();
        assert!(matches!(err, SinkError::Io(IoError::Io(_))));
    }
}
