//! Plain-text documents read from the filesystem.

use crate::error::{CliError, Result};
use std::fs;
use std::path::Path;
use syllabus_domain::traits::DocumentSource;

/// Reads a document reference as a path to a UTF-8 text file.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileDocumentSource;

impl DocumentSource for FileDocumentSource {
    type Error = CliError;

    fn read_text(&self, reference: &str) -> Result<String> {
        let path = Path::new(reference);
        if reference.trim().is_empty() {
            return Err(CliError::Config("no document given".to_string()));
        }
        if !path.is_file() {
            return Err(CliError::Config(format!(
                "document '{}' does not exist",
                path.display()
            )));
        }
        Ok(fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        fs::write(&path, "Students will: describe anatomy").unwrap();

        let text = FileDocumentSource
            .read_text(path.to_str().unwrap())
            .unwrap();
        assert_eq!(text, "Students will: describe anatomy");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = FileDocumentSource.read_text("/definitely/not/here.txt");
        assert!(matches!(result, Err(CliError::Config(_))));
        assert!(matches!(FileDocumentSource.read_text(""), Err(CliError::Config(_))));
    }
}
