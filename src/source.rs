//! Where raw CV text comes from

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CvError, Result};

/// A source of raw CV JSON text
pub trait DataSource: Send + Sync {
    /// Read the full document text
    fn read(&self) -> Result<String>;

    /// Human-readable label for log lines
    fn describe(&self) -> String;
}

/// A CV file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for FileSource {
    fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|source| CvError::Read {
            source_name: self.describe(),
            source,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// CV text held in memory, e.g. embedded with `include_str!`
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    text: String,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl DataSource for StaticSource {
    fn read(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_source_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.json");
        fs::write(&path, r#"{"basics": {}}"#).unwrap();

        let source = FileSource::new(&path);
        assert_eq!(source.read().unwrap(), r#"{"basics": {}}"#);
        assert_eq!(source.path(), path.as_path());
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("absent.json"));
        let err = source.read().unwrap_err();
        assert!(matches!(err, CvError::Read { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn test_static_source() {
        let source = StaticSource::new("embedded", "{}");
        assert_eq!(source.read().unwrap(), "{}");
        assert_eq!(source.describe(), "embedded");
    }
}
