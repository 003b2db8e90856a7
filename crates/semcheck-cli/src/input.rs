//! Where SQL documents come from.

use anyhow::{Context, Result};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

const STDIN_NAME: &str = "<stdin>";

/// One SQL document to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

impl SourceFile {
    /// Reads `path`, or stdin when the path is `-`.
    pub fn open(path: &Path) -> Result<Self> {
        if path == Path::new("-") {
            return Self::from_reader(STDIN_NAME, io::stdin().lock());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(Self {
            name: path.display().to_string(),
            content,
        })
    }

    pub fn from_reader(name: &str, mut reader: impl Read) -> Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .with_context(|| format!("Failed to read from {name}"))?;
        Ok(Self {
            name: name.to_string(),
            content,
        })
    }
}

/// Collects the documents named on the command line, in order. Each one is
/// checked on its own; an empty list means stdin.
pub fn read_input(files: &[PathBuf]) -> Result<Vec<SourceFile>> {
    if files.is_empty() {
        return Ok(vec![SourceFile::open(Path::new("-"))?]);
    }
    files.iter().map(|path| SourceFile::open(path)).collect()
}
