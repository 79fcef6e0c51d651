//! Source location tracking.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A span in the source code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: PathBuf,
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl Location {
    pub fn new(file: impl Into<PathBuf>, start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            file: file.into(),
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// A zero-width location at the start of a file.
    pub fn file_start(file: impl Into<PathBuf>) -> Self {
        Self::new(file, 0, 0, 0, 0)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Lines and columns are stored zero-based and displayed one-based.
        write!(
            f,
            "{}:{}:{}",
            self.file.display(),
            self.start_line + 1,
            self.start_col + 1
        )
    }
}
