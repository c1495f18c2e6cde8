//! Source file resolution and loading
//!
//! Mirrors the command-line contract of the cube tool: a bare name such as
//! `Point` resolves to `Point.swift`, the file must exist, and its text is
//! handed to the extractor as one declaration unit.

use crate::extractor::DeclarationRecord;
use crate::fs::FileSystem;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_SOURCE_EXTENSION: &str = "swift";
pub const DEFAULT_MAX_INPUT_SIZE: u64 = 1024 * 1024;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("Not a regular file: {0}")]
    NotAFile(PathBuf),
    #[error("File {path} is {size} bytes, which exceeds the limit of {limit} bytes")]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
    #[error("Failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },
}

/// A loaded declaration unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub contents: String,
}

pub struct SourceLocator<F: FileSystem> {
    fs: F,
    extension: String,
    max_input_size: u64,
}

impl<F: FileSystem> SourceLocator<F> {
    pub fn new(fs: F) -> Self {
        Self {
            fs,
            extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn with_max_input_size(mut self, max_input_size: u64) -> Self {
        self.max_input_size = max_input_size;
        self
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Appends the expected extension unless the path already carries it
    ///
    /// The extension is appended, not substituted: `notes.txt` becomes `notes.txt.swift`.
    pub fn resolve(&self, requested: &Path) -> PathBuf {
        if self.extension.is_empty() {
            return requested.to_path_buf();
        }

        let has_extension = requested
            .extension()
            .map(|ext| ext.to_string_lossy() == self.extension.as_str())
            .unwrap_or(false);
        if has_extension {
            return requested.to_path_buf();
        }

        let mut name = OsString::from(requested.as_os_str());
        name.push(".");
        name.push(&self.extension);
        PathBuf::from(name)
    }

    /// Resolves, validates and reads a source file
    pub fn load(&self, requested: &Path) -> Result<SourceFile, SourceError> {
        let path = self.resolve(requested);
        debug!("Resolved {} to {}", requested.display(), path.display());

        if !self.fs.exists(&path) {
            return Err(SourceError::NotFound(path));
        }
        if !self.fs.is_file(&path) {
            return Err(SourceError::NotAFile(path));
        }

        let metadata = self.fs.metadata(&path).map_err(|e| SourceError::Read {
            path: path.clone(),
            message: e.to_string(),
        })?;
        if metadata.len() > self.max_input_size {
            return Err(SourceError::TooLarge {
                path,
                size: metadata.len(),
                limit: self.max_input_size,
            });
        }

        let contents = self
            .fs
            .read_to_string(&path)
            .map_err(|e| SourceError::Read {
                path: path.clone(),
                message: format!("{:#}", e),
            })?;

        debug!(bytes = contents.len(), "Loaded {}", path.display());
        Ok(SourceFile { path, contents })
    }
}

/// `<keyword>_<Name>_3d_cube.html`
pub fn output_file_name(record: &DeclarationRecord) -> String {
    format!("{}_{}_3d_cube.html", record.kind.keyword(), record.name)
}

/// Output location for a record, inside `output_dir` when given
pub fn output_path(output_dir: Option<&Path>, record: &DeclarationRecord) -> PathBuf {
    let file_name = output_file_name(record);
    match output_dir {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}
