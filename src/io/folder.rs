//! Listing the candidate PDFs of a folder.
//!
//! The selector matches names against the files of one folder. Only the
//! folder itself is listed unless recursion is enabled, in which case files
//! in subfolders join the pool under their bare file name.

use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{PdfDeskError, Result};
use crate::reconcile::CandidateFile;
use crate::utils::file_name_of;

/// Pattern a file name must match to be offered as a candidate.
pub const DEFAULT_PATTERN: &str = "*.pdf";

/// Lists candidate files in a folder.
#[derive(Debug, Clone)]
pub struct FolderScanner {
    recursive: bool,
    matcher: GlobMatcher,
}

impl FolderScanner {
    /// Scanner for `*.pdf` files (any case) directly inside a folder.
    ///
    /// # Errors
    ///
    /// Fails only if [`DEFAULT_PATTERN`] does not compile.
    pub fn new() -> Result<Self> {
        Self::with_pattern(DEFAULT_PATTERN)
    }

    /// Scanner for file names matching `pattern`, compared case-insensitively.
    ///
    /// # Errors
    ///
    /// [`PdfDeskError::InvalidConfig`] if the pattern does not compile.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let glob = GlobBuilder::new(pattern)
            .case_insensitive(true)
            .literal_separator(true)
            .build()
            .map_err(|e| PdfDeskError::invalid_config(format!("Invalid file pattern: {e}")))?;

        Ok(Self {
            recursive: false,
            matcher: glob.compile_matcher(),
        })
    }

    /// Descend into subfolders.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// List the matching files of `folder`, sorted by name then path.
    ///
    /// # Errors
    ///
    /// [`PdfDeskError::FolderNotReadable`] if the folder is missing, is not
    /// a directory, or cannot be listed.
    pub fn scan(&self, folder: &Path) -> Result<Vec<CandidateFile<PathBuf>>> {
        let metadata = std::fs::metadata(folder).map_err(|e| PdfDeskError::FolderNotReadable {
            path: folder.to_path_buf(),
            reason: e.to_string(),
        })?;

        if !metadata.is_dir() {
            return Err(PdfDeskError::FolderNotReadable {
                path: folder.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut candidates = Vec::new();

        for entry in WalkDir::new(folder).min_depth(1).max_depth(max_depth) {
            let entry = entry.map_err(|e| PdfDeskError::FolderNotReadable {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| folder.to_path_buf()),
                reason: e.to_string(),
            })?;

            // Follows a symlinked file but never a symlinked folder.
            if !entry.path().is_file() {
                continue;
            }

            let name = file_name_of(entry.path());
            if !self.matcher.is_match(&name) {
                continue;
            }

            candidates.push(CandidateFile::new(name, entry.into_path()));
        }

        candidates.sort_by(|a, b| {
            a.name()
                .cmp(b.name())
                .then_with(|| a.handle().cmp(b.handle()))
        });

        Ok(candidates)
    }
}
