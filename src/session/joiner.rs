//! State of the multi-file joiner: an ordered, user-managed list of PDFs.

use std::path::{Path, PathBuf};

use crate::error::{PdfDeskError, Result};
use crate::io::LoadedPdf;
use crate::merge::naming::joined_file_name;
use crate::reconcile::MIN_FILES_TO_MERGE;
use crate::utils::{format_file_size, has_pdf_extension};

/// One file in the join list.
///
/// `S` is whatever the caller needs to join the file later: a path, or the
/// already loaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinEntry<S = PathBuf> {
    name: String,
    file_size: u64,
    page_count: usize,
    source: S,
}

impl<S> JoinEntry<S> {
    /// Create an entry.
    pub fn new(name: impl Into<String>, file_size: u64, page_count: usize, source: S) -> Self {
        Self {
            name: name.into(),
            file_size,
            page_count,
            source,
        }
    }

    /// File name shown in the list.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size of the file in bytes.
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// The payload given at creation.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Consume the entry, keeping the payload.
    pub fn into_source(self) -> S {
        self.source
    }

    /// List line, e.g. `a.pdf  1.50 KB (3 pages)`.
    pub fn describe(&self) -> String {
        format!(
            "{}  {} ({} page{})",
            self.name,
            format_file_size(self.file_size),
            self.page_count,
            if self.page_count == 1 { "" } else { "s" }
        )
    }
}

impl JoinEntry<LoadedPdf> {
    /// Entry carrying a loaded document.
    pub fn from_loaded(loaded: LoadedPdf) -> Self {
        Self::new(loaded.name(), loaded.file_size, loaded.page_count, loaded)
    }
}

/// What a join will produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinPlan {
    /// Names of the files to join, in order.
    pub names: Vec<String>,
    /// Suggested output file name.
    pub output_name: String,
    /// Page count of the joined document.
    pub total_pages: usize,
}

/// Ordered join list.
#[derive(Debug, Clone)]
pub struct JoinerSession<S = PathBuf> {
    entries: Vec<JoinEntry<S>>,
}

impl<S> Default for JoinerSession<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<S> JoinerSession<S> {
    /// Create an empty join list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file to the end of the list.
    ///
    /// # Errors
    ///
    /// [`PdfDeskError::NotAPdf`] if the name does not end in `.pdf`.
    pub fn add(&mut self, entry: JoinEntry<S>) -> Result<()> {
        if !has_pdf_extension(Path::new(entry.name())) {
            return Err(PdfDeskError::NotAPdf {
                path: PathBuf::from(entry.name()),
            });
        }

        self.entries.push(entry);
        Ok(())
    }

    /// Swap the entry at `index` with the one before it.
    ///
    /// Returns `false` (and changes nothing) for the first entry or an
    /// index past the end.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.entries.len() {
            return false;
        }

        self.entries.swap(index, index - 1);
        true
    }

    /// Swap the entry at `index` with the one after it.
    ///
    /// Returns `false` (and changes nothing) for the last entry or an
    /// index past the end.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index >= self.entries.len().saturating_sub(1) {
            return false;
        }

        self.entries.swap(index, index + 1);
        true
    }

    /// Remove and return the entry at `index`.
    pub fn remove(&mut self, index: usize) -> Option<JoinEntry<S>> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Empty the list.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in join order.
    pub fn entries(&self) -> &[JoinEntry<S>] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether enough files are listed to join.
    pub fn can_join(&self) -> bool {
        self.entries.len() >= MIN_FILES_TO_MERGE
    }

    /// Describe the join of the current list.
    ///
    /// # Errors
    ///
    /// [`PdfDeskError::InsufficientSelection`] with fewer than two entries.
    pub fn join_plan(&self) -> Result<JoinPlan> {
        if !self.can_join() {
            return Err(PdfDeskError::insufficient_selection(self.entries.len()));
        }

        let names: Vec<String> = self.entries.iter().map(|e| e.name.clone()).collect();

        Ok(JoinPlan {
            output_name: joined_file_name(&names),
            total_pages: self.entries.iter().map(|e| e.page_count).sum(),
            names,
        })
    }

    /// One-line summary of the list.
    pub fn status_line(&self) -> String {
        match self.entries.len() {
            0 => "Add PDFs to join".to_string(),
            1 => "1 PDF ready to join".to_string(),
            n => format!("{n} PDFs ready to join"),
        }
    }

    /// Consume the session, keeping the payloads in join order.
    pub fn into_sources(self) -> Vec<S> {
        self.entries.into_iter().map(JoinEntry::into_source).collect()
    }
}
