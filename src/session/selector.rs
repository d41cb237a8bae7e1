//! State of the name-based batch selector.
//!
//! The selector holds three things: the target names last entered, the
//! candidate files of the folder last chosen, and the report of the last
//! search. Each command replaces one of them wholesale; nothing is patched
//! incrementally.

use std::path::PathBuf;

use crate::error::{PdfDeskError, Result};
use crate::merge::naming::selection_file_name;
use crate::reconcile::{
    CandidateFile, MIN_FILES_TO_MERGE, ReconciliationReport, TargetName, parse_target_names,
    reconcile,
};

/// Selector state for one user session.
///
/// `H` is the handle carried by each candidate, a path for files on disk.
///
/// # Examples
///
/// ```
/// use pdfdesk::reconcile::CandidateFile;
/// use pdfdesk::session::SelectorSession;
///
/// let mut session = SelectorSession::new();
/// session.on_names_changed("doc1\ndoc2\n");
/// session.on_folder_chosen(vec![
///     CandidateFile::new("doc1.pdf", 'a'),
///     CandidateFile::new("doc2.pdf", 'b'),
/// ]);
///
/// let report = session.on_search_requested().unwrap();
/// assert_eq!(report.found(), 2);
/// assert_eq!(session.on_merge_requested().unwrap(), vec!['a', 'b']);
/// ```
#[derive(Debug, Clone)]
pub struct SelectorSession<H = PathBuf> {
    targets: Vec<TargetName>,
    candidates: Vec<CandidateFile<H>>,
    report: Option<ReconciliationReport<H>>,
}

impl<H> Default for SelectorSession<H> {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            candidates: Vec::new(),
            report: None,
        }
    }
}

impl<H: Clone> SelectorSession<H> {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the target list with the non-blank lines of `text`.
    ///
    /// The previous report no longer describes the inputs and is dropped.
    pub fn on_names_changed(&mut self, text: &str) {
        self.targets = parse_target_names(text);
        self.report = None;
    }

    /// Replace the candidate pool with the files of a newly chosen folder.
    pub fn on_folder_chosen(&mut self, files: Vec<CandidateFile<H>>) {
        self.candidates = files;
        self.report = None;
    }

    /// Reconcile the current names against the current folder.
    ///
    /// # Errors
    ///
    /// [`PdfDeskError::NoTargetsProvided`] if no name has been entered.
    pub fn on_search_requested(&mut self) -> Result<&ReconciliationReport<H>> {
        if self.targets.is_empty() {
            return Err(PdfDeskError::NoTargetsProvided);
        }

        let report = reconcile(&self.targets, &self.candidates);
        Ok(&*self.report.insert(report))
    }

    /// Handles of the files to join, in target order.
    ///
    /// # Errors
    ///
    /// [`PdfDeskError::InsufficientSelection`] if fewer than two files are
    /// selected, including when no search has run.
    pub fn on_merge_requested(&self) -> Result<Vec<H>> {
        let found = self.report.as_ref().map_or(0, ReconciliationReport::found);

        if found < MIN_FILES_TO_MERGE {
            return Err(PdfDeskError::insufficient_selection(found));
        }

        Ok(self
            .report
            .as_ref()
            .map(|report| report.matched.iter().map(|file| file.handle().clone()).collect())
            .unwrap_or_default())
    }

    /// Drop a matched file from the current selection by its file name.
    ///
    /// Returns `true` if the file was selected.
    pub fn remove_selected(&mut self, name: &str) -> bool {
        self.report
            .as_mut()
            .is_some_and(|report| report.remove_matched(name))
    }

    /// Current target names.
    pub fn targets(&self) -> &[TargetName] {
        &self.targets
    }

    /// Current candidate files.
    pub fn candidates(&self) -> &[CandidateFile<H>] {
        &self.candidates
    }

    /// Report of the last search, if still current.
    pub fn report(&self) -> Option<&ReconciliationReport<H>> {
        self.report.as_ref()
    }

    /// Default output name for the current selection.
    pub fn output_name(&self) -> Option<String> {
        self.report
            .as_ref()
            .filter(|report| report.found() > 0)
            .map(|report| selection_file_name(&report.matched_names()))
    }
}
