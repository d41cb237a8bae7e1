//! Name reconciliation for the batch selector.
//!
//! Given an ordered list of target names (usually pasted, one per line) and
//! the PDF files found in a folder, [`reconcile`] decides which file each
//! name refers to. Names are compared with one trailing `.pdf` removed and
//! without regard to case.
//!
//! The result is a [`ReconciliationReport`] that always covers every name:
//!
//! - names matched to exactly one file (in target order),
//! - names listed more than once (never matched, also reported unmatched),
//! - names matching two or more files, e.g. `report.pdf` and `Report.pdf`,
//! - names matching no file.
//!
//! # Examples
//!
//! ```
//! use pdfdesk::reconcile::{parse_target_names, reconcile, CandidateFile};
//!
//! let targets = parse_target_names("doc1\ndoc2.pdf\n\ndoc3\n");
//! let candidates = vec![
//!     CandidateFile::new("doc1.pdf", 1),
//!     CandidateFile::new("DOC2.PDF", 2),
//! ];
//!
//! let report = reconcile(&targets, &candidates);
//! assert_eq!(report.matched_names(), vec!["doc1.pdf", "DOC2.PDF"]);
//! assert_eq!(report.unmatched, vec!["doc3".to_string()]);
//! assert!(report.is_mergeable());
//! ```

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::PathBuf;

/// Suffix removed from names before comparison.
pub const PDF_SUFFIX: &str = ".pdf";

/// Minimum number of matched files a merge needs.
pub const MIN_FILES_TO_MERGE: usize = 2;

/// Remove one trailing `.pdf` (any case) from a name.
///
/// Internal characters are left alone, so `a.pdf.pdf` becomes `a.pdf`.
///
/// ```
/// use pdfdesk::reconcile::normalize_name;
///
/// assert_eq!(normalize_name("Invoice.PDF"), "Invoice");
/// assert_eq!(normalize_name("notes.txt"), "notes.txt");
/// ```
pub fn normalize_name(name: &str) -> &str {
    let split = name.len().saturating_sub(PDF_SUFFIX.len());
    match name.get(split..) {
        Some(tail) if name.len() >= PDF_SUFFIX.len() && tail.eq_ignore_ascii_case(PDF_SUFFIX) => {
            &name[..split]
        }
        _ => name,
    }
}

/// Key used for case-insensitive comparison of normalized names.
fn match_key(name: &str) -> String {
    normalize_name(name).to_lowercase()
}

/// A name the user wants selected, as typed on one line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TargetName(String);

impl TargetName {
    /// Build a target from one line of input.
    ///
    /// Returns `None` for blank lines.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The trimmed line as entered.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name used for matching (trailing `.pdf` removed).
    pub fn normalized(&self) -> &str {
        normalize_name(&self.0)
    }
}

impl AsRef<str> for TargetName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split pasted text into target names, one per non-blank line.
///
/// Order of appearance is kept; repeated lines are kept too so that
/// [`reconcile`] can report them.
pub fn parse_target_names(text: &str) -> Vec<TargetName> {
    text.lines().filter_map(TargetName::parse).collect()
}

/// A file that a target name may resolve to.
///
/// `handle` is whatever the caller needs to get at the file later; the
/// matching logic only looks at `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateFile<H = PathBuf> {
    name: String,
    handle: H,
}

impl<H> CandidateFile<H> {
    /// Create a candidate from its file name and handle.
    pub fn new(name: impl Into<String>, handle: H) -> Self {
        Self {
            name: name.into(),
            handle,
        }
    }

    /// File name, case preserved.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name with the trailing `.pdf` removed.
    pub fn normalized_name(&self) -> &str {
        normalize_name(&self.name)
    }

    /// The payload handle.
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Consume the candidate, keeping only the handle.
    pub fn into_handle(self) -> H {
        self.handle
    }
}

/// Outcome of resolving a single target against a [`CandidatePool`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult<'a, H> {
    /// Exactly one unconsumed candidate matched; it is now consumed.
    Matched(&'a CandidateFile<H>),
    /// Two or more unconsumed candidates matched.
    Ambiguous(String),
    /// No unconsumed candidate matched.
    Unmatched(String),
}

/// Candidates with their match keys and consumption flags.
///
/// A candidate taken by one target is never handed out again by the same
/// pool.
pub struct CandidatePool<'a, H> {
    candidates: &'a [CandidateFile<H>],
    keys: Vec<String>,
    consumed: Vec<bool>,
}

impl<'a, H> CandidatePool<'a, H> {
    /// Create a pool where every candidate is still available.
    pub fn new(candidates: &'a [CandidateFile<H>]) -> Self {
        Self {
            candidates,
            keys: candidates.iter().map(|c| match_key(&c.name)).collect(),
            consumed: vec![false; candidates.len()],
        }
    }

    /// Resolve one target name, consuming the candidate on a unique match.
    pub fn resolve(&mut self, target: &str) -> MatchResult<'a, H> {
        let name = normalize_name(target.trim());
        let key = name.to_lowercase();

        let hits: Vec<usize> = self
            .keys
            .iter()
            .enumerate()
            .filter(|(idx, candidate_key)| !self.consumed[*idx] && **candidate_key == key)
            .map(|(idx, _)| idx)
            .collect();

        match hits.as_slice() {
            [] => MatchResult::Unmatched(name.to_string()),
            [idx] => {
                self.consumed[*idx] = true;
                MatchResult::Matched(&self.candidates[*idx])
            }
            _ => MatchResult::Ambiguous(name.to_string()),
        }
    }

    /// Number of candidates not yet consumed.
    pub fn remaining(&self) -> usize {
        self.consumed.iter().filter(|taken| !**taken).count()
    }
}

/// One problem found while reconciling names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", content = "name", rename_all = "camelCase")]
pub enum SelectionIssue {
    /// The name appears more than once in the target list.
    #[error("Duplicate name in list: {0}")]
    DuplicateTargetName(String),
    /// More than one file in the folder matches the name.
    #[error("More than one file matches: {0}")]
    AmbiguousMatch(String),
    /// No file in the folder matches the name.
    #[error("No file found for: {0}")]
    UnmatchedTargetName(String),
}

/// Result of one reconciliation pass.
///
/// Name lists hold normalized names in the order they first appeared in the
/// target list. A duplicate name is listed in both `duplicates` and
/// `unmatched`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationReport<H = PathBuf> {
    /// Matched files, in target order.
    pub matched: Vec<CandidateFile<H>>,
    /// Names listed more than once.
    pub duplicates: Vec<String>,
    /// Names matching more than one file.
    pub ambiguous: Vec<String>,
    /// Names matching no file (duplicates included).
    pub unmatched: Vec<String>,
}

impl<H> Default for ReconciliationReport<H> {
    fn default() -> Self {
        Self {
            matched: Vec::new(),
            duplicates: Vec::new(),
            ambiguous: Vec::new(),
            unmatched: Vec::new(),
        }
    }
}

impl<H> ReconciliationReport<H> {
    /// Number of matched files.
    pub fn found(&self) -> usize {
        self.matched.len()
    }

    /// Whether the report lists any duplicate, ambiguous or unmatched name.
    pub fn has_issues(&self) -> bool {
        self.issue_count() > 0
    }

    /// Total number of listed problems.
    pub fn issue_count(&self) -> usize {
        self.duplicates.len() + self.ambiguous.len() + self.unmatched.len()
    }

    /// All problems as user-facing issues: duplicates, then ambiguous names,
    /// then unmatched names.
    pub fn issues(&self) -> Vec<SelectionIssue> {
        let duplicates = self
            .duplicates
            .iter()
            .cloned()
            .map(SelectionIssue::DuplicateTargetName);
        let ambiguous = self
            .ambiguous
            .iter()
            .cloned()
            .map(SelectionIssue::AmbiguousMatch);
        let unmatched = self
            .unmatched
            .iter()
            .cloned()
            .map(SelectionIssue::UnmatchedTargetName);

        duplicates.chain(ambiguous).chain(unmatched).collect()
    }

    /// Whether enough files matched to join them.
    pub fn is_mergeable(&self) -> bool {
        self.found() >= MIN_FILES_TO_MERGE
    }

    /// Names of the matched files, in order.
    pub fn matched_names(&self) -> Vec<&str> {
        self.matched.iter().map(CandidateFile::name).collect()
    }

    /// Drop a matched file from the selection by its exact file name.
    ///
    /// Returns `true` if a file was removed.
    pub fn remove_matched(&mut self, name: &str) -> bool {
        let before = self.matched.len();
        self.matched.retain(|file| file.name() != name);
        self.matched.len() != before
    }

    /// Consume the report, keeping the matched handles in order.
    pub fn into_matched_handles(self) -> Vec<H> {
        self.matched
            .into_iter()
            .map(CandidateFile::into_handle)
            .collect()
    }
}

/// Reconcile an ordered list of target names against candidate files.
///
/// Targets are trimmed and normalized here, so raw lines and
/// [`TargetName`]s are both accepted; blank entries are ignored. The
/// function is pure and never fails: an empty target list gives an empty
/// report.
pub fn reconcile<T, H>(targets: &[T], candidates: &[CandidateFile<H>]) -> ReconciliationReport<H>
where
    T: AsRef<str>,
    H: Clone,
{
    let names: Vec<&str> = targets
        .iter()
        .map(|target| target.as_ref().trim())
        .filter(|target| !target.is_empty())
        .map(normalize_name)
        .collect();

    let mut multiplicity: HashMap<String, usize> = HashMap::new();
    for name in &names {
        *multiplicity.entry(name.to_lowercase()).or_default() += 1;
    }

    let mut pool = CandidatePool::new(candidates);
    let mut processed = HashSet::new();
    let mut report = ReconciliationReport::default();

    for name in names {
        let key = name.to_lowercase();
        if !processed.insert(key.clone()) {
            continue;
        }

        if multiplicity.get(&key).copied().unwrap_or(0) > 1 {
            report.duplicates.push(name.to_string());
            report.unmatched.push(name.to_string());
            continue;
        }

        match pool.resolve(name) {
            MatchResult::Matched(file) => report.matched.push(file.clone()),
            MatchResult::Ambiguous(name) => report.ambiguous.push(name),
            MatchResult::Unmatched(name) => report.unmatched.push(name),
        }
    }

    report
}
