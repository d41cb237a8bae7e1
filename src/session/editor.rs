//! State of the page-deletion editor.
//!
//! One document is open at a time. Pages are marked for deletion one by one
//! (or from a page range); saving keeps every unmarked page in order.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::config::PageRange;
use crate::error::{PdfDeskError, Result};
use crate::merge::naming::edited_file_name;
use crate::utils::file_name_of;

/// What saving the edited document will produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPlan {
    /// Document being edited.
    pub source: PathBuf,
    /// 1-indexed pages to keep, ascending.
    pub keep: Vec<u32>,
    /// 1-indexed pages to drop, ascending.
    pub delete: Vec<u32>,
    /// Suggested output file name.
    pub output_name: String,
}

/// Editor state: the open document and its marked pages.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    source: Option<PathBuf>,
    page_count: usize,
    marked: BTreeSet<u32>,
}

impl EditorSession {
    /// Create an editor with no document open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a document with `page_count` pages, clearing any marks.
    pub fn open(&mut self, path: impl Into<PathBuf>, page_count: usize) {
        self.source = Some(path.into());
        self.page_count = page_count;
        self.marked.clear();
    }

    /// Mark page `page` for deletion, or unmark it if already marked.
    ///
    /// Returns whether the page is marked afterwards.
    ///
    /// # Errors
    ///
    /// [`PdfDeskError::InvalidPageRange`] if the page does not exist.
    pub fn toggle_page(&mut self, page: u32) -> Result<bool> {
        self.check_page(page, &page.to_string())?;

        if self.marked.remove(&page) {
            Ok(false)
        } else {
            self.marked.insert(page);
            Ok(true)
        }
    }

    /// Mark every page of `range` for deletion.
    ///
    /// # Errors
    ///
    /// [`PdfDeskError::InvalidPageRange`] if the range goes past the last
    /// page; no page is marked in that case.
    pub fn mark_range(&mut self, range: &PageRange) -> Result<()> {
        self.check_page(range.max_page(), range.as_str())?;
        self.marked.extend(range.to_pages(self.page_count as u32));
        Ok(())
    }

    /// Whether page `page` is marked.
    pub fn is_marked(&self, page: u32) -> bool {
        self.marked.contains(&page)
    }

    /// Number of marked pages.
    pub fn marked_count(&self) -> usize {
        self.marked.len()
    }

    /// Marked pages, ascending.
    pub fn marked_pages(&self) -> Vec<u32> {
        self.marked.iter().copied().collect()
    }

    /// Unmarked pages, ascending.
    pub fn pages_to_keep(&self) -> Vec<u32> {
        (1..=self.page_count as u32)
            .filter(|page| !self.marked.contains(page))
            .collect()
    }

    /// Total pages of the open document.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// The open document, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Describe the save of the current marks.
    ///
    /// # Errors
    ///
    /// - [`PdfDeskError::NoPagesMarked`] if nothing is marked
    /// - [`PdfDeskError::AllPagesDeleted`] if every page is marked
    pub fn save_plan(&self) -> Result<EditPlan> {
        let source = match &self.source {
            Some(source) if !self.marked.is_empty() => source,
            _ => return Err(PdfDeskError::NoPagesMarked),
        };

        let keep = self.pages_to_keep();
        if keep.is_empty() {
            return Err(PdfDeskError::AllPagesDeleted {
                path: source.clone(),
            });
        }

        Ok(EditPlan {
            source: source.clone(),
            keep,
            delete: self.marked_pages(),
            output_name: edited_file_name(&file_name_of(source)),
        })
    }

    /// One-line summary of the editor state.
    pub fn status_line(&self) -> String {
        match (self.source.is_some(), self.marked.len()) {
            (false, _) => "No PDF open".to_string(),
            (true, 0) => format!("Total pages: {}", self.page_count),
            (true, 1) => "1 page marked for deletion".to_string(),
            (true, n) => format!("{n} pages marked for deletion"),
        }
    }

    /// Unmark every page.
    pub fn clear(&mut self) {
        self.marked.clear();
    }

    fn check_page(&self, page: u32, range: &str) -> Result<()> {
        if page == 0 || page as usize > self.page_count {
            return Err(PdfDeskError::InvalidPageRange {
                path: self.source.clone().unwrap_or_default(),
                range: range.to_string(),
                total_pages: self.page_count,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor(pages: usize) -> EditorSession {
        let mut editor = EditorSession::new();
        editor.open("/docs/report.pdf", pages);
        editor
    }

    #[test]
    fn test_toggle_twice_unmarks() {
        let mut editor = editor(3);

        assert!(editor.toggle_page(2).unwrap());
        assert!(editor.is_marked(2));
        assert!(!editor.toggle_page(2).unwrap());
        assert!(!editor.is_marked(2));
        assert_eq!(editor.marked_count(), 0);
    }

    #[test]
    fn test_toggle_out_of_range() {
        let mut editor = editor(3);

        assert!(matches!(
            editor.toggle_page(0),
            Err(PdfDeskError::InvalidPageRange { .. })
        ));
        assert!(matches!(
            editor.toggle_page(4),
            Err(PdfDeskError::InvalidPageRange { total_pages: 3, .. })
        ));
    }

    #[test]
    fn test_toggle_without_document() {
        let mut editor = EditorSession::new();
        assert!(editor.toggle_page(1).is_err());
    }

    #[test]
    fn test_save_plan_keeps_unmarked_pages() {
        let mut editor = editor(5);
        editor.toggle_page(4).unwrap();
        editor.toggle_page(2).unwrap();

        let plan = editor.save_plan().unwrap();
        assert_eq!(plan.keep, vec![1, 3, 5]);
        assert_eq!(plan.delete, vec![2, 4]);
        assert_eq!(plan.output_name, "report-modified.pdf");
        assert_eq!(plan.source, PathBuf::from("/docs/report.pdf"));
    }

    #[test]
    fn test_save_plan_nothing_marked() {
        let editor = editor(5);
        assert!(matches!(editor.save_plan(), Err(PdfDeskError::NoPagesMarked)));

        assert!(matches!(
            EditorSession::new().save_plan(),
            Err(PdfDeskError::NoPagesMarked)
        ));
    }

    #[test]
    fn test_save_plan_everything_marked() {
        let mut editor = editor(2);
        editor.toggle_page(1).unwrap();
        editor.toggle_page(2).unwrap();

        assert!(matches!(
            editor.save_plan(),
            Err(PdfDeskError::AllPagesDeleted { .. })
        ));
    }

    #[test]
    fn test_mark_range() {
        let mut editor = editor(6);
        editor.mark_range(&PageRange::parse("2-3,6").unwrap()).unwrap();

        assert_eq!(editor.marked_pages(), vec![2, 3, 6]);
        assert_eq!(editor.pages_to_keep(), vec![1, 4, 5]);
    }

    #[test]
    fn test_mark_range_past_end() {
        let mut editor = editor(3);
        let result = editor.mark_range(&PageRange::parse("2-5").unwrap());

        assert!(matches!(result, Err(PdfDeskError::InvalidPageRange { .. })));
        assert_eq!(editor.marked_count(), 0);
    }

    #[test]
    fn test_open_resets_marks() {
        let mut editor = editor(3);
        editor.toggle_page(1).unwrap();

        editor.open("/docs/other.pdf", 2);
        assert_eq!(editor.marked_count(), 0);
        assert_eq!(editor.page_count(), 2);
    }

    #[test]
    fn test_clear_and_status_line() {
        let mut editor = EditorSession::new();
        assert_eq!(editor.status_line(), "No PDF open");

        editor.open("a.pdf", 4);
        assert_eq!(editor.status_line(), "Total pages: 4");

        editor.toggle_page(1).unwrap();
        assert_eq!(editor.status_line(), "1 page marked for deletion");

        editor.toggle_page(3).unwrap();
        assert_eq!(editor.status_line(), "2 pages marked for deletion");

        editor.clear();
        assert_eq!(editor.marked_count(), 0);
    }
}
