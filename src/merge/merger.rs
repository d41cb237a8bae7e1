//! Core PDF merging implementation.
//!
//! Documents are concatenated in the order given; each document keeps its
//! own page order. The first document is the base: its catalog and root
//! page tree node are kept, and every page of every document is hung
//! directly under that root.

use lopdf::{Document, Object, ObjectId};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::error::{PdfDeskError, Result};
use crate::io::LoadedPdf;
use crate::merge::pages::rebuild_page_tree;
use crate::utils::format_file_size;

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of PDFs merged.
    pub files_merged: usize,

    /// Total number of pages in merged document.
    pub total_pages: usize,

    /// Time taken to combine the documents.
    pub merge_time: Duration,

    /// Total size of input files.
    pub input_size: u64,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// Result of a merge operation.
#[derive(Debug)]
pub struct MergeResult {
    /// The merged PDF document.
    pub document: Document,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,

    /// Paths of files that were merged, in merge order.
    pub merged_files: Vec<PathBuf>,
}

/// PDF merger that combines multiple documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct Merger;

impl Merger {
    /// Create a new merger.
    pub fn new() -> Self {
        Self
    }

    /// Merge loaded PDFs in the given order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `inputs` is empty
    /// - A document has no usable page tree
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfdesk::merge::Merger;
    /// # use pdfdesk::io::LoadedPdf;
    /// # fn example(loaded: Vec<LoadedPdf>) -> Result<(), Box<dyn std::error::Error>> {
    /// let result = Merger::new().merge(&loaded)?;
    /// println!("Merged {} files into {} pages",
    ///          result.statistics.files_merged,
    ///          result.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub fn merge(&self, inputs: &[LoadedPdf]) -> Result<MergeResult> {
        let start = Instant::now();

        let document = self.merge_documents(inputs.iter().map(|loaded| &loaded.document))?;

        let statistics = MergeStatistics {
            files_merged: inputs.len(),
            total_pages: document.get_pages().len(),
            merge_time: start.elapsed(),
            input_size: inputs.iter().map(|loaded| loaded.file_size).sum(),
        };

        Ok(MergeResult {
            document,
            statistics,
            merged_files: inputs.iter().map(|loaded| loaded.path.clone()).collect(),
        })
    }

    /// Concatenate documents into a new one.
    ///
    /// # Errors
    ///
    /// [`PdfDeskError::NoFilesToMerge`] if `documents` is empty.
    pub fn merge_documents<'a, I>(&self, documents: I) -> Result<Document>
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut documents = documents.into_iter();
        let first = documents.next().ok_or(PdfDeskError::NoFilesToMerge)?;

        let mut merged = first.clone();
        let mut page_ids: Vec<ObjectId> = merged.get_pages().into_values().collect();
        let mut max_id = merged.max_id;

        for source in documents {
            let mut doc = source.clone();

            // Renumber objects to avoid ID conflicts
            doc.renumber_objects_with(max_id + 1);
            max_id = max_id.max(doc.max_id);

            page_ids.extend(doc.get_pages().into_values());

            let catalog_id = doc
                .trailer
                .get(b"Root")
                .and_then(Object::as_reference)
                .ok();

            merged.objects.extend(doc.objects);

            // Only the base catalog survives.
            if let Some(catalog_id) = catalog_id {
                merged.objects.remove(&catalog_id);
            }
        }

        merged.max_id = max_id;
        rebuild_page_tree(&mut merged, &page_ids)?;

        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::test_support::{build_test_document, page_labels};

    fn loaded(tag: &str, pages: usize) -> LoadedPdf {
        let document = build_test_document(tag, pages);
        LoadedPdf {
            page_count: pages,
            document,
            path: PathBuf::from(format!("{tag}.pdf")),
            load_time: Duration::ZERO,
            file_size: 1024,
        }
    }

    #[test]
    fn test_merge_two_pdfs() {
        let result = Merger::new()
            .merge(&[loaded("a", 1), loaded("b", 2)])
            .unwrap();

        assert_eq!(result.statistics.files_merged, 2);
        assert_eq!(result.statistics.total_pages, 3);
        assert_eq!(page_labels(&result.document), vec!["a-1", "b-1", "b-2"]);
        assert_eq!(
            result.merged_files,
            vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")]
        );
    }

    #[test]
    fn test_merge_one_one_three() {
        let result = Merger::new()
            .merge(&[loaded("a", 1), loaded("b", 1), loaded("c", 3)])
            .unwrap();

        assert_eq!(result.statistics.total_pages, 5);
        assert_eq!(
            page_labels(&result.document),
            vec!["a-1", "b-1", "c-1", "c-2", "c-3"]
        );
    }

    #[test]
    fn test_merge_rewrites_parent_links() {
        let result = Merger::new()
            .merge(&[loaded("a", 1), loaded("b", 2)])
            .unwrap();
        let doc = &result.document;

        let root = crate::merge::pages::root_pages_id(doc).unwrap();
        for page_id in doc.get_pages().into_values() {
            let parent = doc
                .get_dictionary(page_id)
                .unwrap()
                .get(b"Parent")
                .unwrap()
                .as_reference()
                .unwrap();
            assert_eq!(parent, root);
        }
    }

    #[test]
    fn test_merge_same_document_twice() {
        let a = loaded("a", 2);
        let merged = Merger::new()
            .merge_documents([&a.document, &a.document])
            .unwrap();

        assert_eq!(page_labels(&merged), vec!["a-1", "a-2", "a-1", "a-2"]);
    }

    #[test]
    fn test_root_rotation_stays_with_first_document() {
        let mut a = build_test_document("a", 1);
        let a_root = crate::merge::pages::root_pages_id(&a).unwrap();
        a.get_dictionary_mut(a_root).unwrap().set("Rotate", 90);
        let b = build_test_document("b", 1);

        let merged = Merger::new().merge_documents([&a, &b]).unwrap();

        let root_id = crate::merge::pages::root_pages_id(&merged).unwrap();
        assert!(!merged.get_dictionary(root_id).unwrap().has(b"Rotate"));

        let pages: Vec<_> = merged.get_pages().into_values().collect();
        let first = merged.get_dictionary(pages[0]).unwrap();
        assert_eq!(first.get(b"Rotate").unwrap().as_i64().unwrap(), 90);

        let appended = merged.get_dictionary(pages[1]).unwrap();
        assert!(!appended.has(b"Rotate"));
    }

    #[test]
    fn test_merge_single_pdf() {
        let result = Merger::new().merge(&[loaded("solo", 2)]).unwrap();

        assert_eq!(result.statistics.files_merged, 1);
        assert_eq!(result.statistics.total_pages, 2);
    }

    #[test]
    fn test_merge_nothing() {
        let result = Merger::new().merge(&[]);
        assert!(matches!(result, Err(PdfDeskError::NoFilesToMerge)));
    }

    #[test]
    fn test_merge_statistics() {
        let result = Merger::new()
            .merge(&[loaded("a", 1), loaded("b", 1)])
            .unwrap();

        assert_eq!(result.statistics.input_size, 2048);
        assert_eq!(result.statistics.format_input_size(), "2.00 KB");
    }
}
