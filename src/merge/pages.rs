//! Page-level operations: rebuilding page trees and deleting pages.

use lopdf::{Document, Object, ObjectId};
use std::collections::HashSet;

use crate::config::PageRange;
use crate::error::{PdfDeskError, Result};
use crate::io::LoadedPdf;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Object ID of the root `Pages` node.
pub(crate) fn root_pages_id(doc: &Document) -> Result<ObjectId> {
    doc.catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| PdfDeskError::merge_failed(format!("Failed to get pages reference: {e}")))
}

/// Replace the page tree of `doc` with a flat list of `page_ids`.
///
/// Every listed page becomes a direct child of the root `Pages` node.
/// Attributes a page used to inherit from any ancestor are copied onto the
/// page first, and the root then drops its own inheritable attributes so
/// pages that never had them do not pick them up.
pub(crate) fn rebuild_page_tree(doc: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
    let pages_id = root_pages_id(doc)?;

    for &page_id in page_ids {
        let inherited = inherited_attributes(doc, page_id);

        let page = doc
            .get_dictionary_mut(page_id)
            .map_err(|e| PdfDeskError::merge_failed(format!("Failed to get page: {e}")))?;

        for (key, value) in inherited {
            page.set(key, value);
        }
        page.set("Parent", pages_id);
    }

    let pages = doc
        .get_dictionary_mut(pages_id)
        .map_err(|e| PdfDeskError::merge_failed(format!("Failed to get pages object: {e}")))?;

    for key in INHERITABLE_ATTRIBUTES {
        pages.remove(key);
    }

    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
    pages.set("Kids", kids);
    pages.set("Count", page_ids.len() as i64);

    Ok(())
}

/// Inheritable attributes missing on the page, taken from the nearest
/// ancestor that defines them.
fn inherited_attributes(doc: &Document, page_id: ObjectId) -> Vec<(Vec<u8>, Object)> {
    let mut found = Vec::new();

    let Ok(page) = doc.get_dictionary(page_id) else {
        return found;
    };

    let mut missing: Vec<&[u8]> = INHERITABLE_ATTRIBUTES
        .into_iter()
        .filter(|key| !page.has(key))
        .collect();

    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut visited = HashSet::new();

    while let Some(node_id) = parent {
        if missing.is_empty() || !visited.insert(node_id) {
            break;
        }

        let Ok(node) = doc.get_dictionary(node_id) else {
            break;
        };

        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                found.push((key.to_vec(), value.clone()));
                false
            }
            Err(_) => true,
        });

        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    found
}

/// Removes pages from a loaded document.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageEditor;

impl PageEditor {
    /// Create a new page editor.
    pub fn new() -> Self {
        Self
    }

    /// Build a copy of `source` holding only `keep` (1-indexed), in the
    /// given order.
    ///
    /// Repeated page numbers are kept once. Objects only the dropped pages
    /// used are removed from the copy.
    ///
    /// # Errors
    ///
    /// - [`PdfDeskError::AllPagesDeleted`] if `keep` is empty
    /// - [`PdfDeskError::InvalidPageRange`] if a page does not exist
    pub fn keep_pages(&self, source: &LoadedPdf, keep: &[u32]) -> Result<Document> {
        if keep.is_empty() {
            return Err(PdfDeskError::AllPagesDeleted {
                path: source.path.clone(),
            });
        }

        let all_pages = source.document.get_pages();
        let total_pages = all_pages.len();

        let mut seen = HashSet::new();
        let mut page_ids = Vec::with_capacity(keep.len());

        for &page_num in keep {
            let page_id =
                all_pages
                    .get(&page_num)
                    .copied()
                    .ok_or_else(|| PdfDeskError::InvalidPageRange {
                        path: source.path.clone(),
                        range: page_num.to_string(),
                        total_pages,
                    })?;

            if seen.insert(page_num) {
                page_ids.push(page_id);
            }
        }

        let mut doc = source.document.clone();
        rebuild_page_tree(&mut doc, &page_ids)?;
        doc.prune_objects();

        Ok(doc)
    }

    /// Build a copy of `source` without the pages in `delete`.
    ///
    /// # Errors
    ///
    /// - [`PdfDeskError::InvalidPageRange`] if the range names a page past
    ///   the end of the document
    /// - [`PdfDeskError::AllPagesDeleted`] if no page would remain
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfdesk::merge::pages::PageEditor;
    /// # use pdfdesk::config::PageRange;
    /// # use pdfdesk::io::LoadedPdf;
    /// # fn example(loaded: LoadedPdf) -> Result<(), Box<dyn std::error::Error>> {
    /// let editor = PageEditor::new();
    /// let delete = PageRange::parse("2,4")?;
    /// let edited = editor.delete_pages(&loaded, &delete)?;
    /// println!("{} pages left", editor.page_count(&edited));
    /// # Ok(())
    /// # }
    /// ```
    pub fn delete_pages(&self, source: &LoadedPdf, delete: &PageRange) -> Result<Document> {
        let total_pages = source.page_count;

        if delete.max_page() as usize > total_pages {
            return Err(PdfDeskError::InvalidPageRange {
                path: source.path.clone(),
                range: delete.as_str().to_string(),
                total_pages,
            });
        }

        let keep: Vec<u32> = (1..=total_pages as u32)
            .filter(|page| !delete.contains(*page))
            .collect();

        self.keep_pages(source, &keep)
    }

    /// Get the number of pages in a document.
    pub fn page_count(&self, doc: &Document) -> usize {
        doc.get_pages().len()
    }
}
