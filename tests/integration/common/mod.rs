//! Shared helpers for the integration tests.
//!
//! Fixtures are generated with lopdf into a temporary directory, so every
//! test owns its files.

#![allow(dead_code)]

use lopdf::{Document, Object, dictionary};
use pdfdesk::config::{CompressionLevel, Config, OverwriteMode, Task};
use std::path::{Path, PathBuf};

/// Write a PDF with `pages` blank pages to `dir/name`.
///
/// Each page carries a `Label` entry `<name>-<n>` so tests can check page
/// order after editing or joining.
pub fn write_pdf(dir: &Path, name: &str, pages: usize) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (1..=pages)
        .map(|n| {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Label" => Object::string_literal(format!("{name}-{n}")),
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }
        .into(),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let path = dir.join(name);
    doc.save(&path).expect("Failed to write fixture");
    path
}

/// Write a file that has a `.pdf` name but is not a PDF.
pub fn write_garbage(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"this is not a pdf").expect("Failed to write fixture");
    path
}

/// Config for `task` that never prompts or prints.
pub fn config_for(task: Task) -> Config {
    Config {
        task,
        dry_run: false,
        verbose: false,
        quiet: true,
        overwrite_mode: OverwriteMode::Force,
        compression: CompressionLevel::Standard,
        jobs: Some(2),
    }
}

/// Page labels of the PDF at `path`, in page order.
pub fn page_labels(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("Failed to load output");
    doc.get_pages()
        .values()
        .map(|id| {
            let page = doc.get_dictionary(*id).expect("Page is not a dictionary");
            let label = page
                .get(b"Label")
                .and_then(Object::as_str)
                .expect("Page has no label");
            String::from_utf8_lossy(label).into_owned()
        })
        .collect()
}
