//! Integration tests for picking PDFs from a folder by name.

use pdfdesk::config::{NamesSource, SelectTask, Task};
use pdfdesk::error::PdfDeskError;
use pdfdesk::ops;
use pdfdesk::output::OutputFormatter;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::common::{config_for, page_labels, write_garbage, write_pdf};

fn select_task(names: &str, folder: &Path, output: PathBuf) -> SelectTask {
    SelectTask {
        names: NamesSource::Inline(names.to_string()),
        folder: folder.to_path_buf(),
        recursive: false,
        strict: false,
        json: false,
        output: Some(output),
    }
}

#[tokio::test]
async fn test_select_joins_in_list_order() {
    let folder = TempDir::new().unwrap();
    write_pdf(folder.path(), "doc1.pdf", 1);
    write_pdf(folder.path(), "Doc2.PDF", 2);
    write_pdf(folder.path(), "other.pdf", 1);

    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("selected.pdf");

    let task = select_task("doc2\n\n  DOC1.pdf  \n", folder.path(), output.clone());
    let outcome = ops::run(&config_for(Task::Select(task)), &OutputFormatter::quiet())
        .await
        .unwrap();

    assert!(outcome.written);
    assert_eq!(outcome.total_pages, 3);
    assert_eq!(
        page_labels(&output),
        vec!["Doc2.PDF-1", "Doc2.PDF-2", "doc1.pdf-1"]
    );
}

#[tokio::test]
async fn test_select_proceeds_with_missing_names() {
    let folder = TempDir::new().unwrap();
    write_pdf(folder.path(), "a.pdf", 1);
    write_pdf(folder.path(), "b.pdf", 1);

    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("out.pdf");

    let task = select_task("a\nmissing\nb\n", folder.path(), output.clone());
    let outcome = ops::run(&config_for(Task::Select(task)), &OutputFormatter::quiet())
        .await
        .unwrap();

    assert!(outcome.written);
    assert_eq!(page_labels(&output), vec!["a.pdf-1", "b.pdf-1"]);
}

#[tokio::test]
async fn test_select_strict_refuses_issues() {
    let folder = TempDir::new().unwrap();
    write_pdf(folder.path(), "a.pdf", 1);
    write_pdf(folder.path(), "b.pdf", 1);

    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("out.pdf");

    let mut task = select_task("a\nb\nmissing\n", folder.path(), output.clone());
    task.strict = true;

    let result = ops::run(&config_for(Task::Select(task)), &OutputFormatter::quiet()).await;

    assert!(matches!(
        result,
        Err(PdfDeskError::SelectionHasIssues { count: 1 })
    ));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_select_duplicate_name_is_not_matched() {
    let folder = TempDir::new().unwrap();
    write_pdf(folder.path(), "a.pdf", 1);
    write_pdf(folder.path(), "b.pdf", 1);

    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("out.pdf");

    let task = select_task("a\nb\na.pdf\n", folder.path(), output.clone());
    let result = ops::run(&config_for(Task::Select(task)), &OutputFormatter::quiet()).await;

    assert!(matches!(
        result,
        Err(PdfDeskError::InsufficientSelection { found: 1 })
    ));
}

#[tokio::test]
async fn test_select_recursive_ambiguity() {
    let folder = TempDir::new().unwrap();
    let nested = folder.path().join("nested");
    std::fs::create_dir(&nested).unwrap();

    write_pdf(folder.path(), "a.pdf", 1);
    write_pdf(&nested, "a.pdf", 1);
    write_pdf(folder.path(), "b.pdf", 1);
    write_pdf(&nested, "c.pdf", 1);

    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("out.pdf");

    let mut task = select_task("a\nb\nc\n", folder.path(), output.clone());
    task.recursive = true;

    let outcome = ops::run(&config_for(Task::Select(task)), &OutputFormatter::quiet())
        .await
        .unwrap();

    assert_eq!(page_labels(&output), vec!["b.pdf-1", "c.pdf-1"]);
    assert_eq!(outcome.total_pages, 2);
}

#[tokio::test]
async fn test_select_ignores_subfolders_by_default() {
    let folder = TempDir::new().unwrap();
    let nested = folder.path().join("nested");
    std::fs::create_dir(&nested).unwrap();

    write_pdf(folder.path(), "a.pdf", 1);
    write_pdf(&nested, "b.pdf", 1);

    let out_dir = TempDir::new().unwrap();
    let task = select_task("a\nb\n", folder.path(), out_dir.path().join("out.pdf"));

    let result = ops::run(&config_for(Task::Select(task)), &OutputFormatter::quiet()).await;

    assert!(matches!(
        result,
        Err(PdfDeskError::InsufficientSelection { found: 1 })
    ));
}

#[tokio::test]
async fn test_select_requires_every_file_to_load() {
    let folder = TempDir::new().unwrap();
    write_pdf(folder.path(), "a.pdf", 1);
    write_garbage(folder.path(), "b.pdf");

    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("out.pdf");

    let task = select_task("a\nb\n", folder.path(), output.clone());
    let result = ops::run(&config_for(Task::Select(task)), &OutputFormatter::quiet()).await;

    assert!(matches!(result, Err(PdfDeskError::FailedToLoadPdf { .. })));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_select_dry_run() {
    let folder = TempDir::new().unwrap();
    write_pdf(folder.path(), "first.pdf", 1);
    write_pdf(folder.path(), "second.pdf", 3);

    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("out.pdf");

    let task = select_task("first\nsecond\n", folder.path(), output.clone());
    let mut config = config_for(Task::Select(task));
    config.dry_run = true;

    let outcome = ops::run(&config, &OutputFormatter::quiet()).await.unwrap();

    assert!(!outcome.written);
    assert_eq!(outcome.total_pages, 4);
    assert!(!output.exists());
}
