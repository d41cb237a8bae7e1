//! Integration tests for error handling and edge cases.

use pdfdesk::config::{EditTask, JoinTask, NamesSource, PageRange, SelectTask, Task};
use pdfdesk::error::PdfDeskError;
use pdfdesk::ops;
use pdfdesk::output::OutputFormatter;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{config_for, write_garbage, write_pdf};

#[tokio::test]
async fn test_edit_nonexistent_input() {
    let task = EditTask {
        input: PathBuf::from("/nonexistent/file.pdf"),
        delete: PageRange::parse("1").unwrap(),
        output: None,
    };

    let result = ops::run(&config_for(Task::Edit(task)), &OutputFormatter::quiet()).await;

    let err = result.unwrap_err();
    assert!(matches!(err, PdfDeskError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_edit_not_a_pdf() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_garbage(temp_dir.path(), "broken.pdf");

    let task = EditTask {
        input,
        delete: PageRange::parse("1").unwrap(),
        output: None,
    };

    let result = ops::run(&config_for(Task::Edit(task)), &OutputFormatter::quiet()).await;
    assert!(matches!(result, Err(PdfDeskError::FailedToLoadPdf { .. })));
}

#[tokio::test]
async fn test_join_missing_file_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 1);
    let b = write_pdf(temp_dir.path(), "b.pdf", 1);

    let task = JoinTask {
        inputs: vec![a, temp_dir.path().join("gone.pdf"), b],
        output: Some(temp_dir.path().join("out.pdf")),
    };

    let result = ops::run(&config_for(Task::Join(task)), &OutputFormatter::quiet()).await;
    assert!(matches!(result, Err(PdfDeskError::FileNotFound { .. })));
}

#[tokio::test]
async fn test_join_output_equals_input() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 1);
    let b = write_pdf(temp_dir.path(), "b.pdf", 1);

    let task = JoinTask {
        inputs: vec![a.clone(), b],
        output: Some(a),
    };

    let result = ops::run(&config_for(Task::Join(task)), &OutputFormatter::quiet()).await;
    assert!(matches!(result, Err(PdfDeskError::InvalidConfig { .. })));
}

#[tokio::test]
async fn test_select_without_names() {
    let folder = TempDir::new().unwrap();
    write_pdf(folder.path(), "a.pdf", 1);

    let task = SelectTask {
        names: NamesSource::Inline("\n   \n".to_string()),
        folder: folder.path().to_path_buf(),
        recursive: false,
        strict: false,
        json: false,
        output: None,
    };

    let result = ops::run(&config_for(Task::Select(task)), &OutputFormatter::quiet()).await;
    assert!(matches!(result, Err(PdfDeskError::NoTargetsProvided)));
}

#[tokio::test]
async fn test_select_missing_folder() {
    let task = SelectTask {
        names: NamesSource::Inline("a\nb\n".to_string()),
        folder: PathBuf::from("/nonexistent/folder"),
        recursive: false,
        strict: false,
        json: false,
        output: None,
    };

    let result = ops::run(&config_for(Task::Select(task)), &OutputFormatter::quiet()).await;
    assert!(matches!(result, Err(PdfDeskError::FolderNotReadable { .. })));
}

#[tokio::test]
async fn test_select_missing_names_file() {
    let folder = TempDir::new().unwrap();

    let task = SelectTask {
        names: NamesSource::File(folder.path().join("names.txt")),
        folder: folder.path().to_path_buf(),
        recursive: false,
        strict: false,
        json: false,
        output: None,
    };

    let result = ops::run(&config_for(Task::Select(task)), &OutputFormatter::quiet()).await;
    assert!(matches!(result, Err(PdfDeskError::FailedToReadNames { .. })));
}

#[tokio::test]
async fn test_write_into_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 1);
    let b = write_pdf(temp_dir.path(), "b.pdf", 1);

    let task = JoinTask {
        inputs: vec![a, b],
        output: Some(temp_dir.path().join("missing").join("out.pdf")),
    };

    let result = ops::run(&config_for(Task::Join(task)), &OutputFormatter::quiet()).await;
    assert!(matches!(result, Err(PdfDeskError::InvalidConfig { .. })));
}
