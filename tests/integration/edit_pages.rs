//! Integration tests for deleting pages from one PDF.

use pdfdesk::config::{EditTask, PageRange, Task};
use pdfdesk::error::PdfDeskError;
use pdfdesk::ops;
use pdfdesk::output::OutputFormatter;
use tempfile::TempDir;

use crate::common::{config_for, page_labels, write_pdf};

fn edit_task(input: std::path::PathBuf, delete: &str) -> EditTask {
    EditTask {
        input,
        delete: PageRange::parse(delete).unwrap(),
        output: None,
    }
}

#[tokio::test]
async fn test_delete_pages_default_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "report.pdf", 5);

    let config = config_for(Task::Edit(edit_task(input, "2,4")));
    let outcome = ops::run(&config, &OutputFormatter::quiet()).await.unwrap();

    assert!(outcome.written);
    assert_eq!(outcome.output, temp_dir.path().join("report-modified.pdf"));
    assert_eq!(outcome.total_pages, 3);
    assert_eq!(
        page_labels(&outcome.output),
        vec!["report.pdf-1", "report.pdf-3", "report.pdf-5"]
    );
}

#[tokio::test]
async fn test_delete_range_explicit_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "scan.pdf", 6);
    let output = temp_dir.path().join("trimmed.pdf");

    let mut task = edit_task(input, "2-5");
    task.output = Some(output.clone());

    let outcome = ops::run(&config_for(Task::Edit(task)), &OutputFormatter::quiet())
        .await
        .unwrap();

    assert_eq!(outcome.output, output);
    assert_eq!(page_labels(&output), vec!["scan.pdf-1", "scan.pdf-6"]);
}

#[tokio::test]
async fn test_input_is_left_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "keep.pdf", 3);

    let config = config_for(Task::Edit(edit_task(input.clone(), "1")));
    ops::run(&config, &OutputFormatter::quiet()).await.unwrap();

    assert_eq!(page_labels(&input).len(), 3);
}

#[tokio::test]
async fn test_delete_every_page() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "small.pdf", 2);

    let config = config_for(Task::Edit(edit_task(input, "1-2")));
    let result = ops::run(&config, &OutputFormatter::quiet()).await;

    assert!(matches!(result, Err(PdfDeskError::AllPagesDeleted { .. })));
    assert!(!temp_dir.path().join("small-modified.pdf").exists());
}

#[tokio::test]
async fn test_delete_past_last_page() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "short.pdf", 3);

    let config = config_for(Task::Edit(edit_task(input, "3-4")));
    let result = ops::run(&config, &OutputFormatter::quiet()).await;

    assert!(matches!(
        result,
        Err(PdfDeskError::InvalidPageRange { total_pages: 3, .. })
    ));
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "draft.pdf", 4);

    let mut config = config_for(Task::Edit(edit_task(input, "1")));
    config.dry_run = true;

    let outcome = ops::run(&config, &OutputFormatter::quiet()).await.unwrap();

    assert!(!outcome.written);
    assert_eq!(outcome.total_pages, 3);
    assert!(!outcome.output.exists());
}
