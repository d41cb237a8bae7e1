//! Integration tests for joining PDFs in a given order.

use pdfdesk::config::{CompressionLevel, JoinTask, OverwriteMode, Task};
use pdfdesk::error::PdfDeskError;
use pdfdesk::ops;
use pdfdesk::output::OutputFormatter;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{config_for, page_labels, write_garbage, write_pdf};

fn join_config(inputs: Vec<PathBuf>, output: PathBuf) -> pdfdesk::Config {
    config_for(Task::Join(JoinTask {
        inputs,
        output: Some(output),
    }))
}

#[tokio::test]
async fn test_join_preserves_order() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 1);
    let b = write_pdf(temp_dir.path(), "b.pdf", 2);
    let output = temp_dir.path().join("out.pdf");

    let config = join_config(vec![b, a], output.clone());
    let outcome = ops::run(&config, &OutputFormatter::quiet()).await.unwrap();

    assert!(outcome.written);
    assert_eq!(outcome.total_pages, 3);
    assert_eq!(page_labels(&output), vec!["b.pdf-1", "b.pdf-2", "a.pdf-1"]);
}

#[tokio::test]
async fn test_join_many_files_in_parallel() {
    let temp_dir = TempDir::new().unwrap();
    let inputs: Vec<PathBuf> = (1..=6)
        .map(|n| write_pdf(temp_dir.path(), &format!("part{n}.pdf"), n))
        .collect();
    let output = temp_dir.path().join("all.pdf");

    let mut config = join_config(inputs, output.clone());
    config.compression = CompressionLevel::Maximum;

    let outcome = ops::run(&config, &OutputFormatter::quiet()).await.unwrap();

    assert_eq!(outcome.total_pages, 21);
    let labels = page_labels(&output);
    assert_eq!(labels.first().map(String::as_str), Some("part1.pdf-1"));
    assert_eq!(labels.last().map(String::as_str), Some("part6.pdf-6"));
}

#[tokio::test]
async fn test_join_same_file_twice() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 2);
    let output = temp_dir.path().join("twice.pdf");

    let config = join_config(vec![a.clone(), a], output.clone());
    let outcome = ops::run(&config, &OutputFormatter::quiet()).await.unwrap();

    assert_eq!(outcome.total_pages, 4);
    assert_eq!(page_labels(&output).len(), 4);
}

#[tokio::test]
async fn test_join_skips_unloadable_file() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 1);
    let bad = write_garbage(temp_dir.path(), "bad.pdf");
    let c = write_pdf(temp_dir.path(), "c.pdf", 1);
    let output = temp_dir.path().join("out.pdf");

    let config = join_config(vec![a, bad, c], output.clone());
    let outcome = ops::run(&config, &OutputFormatter::quiet()).await.unwrap();

    assert_eq!(page_labels(&output), vec!["a.pdf-1", "c.pdf-1"]);
    assert_eq!(outcome.total_pages, 2);
}

#[tokio::test]
async fn test_join_needs_two_loadable_files() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 1);
    let bad = write_garbage(temp_dir.path(), "bad.pdf");
    let output = temp_dir.path().join("out.pdf");

    let config = join_config(vec![a, bad], output.clone());
    let result = ops::run(&config, &OutputFormatter::quiet()).await;

    assert!(matches!(
        result,
        Err(PdfDeskError::InsufficientSelection { found: 1 })
    ));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_join_no_clobber() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 1);
    let b = write_pdf(temp_dir.path(), "b.pdf", 1);
    let output = write_pdf(temp_dir.path(), "existing.pdf", 1);

    let mut config = join_config(vec![a, b], output.clone());
    config.overwrite_mode = OverwriteMode::NoClobber;

    let result = ops::run(&config, &OutputFormatter::quiet()).await;

    assert!(matches!(result, Err(PdfDeskError::OutputExists { .. })));
    assert_eq!(page_labels(&output), vec!["existing.pdf-1"]);
}

#[tokio::test]
async fn test_join_dry_run() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 2);
    let b = write_pdf(temp_dir.path(), "b.pdf", 3);
    let output = temp_dir.path().join("out.pdf");

    let mut config = join_config(vec![a, b], output.clone());
    config.dry_run = true;

    let outcome = ops::run(&config, &OutputFormatter::quiet()).await.unwrap();

    assert!(!outcome.written);
    assert_eq!(outcome.total_pages, 5);
    assert!(!output.exists());
}
