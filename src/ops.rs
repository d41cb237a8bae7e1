//! The three tools as runnable commands.
//!
//! Each command drives the matching session from a validated [`Config`],
//! reports through an [`OutputFormatter`], and writes its result unless the
//! run is a dry run.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{Config, EditTask, JoinTask, NamesSource, OverwriteMode, SelectTask, Task};
use crate::error::{PdfDeskError, Result};
use crate::io::{FolderScanner, LoadedPdf, PdfReader, PdfWriter};
use crate::merge::{Merger, PageEditor};
use crate::output::{
    OutputFormatter, display_join_list, display_load_statistics, display_merge_statistics,
    display_report, display_write_statistics, report_to_json,
};
use crate::session::{EditorSession, JoinEntry, JoinerSession, SelectorSession};
use crate::utils::file_name_of;

/// What a command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Output path; written unless this was a dry run.
    pub output: PathBuf,
    /// Pages in the output document.
    pub total_pages: usize,
    /// Whether the output file was written.
    pub written: bool,
}

/// Run the tool selected by `config`.
pub async fn run(config: &Config, formatter: &OutputFormatter) -> Result<Outcome> {
    match &config.task {
        Task::Edit(task) => edit(config, task, formatter).await,
        Task::Join(task) => join(config, task, formatter).await,
        Task::Select(task) => select(config, task, formatter).await,
    }
}

/// Delete the requested pages from one PDF.
///
/// The output defaults to `<stem>-modified.pdf` next to the input.
pub async fn edit(config: &Config, task: &EditTask, formatter: &OutputFormatter) -> Result<Outcome> {
    formatter.info(&format!("Loading {}...", task.input.display()));
    let loaded = PdfReader::new().load(&task.input).await?;

    let mut editor = EditorSession::new();
    editor.open(&loaded.path, loaded.page_count);
    editor.mark_range(&task.delete)?;
    formatter.info(&editor.status_line());

    let plan = editor.save_plan()?;
    formatter.debug(&format!("Keeping pages: {}", join_numbers(&plan.keep)));

    let output = task
        .output
        .clone()
        .unwrap_or_else(|| task.input.with_file_name(&plan.output_name));
    ensure_not_input(&output, std::slice::from_ref(&task.input))?;

    let outcome = Outcome {
        output,
        total_pages: plan.keep.len(),
        written: false,
    };

    if config.dry_run {
        return Ok(report_dry_run(formatter, outcome));
    }

    check_output(&outcome.output, config.overwrite_mode, formatter).await?;

    let document = PageEditor::new().keep_pages(&loaded, &plan.keep)?;
    write(config, formatter, &document, outcome).await
}

/// Join PDFs in the given order.
///
/// Files the PDF loader rejects are skipped with a warning. The output
/// defaults to a name derived from the inputs, in the current directory.
pub async fn join(config: &Config, task: &JoinTask, formatter: &OutputFormatter) -> Result<Outcome> {
    let loaded = load_all(config, formatter, &task.inputs).await?;

    let mut session = JoinerSession::new();
    for result in loaded {
        match result {
            Ok(loaded) => {
                if let Err(err) = session.add(JoinEntry::from_loaded(loaded)) {
                    formatter.warning(&format!("Skipping file: {err}"));
                }
            }
            Err(err) if err.is_recoverable() => {
                formatter.warning(&format!("Skipping file: {err}"));
            }
            Err(err) => return Err(err),
        }
    }

    formatter.section("Join list:");
    display_join_list(formatter, session.entries());
    formatter.info(&session.status_line());

    let plan = session.join_plan()?;

    let output = task
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&plan.output_name));
    ensure_not_input(&output, &task.inputs)?;

    let outcome = Outcome {
        output,
        total_pages: plan.total_pages,
        written: false,
    };

    if config.dry_run {
        return Ok(report_dry_run(formatter, outcome));
    }

    check_output(&outcome.output, config.overwrite_mode, formatter).await?;

    let sources: Vec<LoadedPdf> = session.into_sources();
    merge_and_write(config, formatter, &sources, outcome).await
}

/// Select PDFs from a folder by name and join them in list order.
///
/// The output defaults to `<first>_<second>_joined.pdf` in the current
/// directory.
pub async fn select(
    config: &Config,
    task: &SelectTask,
    formatter: &OutputFormatter,
) -> Result<Outcome> {
    let names = read_names(&task.names).await?;

    formatter.info(&format!("Scanning {}...", task.folder.display()));
    let candidates = FolderScanner::new()?
        .recursive(task.recursive)
        .scan(&task.folder)?;
    formatter.debug(&format!("{} PDF(s) in folder", candidates.len()));

    let mut session = SelectorSession::new();
    session.on_names_changed(&names);
    session.on_folder_chosen(candidates);

    let report = session.on_search_requested()?;

    if task.json {
        println!("{}", report_to_json(report)?);
    } else {
        display_report(formatter, report);
    }

    if task.strict && report.has_issues() {
        return Err(PdfDeskError::SelectionHasIssues {
            count: report.issue_count(),
        });
    }

    let paths = session.on_merge_requested()?;

    let output = match &task.output {
        Some(output) => output.clone(),
        None => PathBuf::from(session.output_name().unwrap_or_default()),
    };
    ensure_not_input(&output, &paths)?;

    // Every selected file must load; a partial join would not match the list.
    let sources = load_all(config, formatter, &paths)
        .await?
        .into_iter()
        .collect::<Result<Vec<_>>>()?;

    let outcome = Outcome {
        output,
        total_pages: sources.iter().map(|source| source.page_count).sum(),
        written: false,
    };

    if config.dry_run {
        return Ok(report_dry_run(formatter, outcome));
    }

    check_output(&outcome.output, config.overwrite_mode, formatter).await?;

    merge_and_write(config, formatter, &sources, outcome).await
}

/// Read the target names text.
pub async fn read_names(source: &NamesSource) -> Result<String> {
    match source {
        NamesSource::Inline(text) => Ok(text.clone()),
        NamesSource::File(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| PdfDeskError::FailedToReadNames {
                    path: path.clone(),
                    source: e,
                })
        }
        NamesSource::Stdin => {
            use tokio::io::AsyncReadExt;

            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .map_err(|e| PdfDeskError::FailedToReadNames {
                    path: PathBuf::from("-"),
                    source: e,
                })?;
            Ok(text)
        }
    }
}

/// Check whether `output` may be written, asking the user when needed.
///
/// # Errors
///
/// - [`PdfDeskError::OutputExists`] in no-clobber mode, or in prompt mode
///   when output is quiet
/// - [`PdfDeskError::Cancelled`] if the user declines
/// - [`PdfDeskError::InvalidConfig`] if the output directory is unusable
pub async fn check_output(
    output: &Path,
    mode: OverwriteMode,
    formatter: &OutputFormatter,
) -> Result<()> {
    let writer = PdfWriter::new();
    writer.can_write(output).await?;

    if !writer.exists(output).await {
        return Ok(());
    }

    match mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(PdfDeskError::output_exists(output.to_path_buf())),
        OverwriteMode::Prompt => {
            if formatter.is_quiet() {
                return Err(PdfDeskError::output_exists(output.to_path_buf()));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                output.display()
            ));

            print!("Overwrite? [y/N]: ");
            std::io::stdout().flush().ok();

            let mut response = String::new();
            std::io::stdin()
                .read_line(&mut response)
                .map_err(|err| PdfDeskError::other(format!("Failed to read input: {err}")))?;

            match response.trim().to_lowercase().as_str() {
                "y" | "yes" => Ok(()),
                _ => Err(PdfDeskError::Cancelled),
            }
        }
    }
}

async fn load_all(
    config: &Config,
    formatter: &OutputFormatter,
    paths: &[PathBuf],
) -> Result<Vec<crate::io::LoadResult>> {
    if paths.is_empty() {
        return Err(PdfDeskError::NoFilesToMerge);
    }

    formatter.info(&format!("Loading {} file(s)...", paths.len()));

    let reader = PdfReader::new();
    let total = paths.len();
    let start = std::time::Instant::now();

    let results = reader
        .load_with_progress(paths, config.effective_jobs(), |idx, result| {
            let name = match result {
                Ok(loaded) => loaded.name(),
                Err(_) => file_name_of(&paths[idx]),
            };
            formatter.progress(idx + 1, total, Some(&name));
        })
        .await;

    let stats = crate::io::LoadStatistics::from_results(&results, start.elapsed());
    display_load_statistics(formatter, &stats);

    Ok(results)
}

async fn merge_and_write(
    config: &Config,
    formatter: &OutputFormatter,
    sources: &[LoadedPdf],
    mut outcome: Outcome,
) -> Result<Outcome> {
    formatter.info("Joining documents...");

    let result = Merger::new().merge(sources)?;
    display_merge_statistics(formatter, &result.statistics);

    outcome.total_pages = result.statistics.total_pages;
    write(config, formatter, &result.document, outcome).await
}

async fn write(
    config: &Config,
    formatter: &OutputFormatter,
    document: &lopdf::Document,
    mut outcome: Outcome,
) -> Result<Outcome> {
    formatter.info(&format!("Writing to: {}", outcome.output.display()));

    let stats = PdfWriter::with_compression(config.compression)
        .save_with_stats(document, &outcome.output)
        .await?;
    display_write_statistics(formatter, &stats);

    formatter.success(&format!(
        "Created {} ({} pages, {})",
        outcome.output.display(),
        outcome.total_pages,
        stats.format_file_size()
    ));

    outcome.written = true;
    Ok(outcome)
}

fn report_dry_run(formatter: &OutputFormatter, outcome: Outcome) -> Outcome {
    formatter.success("Dry run completed successfully");
    formatter.info(&format!("  Output would be: {}", outcome.output.display()));
    formatter.info("  Run without --dry-run to create it");
    outcome
}

fn ensure_not_input(output: &Path, inputs: &[PathBuf]) -> Result<()> {
    if inputs.iter().any(|input| input == output) {
        return Err(PdfDeskError::invalid_config(format!(
            "Output file cannot be the same as an input file: {}",
            output.display()
        )));
    }

    Ok(())
}

fn join_numbers(pages: &[u32]) -> String {
    pages
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
