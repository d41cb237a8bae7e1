//! pdfdesk - Edit, join and batch-select PDF files.

mod cli;

use clap::Parser;
use std::process;

use crate::cli::Cli;
use pdfdesk::error::PdfDeskError;
use pdfdesk::output::OutputFormatter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfDeskError> {
    let config = cli.to_config().await?;
    let formatter = OutputFormatter::from_config(&config);

    if !formatter.is_quiet() {
        formatter.section(&format!("{} v{}", pdfdesk::NAME, pdfdesk::VERSION));
    }

    if config.dry_run {
        formatter.info("DRY RUN MODE - No files will be created");
    }

    let outcome = pdfdesk::ops::run(&config, &formatter).await?;

    if outcome.written {
        formatter.debug(&format!(
            "{} pages written to {}",
            outcome.total_pages,
            outcome.output.display()
        ));
    }

    Ok(())
}
