//! pdfdesk - Edit, join and batch-select PDF files.
//!
//! The library backs three tools:
//!
//! - An editor that deletes pages from one PDF
//! - A joiner that concatenates PDFs in a user-chosen order
//! - A selector that picks PDFs from a folder by name and joins them in
//!   the order of a name list
//!
//! The selector is built on a pure name-matching engine in [`reconcile`],
//! which has no file system or PDF dependencies.
//!
//! # Examples
//!
//! ## Matching names
//!
//! ```
//! use pdfdesk::reconcile::{CandidateFile, reconcile};
//!
//! let candidates = vec![
//!     CandidateFile::new("Doc1.pdf", 1),
//!     CandidateFile::new("doc2.pdf", 2),
//! ];
//! let report = reconcile(&["doc2", "doc1", "doc3"], &candidates);
//!
//! assert_eq!(report.found(), 2);
//! assert_eq!(report.unmatched, vec!["doc3".to_string()]);
//! ```
//!
//! ## Joining files
//!
//! ```no_run
//! use pdfdesk::io::{PdfReader, PdfWriter};
//! use pdfdesk::merge::Merger;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let inputs = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let (results, _stats) = reader.load_all(&inputs, 2).await;
//! let loaded = results.into_iter().collect::<Result<Vec<_>, _>>()?;
//!
//! let result = Merger::new().merge(&loaded)?;
//! PdfWriter::new()
//!     .save(&result.document, &PathBuf::from("a_b.pdf"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod ops;
pub mod output;
pub mod reconcile;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{PdfDeskError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
