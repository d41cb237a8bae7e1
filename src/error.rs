//! Error types for pdfdesk.
//!
//! Every fallible operation in the crate returns [`PdfDeskError`]. Errors are
//! user-facing: each message says what went wrong and, where it helps, what
//! to do about it.
//!
//! # Error Categories
//!
//! - **I/O Errors**: missing files, unreadable folders, write failures
//! - **PDF Errors**: files the PDF loader rejects
//! - **Selection Errors**: empty name lists, too few matched files
//! - **Editing Errors**: no pages marked, every page marked
//!
//! Name reconciliation problems (duplicate, ambiguous and unmatched names)
//! are not errors: they are collected in a
//! [`ReconciliationReport`](crate::reconcile::ReconciliationReport) so the
//! user can fix the whole list in one pass.

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfdesk operations.
pub type Result<T> = std::result::Result<T, PdfDeskError>;

/// Main error type for pdfdesk operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfDeskError {
    /// Input file was not found.
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input file is not accessible (permission denied, etc.).
    #[error("Cannot access file: {}\n  Reason: {source}", .path.display())]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Path exists but is a directory.
    #[error("Not a file: {}", .path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// File does not carry a `.pdf` extension.
    #[error("Not a PDF file: {}\n  Only files ending in .pdf are accepted", .path.display())]
    NotAPdf {
        /// Path to the rejected file.
        path: PathBuf,
    },

    /// Failed to load PDF file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", .path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// PDF file is corrupted or has invalid structure.
    #[error("Corrupted or invalid PDF: {}\n  Details: {details}", .path.display())]
    CorruptedPdf {
        /// Path to the corrupted PDF.
        path: PathBuf,
        /// Details about the corruption.
        details: String,
    },

    /// PDF file is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        .path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// No files were provided for merging.
    #[error("No input files specified for merging")]
    NoFilesToMerge,

    /// The selector was asked to search before any names were given.
    #[error("No PDF names provided\n  Paste or list the file names first, one per line")]
    NoTargetsProvided,

    /// Fewer than two files are selected when a merge is requested.
    #[error("At least 2 PDFs are needed to join, found {found}")]
    InsufficientSelection {
        /// Number of files currently selected.
        found: usize,
    },

    /// Strict selection refused to merge because the report lists problems.
    #[error(
        "The name list has {count} problem(s)\n  \
         Fix the listed names or run without --strict to join the matched files"
    )]
    SelectionHasIssues {
        /// Number of issues in the report.
        count: usize,
    },

    /// Save was requested in the editor with no page marked for deletion.
    #[error("No page has been marked for deletion")]
    NoPagesMarked,

    /// Every page of the document is marked for deletion.
    #[error("Cannot delete every page of: {}\n  Leave at least one page unmarked", .path.display())]
    AllPagesDeleted {
        /// Path to the edited PDF.
        path: PathBuf,
    },

    /// Page number or range does not fit the document.
    #[error(
        "Invalid page range '{range}' for PDF: {}\n  \
         PDF has {total_pages} page(s). Page numbers must be between 1 and {total_pages}",
        .path.display()
    )]
    InvalidPageRange {
        /// Path to the PDF file.
        path: PathBuf,
        /// Requested page range.
        range: String,
        /// Total pages in the PDF.
        total_pages: usize,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  \
         Use --force to overwrite or choose a different output path",
        .path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", .path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to read the list of names for the selector.
    #[error("Failed to read PDF names from: {}\n  Reason: {source}", .path.display())]
    FailedToReadNames {
        /// Path to the names file (`-` for stdin).
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to read input list file.
    #[error("Failed to read input list file: {}\n  Reason: {source}", .path.display())]
    FailedToReadInputList {
        /// Path to the input list file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Input list file contains invalid paths.
    #[error(
        "Invalid entry in input list file: {} at line {line_number}\n  Details: {details}",
        .path.display()
    )]
    InvalidInputList {
        /// Path to the input list file.
        path: PathBuf,
        /// Line number with the error.
        line_number: usize,
        /// Details about what's invalid.
        details: String,
    },

    /// The chosen folder cannot be listed.
    #[error("Cannot read folder: {}\n  Reason: {reason}", .path.display())]
    FolderNotReadable {
        /// Path to the folder.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// Merge operation failed.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for PdfDeskError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<anyhow::Error> for PdfDeskError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl PdfDeskError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path,
            details: details.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an InsufficientSelection error.
    pub fn insufficient_selection(found: usize) -> Self {
        Self::InsufficientSelection { found }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable (the user can fix the input and retry
    /// in the same session).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotAPdf { .. }
                | Self::FailedToLoadPdf { .. }
                | Self::CorruptedPdf { .. }
                | Self::EncryptedPdf { .. }
                | Self::NoTargetsProvided
                | Self::InsufficientSelection { .. }
                | Self::SelectionHasIssues { .. }
                | Self::NoPagesMarked
                | Self::AllPagesDeleted { .. }
                | Self::InvalidPageRange { .. }
        )
    }

    /// Check if this error should stop all processing immediately.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::NoFilesToMerge
                | Self::FailedToCreateOutput { .. }
                | Self::FailedToWrite { .. }
                | Self::Cancelled
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::FileNotAccessible { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FolderNotReadable { .. } => 2,
            Self::FailedToReadNames { .. } => 2,
            Self::FailedToReadInputList { .. } => 2,
            Self::NotAPdf { .. } => 3,
            Self::FailedToLoadPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::NoFilesToMerge => 1,
            Self::NoTargetsProvided => 1,
            Self::InsufficientSelection { .. } => 1,
            Self::SelectionHasIssues { .. } => 1,
            Self::NoPagesMarked => 1,
            Self::AllPagesDeleted { .. } => 1,
            Self::InvalidInputList { .. } => 1,
            Self::InvalidPageRange { .. } => 1,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::MergeFailed { .. } => 6,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // SIGINT convention
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
