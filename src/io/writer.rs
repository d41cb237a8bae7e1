//! PDF writing and saving operations.
//!
//! This module provides safe PDF writing with:
//! - Atomic writes (write to temp file, then rename)
//! - Compression levels mapped onto `lopdf` passes
//! - In-memory serialization for callers that hand bytes elsewhere
//! - Write statistics
//!
//! # Examples
//!
//! ```no_run
//! use pdfdesk::io::writer::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! writer.save(&doc, Path::new("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::config::CompressionLevel;
use crate::error::{PdfDeskError, Result};
use crate::utils::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Compress streams before writing.
    pub compress: bool,

    /// Renumber objects into a compact sequence.
    pub optimize: bool,

    /// Drop objects no longer reachable from the trailer.
    pub prune: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl WriteOptions {
    /// Options matching a compression level.
    pub fn for_compression(level: CompressionLevel) -> Self {
        let (compress, optimize, prune) = match level {
            CompressionLevel::None => (false, false, false),
            CompressionLevel::Standard => (true, true, false),
            CompressionLevel::Maximum => (true, true, true),
        };

        Self {
            compress,
            optimize,
            prune,
            ..Default::default()
        }
    }

    fn prepare(&self, doc: &mut Document) {
        if self.prune {
            doc.prune_objects();
        }

        if self.optimize {
            doc.renumber_objects();
        }

        if self.compress {
            doc.compress();
        }
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compress: true,
            optimize: true,
            prune: false,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Whether compression was applied.
    pub compressed: bool,

    /// Whether optimization was applied.
    pub optimized: bool,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer for the given compression level.
    pub fn with_compression(level: CompressionLevel) -> Self {
        Self::with_options(WriteOptions::for_compression(level))
    }

    /// Create a writer without atomic writes.
    pub fn non_atomic() -> Self {
        Self {
            options: WriteOptions {
                atomic: false,
                ..Default::default()
            },
        }
    }

    /// Save a PDF document to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Output directory doesn't exist
    /// - Insufficient permissions
    /// - Write operation fails
    pub async fn save(&self, doc: &Document, path: &Path) -> Result<()> {
        self.save_with_stats(doc, path).await?;
        Ok(())
    }

    /// Save a PDF and return statistics about the operation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfdesk::io::writer::PdfWriter;
    /// # use lopdf::Document;
    /// # use std::path::Path;
    /// # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
    /// let writer = PdfWriter::new();
    /// let stats = writer.save_with_stats(&doc, Path::new("output.pdf")).await?;
    /// println!("Wrote {} in {:?}", stats.format_file_size(), stats.write_time);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn save_with_stats(&self, doc: &Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();
        let mut doc = doc.clone();

        task::spawn_blocking(move || {
            let start = Instant::now();

            options.prepare(&mut doc);

            let write_path = if options.atomic {
                temp_path_for(&path_buf)
            } else {
                path_buf.clone()
            };

            let file = std::fs::File::create(&write_path).map_err(|e| {
                PdfDeskError::FailedToCreateOutput {
                    path: write_path.clone(),
                    source: e,
                }
            })?;

            let mut writer = std::io::BufWriter::with_capacity(options.buffer_size, file);

            doc.save_to(&mut writer)
                .map_err(|e| PdfDeskError::FailedToWrite {
                    path: write_path.clone(),
                    source: std::io::Error::other(e),
                })?;

            writer.flush().map_err(|e| PdfDeskError::FailedToWrite {
                path: write_path.clone(),
                source: e,
            })?;
            drop(writer);

            if options.atomic {
                std::fs::rename(&write_path, &path_buf).map_err(|e| {
                    // Leave nothing half-written behind.
                    let _ = std::fs::remove_file(&write_path);
                    PdfDeskError::FailedToWrite {
                        path: path_buf.clone(),
                        source: e,
                    }
                })?;
            }

            let write_time = start.elapsed();
            let file_size = std::fs::metadata(&path_buf).map(|m| m.len()).unwrap_or(0);

            Ok::<_, PdfDeskError>(WriteStatistics {
                write_time,
                file_size,
                output_path: path_buf,
                compressed: options.compress,
                optimized: options.optimize,
            })
        })
        .await
        .map_err(|e| PdfDeskError::other(format!("Write task failed: {e}")))?
    }

    /// Serialize a PDF document to bytes without touching the filesystem.
    pub async fn to_bytes(&self, doc: &Document) -> Result<Vec<u8>> {
        let options = self.options.clone();
        let mut doc = doc.clone();

        task::spawn_blocking(move || {
            options.prepare(&mut doc);

            let mut buffer = Vec::new();
            doc.save_to(&mut buffer)
                .map_err(|e| PdfDeskError::merge_failed(format!("Serialization failed: {e}")))?;

            Ok::<_, PdfDeskError>(buffer)
        })
        .await
        .map_err(|e| PdfDeskError::other(format!("Write task failed: {e}")))?
    }

    /// Check if a file can be written to the given path.
    ///
    /// Performs pre-flight checks without actually writing.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory doesn't exist
    /// - Parent directory is not writable
    pub async fn can_write(&self, path: &Path) -> Result<()> {
        let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };

        let metadata =
            tokio::fs::metadata(parent)
                .await
                .map_err(|_| {
                    PdfDeskError::invalid_config(format!(
                        "Output directory does not exist: {}",
                        parent.display()
                    ))
                })?;

        if !metadata.is_dir() {
            return Err(PdfDeskError::invalid_config(format!(
                "Output directory is not a directory: {}",
                parent.display()
            )));
        }

        if metadata.permissions().readonly() {
            return Err(PdfDeskError::invalid_config(format!(
                "Output directory is not writable: {}",
                parent.display()
            )));
        }

        Ok(())
    }

    /// Check if output file exists.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}

/// `out.pdf` becomes `out.pdf.tmp` next to it.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}
