//! Reading, writing and listing PDF files.

pub mod folder;
pub mod reader;
pub mod writer;

pub use folder::FolderScanner;
pub use reader::{LoadResult, LoadStatistics, LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};
