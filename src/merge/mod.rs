//! Combining documents, deleting pages and naming the results.

pub mod merger;
pub mod naming;
pub mod pages;

pub use merger::{MergeResult, MergeStatistics, Merger};
pub use pages::PageEditor;
