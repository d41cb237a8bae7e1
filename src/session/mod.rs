//! Per-tool session state and the commands that change it.
//!
//! Each tool keeps its state in one explicit value. Commands validate their
//! own preconditions, so a caller never has to trust that a button was
//! disabled at the right time.

pub mod editor;
pub mod joiner;
pub mod selector;

pub use editor::{EditPlan, EditorSession};
pub use joiner::{JoinEntry, JoinPlan, JoinerSession};
pub use selector::SelectorSession;
