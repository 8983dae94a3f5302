//! Text editing for the input pane.
//!
//! Provides a rope-backed text buffer with a selection, the undo/redo
//! snapshot log, and the markdown formatting shortcuts used by the toolbar.

mod buffer;
mod format;
mod history;

pub use buffer::{Cursor, Direction, EditorBuffer, Selection, TAB_WIDTH, normalize_text};
pub use format::{Edit, FormatAction, FormatShape, prefix_current_line, wrap_selection};
pub use history::{DEFAULT_HISTORY_LIMIT, EditHistory};
