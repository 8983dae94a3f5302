//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, PreviewMode, Recording, ToastLevel};
pub use update::{Message, update};

use crate::config::{PreferenceStore, Preferences};
use crate::editor::normalize_text;

/// Document shown when no file is given.
pub const STARTER_MARKDOWN: &str = r#"# Split Markdown Editor

Write markdown on the left and preview on the right.

## GFM support
- [x] Task lists
- [x] Tables
- [x] Autolinks like https://commonmark.org

| Feature | Status |
| --- | --- |
| Preview | Live |
| Styling | Terminal themes |

```rust
fn hello() -> &'static str {
    "Hello markdown"
}
```

> This is rendered through a markdown library, not a manual parser.
"#;

/// Main application struct that owns the preference store and runs the
/// event loop.
pub struct App {
    initial_text: String,
    file_label: Option<String>,
    preferences: Preferences,
    store: PreferenceStore,
    terminal_hint: Option<String>,
}

impl App {
    /// Create an application editing `initial_text`.
    ///
    /// Line endings and tabs are normalised before the text reaches the
    /// buffer.
    pub fn new(initial_text: impl AsRef<str>) -> Self {
        Self {
            initial_text: normalize_text(initial_text.as_ref()),
            file_label: None,
            preferences: Preferences::default(),
            store: PreferenceStore::in_memory(),
            terminal_hint: std::env::var("COLORFGBG").ok(),
        }
    }

    /// Name shown in the status row (usually the file the text came from).
    #[must_use]
    pub fn with_file_label(mut self, label: Option<String>) -> Self {
        self.file_label = label;
        self
    }

    /// Theme and colour mode for the session.
    #[must_use]
    pub const fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Store that receives theme and mode changes.
    #[must_use]
    pub fn with_store(mut self, store: PreferenceStore) -> Self {
        self.store = store;
        self
    }

    /// Build the starting model for a terminal of `size`.
    pub fn initial_model(&self, size: (u16, u16)) -> Model {
        let mut model = Model::new(&self.initial_text, size)
            .with_terminal_hint(self.terminal_hint.clone())
            .with_preferences(self.preferences);
        model.file_label.clone_from(&self.file_label);
        model.preferences_path = self.store.path().map(std::path::Path::to_path_buf);
        model
    }
}

#[cfg(test)]
mod tests;
