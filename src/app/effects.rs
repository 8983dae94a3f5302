use tracing::warn;

use crate::app::{App, Message, Model, ToastLevel};
use crate::config::{COLOR_MODE_KEY, EDITOR_THEME_KEY};

impl App {
    pub(super) fn handle_message_side_effects(&mut self, model: &mut Model, msg: &Message) {
        match msg {
            Message::CycleEditorTheme | Message::SetEditorTheme(_) => {
                let value = model.editor_theme.id();
                self.persist(model, EDITOR_THEME_KEY, value);
            }
            Message::CycleColorMode | Message::SetColorMode(_) => {
                let value = model.color_mode.id();
                self.persist(model, COLOR_MODE_KEY, value);
            }
            _ => {}
        }
    }

    /// Write one preference, reporting a failure as a toast.
    fn persist(&mut self, model: &mut Model, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            warn!(key, value, error = %err, "failed to save preference");
            model.show_toast(ToastLevel::Error, format!("Could not save preference: {err}"));
        }
    }
}
