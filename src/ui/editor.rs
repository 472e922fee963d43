//! Practice editor tab: free-text writing space with live counts.

use eframe::egui;
use log::{info, warn};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EditorState {
    pub text: String,
}

impl EditorState {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

pub fn render(ui: &mut egui::Ui, state: &mut EditorState) {
    ui.horizontal(|ui| {
        ui.label(format!(
            "{} words · {} characters",
            state.word_count(),
            state.char_count()
        ));

        ui.separator();
        if ui.button("Clear").clicked() {
            state.text.clear();
        }
        if ui
            .add_enabled(!state.text.is_empty(), egui::Button::new("Export…"))
            .clicked()
        {
            export_text(&state.text);
        }
    });

    ui.separator();

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.add_sized(
            ui.available_size(),
            egui::TextEdit::multiline(&mut state.text)
                .hint_text("Write the words you practiced today…")
                .font(egui::TextStyle::Monospace),
        );
    });
}

fn export_text(text: &str) {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("Text", &["txt"])
        .set_file_name("practice.txt")
        .save_file()
    else {
        return;
    };

    match std::fs::write(&path, text) {
        Ok(()) => info!("Practice text exported to {}", path.display()),
        Err(e) => warn!("Cannot export to {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_on_empty_text() {
        let state = EditorState::default();
        assert_eq!(state.word_count(), 0);
        assert_eq!(state.char_count(), 0);
    }

    #[test]
    fn test_counts_split_on_any_whitespace() {
        let state = EditorState {
            text: "pat  the\ncat\t sat".into(),
        };
        assert_eq!(state.word_count(), 4);
    }

    #[test]
    fn test_char_count_is_scalar_values_not_bytes() {
        let state = EditorState { text: "héllo".into() };
        assert_eq!(state.char_count(), 5);
    }
}
