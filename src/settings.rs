//! Persisted application settings (eframe session store).

use serde::{Deserialize, Serialize};

use crate::assets;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    // Assets
    pub asset_base: String,

    // Playback
    pub volume: f32,
    pub rate: f32,

    // UI
    pub show_help: bool,
    pub dark_mode: bool,
    pub font_size: f32,
    /// Text size used for passage text (young readers need it big)
    pub reader_font_size: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            asset_base: assets::DEFAULT_BASE.to_string(),
            volume: 1.0,
            rate: 1.0,
            show_help: false,
            dark_mode: true,
            font_size: 14.0,
            reader_font_size: 22.0,
        }
    }
}

/// Modal-ish settings window, toggled from the toolbar.
pub fn render_settings_window(
    ctx: &eframe::egui::Context,
    open: &mut bool,
    settings: &mut AppSettings,
) {
    use eframe::egui;

    egui::Window::new("Settings")
        .open(open)
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            egui::Grid::new("settings_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Asset server");
                    ui.add(
                        egui::TextEdit::singleline(&mut settings.asset_base)
                            .hint_text(assets::DEFAULT_BASE),
                    );
                    ui.end_row();

                    ui.label("Dark mode");
                    ui.checkbox(&mut settings.dark_mode, "");
                    ui.end_row();

                    ui.label("UI font size");
                    ui.add(egui::Slider::new(&mut settings.font_size, 10.0..=22.0));
                    ui.end_row();

                    ui.label("Reader font size");
                    ui.add(egui::Slider::new(&mut settings.reader_font_size, 14.0..=40.0));
                    ui.end_row();
                });

            ui.add_space(6.0);
            if ui.button("Reset to defaults").clicked() {
                *settings = AppSettings::default();
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip_through_json() {
        let settings = AppSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let back: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.asset_base, settings.asset_base);
        assert_eq!(back.volume, settings.volume);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        // Older persisted sessions may miss newer fields
        let back: AppSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(back.asset_base, assets::DEFAULT_BASE);
    }
}
