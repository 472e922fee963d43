//! Bottom transport bar: the visible face of the playback controller.
//!
//! Reads nothing but the state snapshot and maps widget interactions back
//! to transport calls.

use eframe::egui;

use crate::core::player::PlaybackController;
use crate::ui::format_time;

const RATE_PRESETS: &[f32] = &[0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

pub fn render(ui: &mut egui::Ui, player: &mut PlaybackController) {
    let state = player.state().clone();

    ui.horizontal(|ui| {
        // Title / load status
        match player.title() {
            Some(title) if state.is_loading => {
                ui.spinner();
                ui.label(format!("Loading {}…", title));
            }
            Some(title) => {
                ui.strong(title.to_string());
            }
            None => {
                ui.weak("Nothing playing");
            }
        }

        if let Some(err) = &state.error {
            ui.colored_label(egui::Color32::LIGHT_RED, err);
        }
    });

    ui.horizontal(|ui| {
        let can_play = player.has_media() && !state.is_loading;

        if ui.add_enabled(can_play, egui::Button::new("⏮")).clicked() {
            player.restart();
        }

        let play_label = if state.is_playing { "⏸" } else { "▶" };
        if ui.add_enabled(can_play, egui::Button::new(play_label)).clicked() {
            player.toggle_play();
        }

        // Playhead
        ui.label(format_time(state.current_time));
        let mut position = state.current_time;
        let slider = egui::Slider::new(&mut position, 0.0..=state.duration.max(0.001))
            .show_value(false);
        if ui.add_enabled(can_play, slider).changed() {
            player.seek(position);
        }
        ui.label(format_time(state.duration));

        ui.separator();

        // Volume + mute
        let mute_label = if state.muted { "🔇" } else { "🔊" };
        if ui.button(mute_label).clicked() {
            player.toggle_mute();
        }
        let mut volume = state.volume;
        if ui
            .add(egui::Slider::new(&mut volume, 0.0..=1.0).show_value(false))
            .changed()
        {
            player.set_volume(volume);
        }

        ui.separator();

        // Rate
        egui::ComboBox::from_id_salt("rate_selector")
            .selected_text(format!("{}×", state.rate))
            .width(64.0)
            .show_ui(ui, |ui| {
                for &rate in RATE_PRESETS {
                    if ui
                        .selectable_label(state.rate == rate, format!("{}×", rate))
                        .clicked()
                    {
                        player.set_rate(rate);
                    }
                }
            });
    });
}
