//! Reading passages tab: decodable texts with narration playback.

use eframe::egui;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::assets;
use crate::catalog::Level;
use crate::core::player::{LoadRequest, PlaybackController};
use crate::passages::{self, Passage};
use crate::settings::AppSettings;
use crate::ui::level_badge;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PassagesState {
    pub selected: Option<String>,
}

pub fn render(
    ui: &mut egui::Ui,
    state: &mut PassagesState,
    settings: &AppSettings,
    player: &mut PlaybackController,
) {
    egui::SidePanel::left("passage_list")
        .resizable(true)
        .default_width(220.0)
        .show_inside(ui, |ui| {
            render_list(ui, state);
        });

    egui::CentralPanel::default().show_inside(ui, |ui| {
        let Some(passage) = state.selected.as_deref().and_then(passages::find) else {
            ui.centered_and_justified(|ui| {
                ui.weak("Pick a passage to read");
            });
            return;
        };
        render_reader(ui, passage, settings, player);
    });
}

fn render_list(ui: &mut egui::Ui, state: &mut PassagesState) {
    egui::ScrollArea::vertical().show(ui, |ui| {
        for level in Level::ALL {
            let group: Vec<&Passage> = passages::passages()
                .iter()
                .filter(|p| p.level == *level)
                .collect();
            if group.is_empty() {
                continue;
            }

            ui.add_space(4.0);
            ui.strong(level.label());
            for passage in group {
                let selected = state.selected.as_deref() == Some(passage.id);
                if ui.selectable_label(selected, passage.title).clicked() {
                    debug!("Passage selected: {}", passage.id);
                    state.selected = Some(passage.id.to_string());
                }
            }
        }
    });
}

fn render_reader(
    ui: &mut egui::Ui,
    passage: &Passage,
    settings: &AppSettings,
    player: &mut PlaybackController,
) {
    ui.horizontal(|ui| {
        ui.heading(passage.title);
        level_badge(ui, Some(passage.level));
    });

    ui.add_space(4.0);
    match passage.narration {
        Some(narration) => {
            if ui.button("🔊 Read to me").clicked() {
                player.load(LoadRequest {
                    title: passage.title.to_string(),
                    url: assets::audio_url(&settings.asset_base, narration),
                    autoplay: true,
                });
            }
        }
        None => {
            ui.weak("No narration recorded for this passage");
        }
    }

    ui.add_space(8.0);
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.label(
            egui::RichText::new(passage.text)
                .size(settings.reader_font_size)
                .line_height(Some(settings.reader_font_size * 1.6)),
        );
    });
}
