//! Video library tab: free-text search plus category/level selectors over
//! the static catalog.

use eframe::egui;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::assets;
use crate::catalog::{self, CategoryFilter, Level, LevelFilter, VideoItem, VideoKind};
use crate::settings::AppSettings;
use crate::ui::level_badge;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LibraryState {
    pub query: String,
    pub category: CategoryFilter,
    pub level: LevelFilter,
}

pub fn render(ui: &mut egui::Ui, state: &mut LibraryState, settings: &AppSettings) {
    render_controls(ui, state);
    ui.separator();

    let filtered = catalog::filter_catalog(
        catalog::catalog(),
        &state.query,
        &state.category,
        state.level,
    );

    if filtered.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.weak("No videos match the current filters");
        });
        return;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for category in &filtered {
            ui.add_space(6.0);
            ui.heading(category.title);
            ui.weak(category.description);
            for video in &category.videos {
                render_video_row(ui, video, settings);
            }
        }
    });
}

fn render_controls(ui: &mut egui::Ui, state: &mut LibraryState) {
    ui.horizontal(|ui| {
        ui.label("Search:");
        ui.add(
            egui::TextEdit::singleline(&mut state.query)
                .hint_text("title or description")
                .desired_width(180.0),
        );

        ui.label("Category:");
        let selected_category = match &state.category {
            CategoryFilter::All => "All".to_string(),
            CategoryFilter::Id(id) => catalog::catalog()
                .iter()
                .find(|c| c.id == id.as_str())
                .map(|c| c.title.to_string())
                .unwrap_or_else(|| id.clone()),
        };
        egui::ComboBox::from_id_salt("category_selector")
            .selected_text(selected_category)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut state.category, CategoryFilter::All, "All");
                for cat in catalog::catalog() {
                    ui.selectable_value(
                        &mut state.category,
                        CategoryFilter::Id(cat.id.to_string()),
                        cat.title,
                    );
                }
            });

        ui.label("Level:");
        egui::ComboBox::from_id_salt("level_selector")
            .selected_text(match state.level {
                LevelFilter::All => "All",
                LevelFilter::Level(l) => l.label(),
            })
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut state.level, LevelFilter::All, "All");
                for level in Level::ALL {
                    ui.selectable_value(
                        &mut state.level,
                        LevelFilter::Level(*level),
                        level.label(),
                    );
                }
            });

        if ui.button("Reset").clicked() {
            *state = LibraryState::default();
        }
    });
}

fn render_video_row(ui: &mut egui::Ui, video: &VideoItem, settings: &AppSettings) {
    ui.horizontal(|ui| {
        if ui.button("▶").on_hover_text("Watch").clicked() {
            open_video(video, settings);
        }
        ui.strong(video.title);
        ui.weak(video.duration);
        level_badge(ui, video.level);
    });
    ui.horizontal(|ui| {
        ui.add_space(28.0);
        ui.label(video.description);
    });
}

/// Remote entries open their platform URL; local entries resolve against
/// the video prefix first. Both hand off to the system handler - the
/// in-app transport is reserved for audio.
fn open_video(video: &VideoItem, settings: &AppSettings) {
    let url = match video.kind {
        VideoKind::Remote => video.url.to_string(),
        VideoKind::Local => assets::video_url(&settings.asset_base, video.url),
    };

    info!("Opening video {} ({})", video.id, url);
    if let Err(e) = open::that(&url) {
        warn!("Cannot open {}: {}", url, e);
    }
}
