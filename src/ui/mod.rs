//! View modules, one per dock tab, plus the shared transport bar.

use eframe::egui;

use crate::catalog::Level;

pub mod checker;
pub mod editor;
pub mod library;
pub mod passages;
pub mod transport;

/// `m:ss` display of a position in seconds.
pub fn format_time(seconds: f32) -> String {
    let total = seconds.max(0.0).round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Badge color per difficulty level.
pub fn level_color(level: Level) -> egui::Color32 {
    match level {
        Level::Beginner => egui::Color32::from_rgb(0x4c, 0xaf, 0x50),
        Level::Intermediate => egui::Color32::from_rgb(0xff, 0x98, 0x00),
        Level::Advanced => egui::Color32::from_rgb(0xe5, 0x73, 0x73),
    }
}

/// Small colored level badge, or a muted dash when the item has none.
pub fn level_badge(ui: &mut egui::Ui, level: Option<Level>) {
    match level {
        Some(level) => {
            ui.colored_label(level_color(level), level.label());
        }
        None => {
            ui.weak("—");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(9.4), "0:09");
        assert_eq!(format_time(61.0), "1:01");
        assert_eq!(format_time(754.0), "12:34");
        // Negative input (should not happen) clamps to zero
        assert_eq!(format_time(-5.0), "0:00");
    }
}
