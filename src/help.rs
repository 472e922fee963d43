//! Hotkey help overlay.

use eframe::egui;

/// Single help entry (key binding + description)
#[derive(Clone, Debug)]
pub struct HelpEntry {
    pub key: &'static str,
    pub desc: &'static str,
}

impl HelpEntry {
    pub const fn new(key: &'static str, desc: &'static str) -> Self {
        Self { key, desc }
    }
}

/// Hotkeys active everywhere
pub const GLOBAL_HELP: &[HelpEntry] = &[
    HelpEntry::new("F1", "Toggle this help"),
    HelpEntry::new("Space", "Play / Pause"),
    HelpEntry::new("M", "Mute / Unmute"),
    HelpEntry::new("R", "Restart from the beginning"),
    HelpEntry::new("Z", "Toggle Fullscreen"),
    HelpEntry::new("ESC / Q", "Exit fullscreen / Quit"),
];

/// Render the help window; `open` flips to false when the user closes it.
pub fn render(ctx: &egui::Context, open: &mut bool) {
    egui::Window::new("Keyboard")
        .open(open)
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            egui::Grid::new("help_grid").num_columns(2).show(ui, |ui| {
                for entry in GLOBAL_HELP {
                    ui.monospace(entry.key);
                    ui.label(entry.desc);
                    ui.end_row();
                }
            });
        });
}
