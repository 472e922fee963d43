//! Audio checker tab: per-asset availability with incremental progress.

use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::core::probe::{AssetProbe, AssetStatus};
use crate::settings::AppSettings;

pub fn render(ui: &mut egui::Ui, probe: &AssetProbe, settings: &AppSettings) {
    let summary = probe.summary();

    ui.horizontal(|ui| {
        let checking = probe.in_progress();
        let label = if checking { "Checking…" } else { "Check all" };
        if ui.add_enabled(!checking, egui::Button::new(label)).clicked() {
            let ctx = ui.ctx().clone();
            probe.refresh(&settings.asset_base, move || ctx.request_repaint());
        }
        if checking {
            ui.spinner();
        }

        ui.separator();
        ui.label(format!(
            "{} available · {} missing · {} pending",
            summary.available, summary.missing, summary.checking
        ));
    });

    ui.separator();

    let statuses = probe.statuses();
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::exact(28.0))
        .column(Column::auto().at_least(180.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|_| {});
            header.col(|ui| {
                ui.strong("Asset");
            });
            header.col(|ui| {
                ui.strong("Status");
            });
        })
        .body(|mut body| {
            for (name, status) in &statuses {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        status_icon(ui, *status);
                    });
                    row.col(|ui| {
                        ui.monospace(name);
                    });
                    row.col(|ui| {
                        ui.label(status.label());
                    });
                });
            }
        });
}

fn status_icon(ui: &mut egui::Ui, status: AssetStatus) {
    match status {
        AssetStatus::Unknown => {
            ui.weak("·");
        }
        AssetStatus::Checking => {
            ui.spinner();
        }
        AssetStatus::Available => {
            ui.colored_label(egui::Color32::from_rgb(0x4c, 0xaf, 0x50), "✔");
        }
        AssetStatus::Missing => {
            ui.colored_label(egui::Color32::LIGHT_RED, "✘");
        }
    }
}
