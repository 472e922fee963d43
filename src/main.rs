use phonica::assets;
use phonica::cli::Args;
use phonica::core::audio_out;
use phonica::core::player::PlaybackController;
use phonica::core::probe::AssetProbe;
use phonica::help;
use phonica::passages;
use phonica::paths::PathConfig;
use phonica::settings::{render_settings_window, AppSettings};
use phonica::ui;

use anyhow::Context as _;
use clap::Parser;
use eframe::egui;
use egui_dock::{DockArea, DockState, TabViewer};
use log::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
enum DockTab {
    Passages,
    Library,
    Checker,
    Editor,
}

/// Main application state
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
struct PhonicaApp {
    #[serde(skip)]
    player: PlaybackController,
    #[serde(skip, default = "default_probe")]
    probe: AssetProbe,
    settings: AppSettings,
    passages_state: ui::passages::PassagesState,
    library_state: ui::library::LibraryState,
    editor_state: ui::editor::EditorState,
    dock_state: DockState<DockTab>,
    #[serde(skip)]
    show_help: bool,
    #[serde(skip)]
    show_settings: bool,
    #[serde(skip)]
    status_line: Option<String>,
    #[serde(skip)]
    is_fullscreen: bool,
}

fn default_probe() -> AssetProbe {
    AssetProbe::new(assets::AUDIO_ASSETS)
}

fn default_dock_state() -> DockState<DockTab> {
    DockState::new(vec![
        DockTab::Passages,
        DockTab::Library,
        DockTab::Checker,
        DockTab::Editor,
    ])
}

impl Default for PhonicaApp {
    fn default() -> Self {
        Self {
            player: PlaybackController::default(),
            probe: default_probe(),
            settings: AppSettings::default(),
            passages_state: ui::passages::PassagesState::default(),
            library_state: ui::library::LibraryState::default(),
            editor_state: ui::editor::EditorState::default(),
            dock_state: default_dock_state(),
            show_help: false,
            show_settings: false,
            status_line: None,
            is_fullscreen: false,
        }
    }
}

impl PhonicaApp {
    /// Fold drained player events into the toolbar status line.
    fn handle_player_events(&mut self) {
        use phonica::core::player::PlayerEvent;

        for event in self.player.take_events() {
            match event {
                PlayerEvent::Loaded { title, duration } => {
                    self.status_line =
                        Some(format!("Loaded {} ({})", title, ui::format_time(duration)));
                }
                PlayerEvent::Started => {
                    let title = self.player.title().unwrap_or("media").to_string();
                    self.status_line = Some(format!("Playing {}", title));
                }
                PlayerEvent::Paused => {
                    self.status_line = Some("Paused".to_string());
                }
                PlayerEvent::Ended => {
                    self.status_line = Some("Finished".to_string());
                }
                PlayerEvent::Error(e) => {
                    self.status_line = Some(e);
                }
            }
        }
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        // Don't steal keys while typing in the editor or search fields
        if ctx.wants_keyboard_input() {
            return;
        }

        let input = ctx.input(|i| i.clone());

        if input.key_pressed(egui::Key::Space) {
            self.player.toggle_play();
        }
        if input.key_pressed(egui::Key::M) {
            self.player.toggle_mute();
        }
        if input.key_pressed(egui::Key::R) {
            self.player.restart();
        }
        if input.key_pressed(egui::Key::F1) {
            self.show_help = !self.show_help;
        }
        if input.key_pressed(egui::Key::Z) {
            self.set_fullscreen(ctx, !self.is_fullscreen);
        }

        // ESC leaves fullscreen first, then quits. Q always quits.
        if input.key_pressed(egui::Key::Escape) {
            if self.is_fullscreen {
                self.set_fullscreen(ctx, false);
            } else if self.show_settings {
                self.show_settings = false;
            } else {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
        if input.key_pressed(egui::Key::Q) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn set_fullscreen(&mut self, ctx: &egui::Context, enabled: bool) {
        self.is_fullscreen = enabled;
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(enabled));
        ctx.request_repaint();
    }

    fn apply_theme(&self, ctx: &egui::Context) {
        if self.settings.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        let mut style = (*ctx.style()).clone();
        for (_, font_id) in style.text_styles.iter_mut() {
            font_id.size = self.settings.font_size;
        }
        ctx.set_style(style);
    }
}

struct DockTabs<'a> {
    app: &'a mut PhonicaApp,
}

impl TabViewer for DockTabs<'_> {
    type Tab = DockTab;

    fn title(&mut self, tab: &mut DockTab) -> egui::WidgetText {
        match tab {
            DockTab::Passages => "Passages".into(),
            DockTab::Library => "Video Library".into(),
            DockTab::Checker => "Audio Checker".into(),
            DockTab::Editor => "Editor".into(),
        }
    }

    fn ui(&mut self, ui: &mut egui::Ui, tab: &mut DockTab) {
        match tab {
            DockTab::Passages => ui::passages::render(
                ui,
                &mut self.app.passages_state,
                &self.app.settings,
                &mut self.app.player,
            ),
            DockTab::Library => {
                ui::library::render(ui, &mut self.app.library_state, &self.app.settings)
            }
            DockTab::Checker => ui::checker::render(ui, &self.app.probe, &self.app.settings),
            DockTab::Editor => ui::editor::render(ui, &mut self.app.editor_state),
        }
    }
}

impl eframe::App for PhonicaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pump the transport: loader results, clock, completion
        self.player.update();
        self.handle_player_events();

        self.apply_theme(ctx);

        // Keep repainting while the clock or a loader is running
        if self.player.state().is_playing || self.player.state().is_loading {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("Phonica");
                ui.separator();
                if ui.button("Settings").clicked() {
                    self.show_settings = !self.show_settings;
                }
                if ui.button("Help (F1)").clicked() {
                    self.show_help = !self.show_help;
                }
                if let Some(status) = &self.status_line {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.weak(status);
                    });
                }
            });
        });

        egui::TopBottomPanel::bottom("transport").show(ctx, |ui| {
            ui.add_space(4.0);
            ui::transport::render(ui, &mut self.player);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let dock_style = egui_dock::Style::from_egui(ctx.style().as_ref());
            let mut dock_state = std::mem::replace(&mut self.dock_state, default_dock_state());
            {
                let mut tabs = DockTabs { app: self };
                DockArea::new(&mut dock_state)
                    .style(dock_style)
                    .show_inside(ui, &mut tabs);
            }
            self.dock_state = dock_state;
        });

        self.handle_keyboard(ctx);

        if self.show_settings {
            render_settings_window(ctx, &mut self.show_settings, &mut self.settings);
        }
        if self.show_help {
            help::render(ctx, &mut self.show_help);
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        // Carry transport preferences over to the next session
        self.settings.volume = self.player.state().volume;
        self.settings.rate = self.player.state().rate;
        self.settings.show_help = self.show_help;

        if let Ok(json) = serde_json::to_string(self) {
            storage.set_string(eframe::APP_KEY, json);
            debug!("Session saved");
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        audio_out::teardown();
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let path_config = PathConfig::from_env_and_cli(args.config_dir.clone());
    if let Err(e) = path_config.ensure_dirs() {
        eprintln!("Warning: Failed to create application directories: {}", e);
    }

    // Determine log level based on verbosity flags
    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    if let Some(log_path_opt) = &args.log_file {
        // File logging with the requested verbosity level
        let log_path = log_path_opt
            .as_ref()
            .cloned()
            .unwrap_or_else(|| path_config.data_file("phonica.log"));

        let file = std::fs::File::create(&log_path)
            .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!("Logging to file: {} (level: {:?})", log_path.display(), log_level);
    } else {
        // Console logging (respects RUST_LOG if set)
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .filter_module("egui", log::LevelFilter::Info)
            .format_timestamp_millis()
            .init();
    }

    info!("Phonica starting...");
    debug!("Command-line args: {:?}", args);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("Phonica v{} • F1 for help", env!("CARGO_PKG_VERSION")))
            .with_inner_size(egui::vec2(1100.0, 760.0))
            .with_resizable(true),
        persist_window: true,
        #[cfg(not(target_arch = "wasm32"))]
        persistence_path: Some(path_config.config_file("phonica.json")),
        ..Default::default()
    };

    eframe::run_native(
        "Phonica",
        native_options,
        Box::new(move |cc| {
            // Load persisted session if available, otherwise start fresh
            let mut app: PhonicaApp = cc
                .storage
                .and_then(|storage| storage.get_string(eframe::APP_KEY))
                .and_then(|json| serde_json::from_str(&json).ok())
                .unwrap_or_else(|| {
                    info!("No persisted session found, starting fresh");
                    PhonicaApp::default()
                });

            // CLI overrides
            if let Some(base) = args.assets.clone() {
                info!("Asset base from CLI: {}", base);
                app.settings.asset_base = base;
            }
            if let Some(id) = &args.passage {
                if passages::find(id).is_some() {
                    app.passages_state.selected = Some(id.clone());
                } else {
                    warn!("Unknown passage id: {}", id);
                }
            }

            // Restore transport preferences into the controller
            app.player.set_volume(app.settings.volume);
            app.player.set_rate(app.settings.rate);
            app.show_help = app.settings.show_help;

            if args.probe_on_start {
                let ctx = cc.egui_ctx.clone();
                app.probe
                    .refresh(&app.settings.asset_base, move || ctx.request_repaint());
            }

            if args.fullscreen {
                cc.egui_ctx
                    .send_viewport_cmd(egui::ViewportCommand::Fullscreen(true));
                app.is_fullscreen = true;
            }

            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))?;

    info!("Application exiting");
    Ok(())
}
