use crate::error::ProbeError;
use crate::logic::{
    HttpPing, Probe, ProbeJobs, ProbeRunner, ReqwestTransport, SharedState, SimulatedPing,
    lock_state, probe_dispatcher,
};
use crate::model::status::last_updated_now;
use crate::model::{AppState, ProbeMode, ProbeResult, ServerFacts, TARGET_HOST, TARGET_URL};
use eframe::egui;
use eframe::egui::{Color32, CornerRadius, Margin, RichText};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tr::tr;

pub struct StatusBoard {
    pub(crate) runner: ProbeRunner,
    pub(crate) facts: ServerFacts,
    http_probe: Arc<dyn Probe>,
    simulated_probe: Arc<dyn Probe>,
}

/// Helper for application-specific colors adapted for light/dark themes.
struct StatusVisuals {
    pub is_dark: bool,
}

impl StatusVisuals {
    fn from_ctx(ctx: &egui::Context) -> Self {
        Self {
            is_dark: ctx.style().visuals.dark_mode,
        }
    }

    fn label_color(&self) -> Color32 {
        if self.is_dark {
            Color32::from_rgb(86, 180, 233) // Sky Blue
        } else {
            Color32::from_rgb(0, 114, 178) // Blue
        }
    }

    fn outcome_color(&self, success: bool) -> Color32 {
        match (success, self.is_dark) {
            (true, true) => Color32::from_rgb(0, 200, 140),
            (true, false) => Color32::from_rgb(0, 128, 90),
            (false, _) => Color32::from_rgb(213, 94, 0), // Vermilion
        }
    }

    fn outcome_fill(&self, success: bool) -> Color32 {
        let alpha = if self.is_dark { 40 } else { 30 };
        if success {
            Color32::from_rgba_unmultiplied(0, 158, 115, alpha)
        } else {
            Color32::from_rgba_unmultiplied(213, 94, 0, alpha)
        }
    }

    fn pending_color(&self) -> Color32 {
        if self.is_dark {
            Color32::from_rgb(240, 228, 66) // Yellow
        } else {
            Color32::from_rgb(230, 159, 0) // Orange
        }
    }
}

/// Text for the result panel.
pub fn result_text(result: &ProbeResult) -> String {
    match (result.success, &result.time, &result.error) {
        (true, Some(time), _) => {
            let mut text = format!("{}: {} {}", tr!("Ping OK"), time, tr!("ms"));
            if let Some(status) = result.status {
                text.push_str(&format!(" (HTTP {status})"));
            }
            if let Some(host) = &result.host {
                text.push_str(&format!(" · {host}"));
            }
            text
        }
        (true, None, _) => tr!("Ping OK").to_string(),
        (false, _, Some(error)) => format!("{}: {}", tr!("Ping failed"), error),
        (false, _, None) => format!("{}: {}", tr!("Ping failed"), tr!("no response")),
    }
}

impl StatusBoard {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self, ProbeError> {
        let app_state = match cc.storage {
            Some(storage) => {
                if let Some(serialized) = storage.get_string(eframe::APP_KEY) {
                    serde_json::from_str(&serialized).unwrap_or_else(|e| {
                        log::warn!("ignoring unreadable saved settings: {e}");
                        AppState::default()
                    })
                } else {
                    AppState::default()
                }
            }
            None => AppState::default(),
        };
        let state = Arc::new(Mutex::new(app_state));

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let (jobs, queue) = mpsc::unbounded_channel();
        let state_clone = state.clone();
        std::thread::spawn(move || {
            runtime.block_on(probe_dispatcher(state_clone, queue));
        });

        Self::from_state(state, jobs)
    }

    /// Board using the production probes, dispatching runs into `jobs`.
    pub fn from_state(state: SharedState, jobs: ProbeJobs) -> Result<Self, ProbeError> {
        let transport = Arc::new(ReqwestTransport::new()?);
        Ok(Self::with_probes(
            ProbeRunner::new(state, jobs),
            Arc::new(HttpPing::new(transport, TARGET_URL)),
            Arc::new(SimulatedPing::new(TARGET_HOST)),
        ))
    }

    pub fn with_probes(
        runner: ProbeRunner,
        http_probe: Arc<dyn Probe>,
        simulated_probe: Arc<dyn Probe>,
    ) -> Self {
        Self {
            runner,
            facts: ServerFacts::default(),
            http_probe,
            simulated_probe,
        }
    }

    pub fn state(&self) -> &SharedState {
        self.runner.state()
    }

    /// Runs the probe selected by `mode`.
    pub fn ping(&self, mode: ProbeMode) {
        let probe = match mode {
            ProbeMode::Http => self.http_probe.clone(),
            ProbeMode::Simulated => self.simulated_probe.clone(),
        };
        self.runner.run(probe);
    }

    pub fn ui_layout(&mut self, ctx: &egui::Context) {
        let visuals = StatusVisuals::from_ctx(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(RichText::new(&self.facts.title).strong());

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let mut theme = ui.ctx().options(|o| o.theme_preference);
                        let old_theme = theme;
                        theme.radio_buttons(ui);
                        if theme != old_theme {
                            ui.ctx().options_mut(|o| o.theme_preference = theme);
                        }
                    });
                });

                ui.separator();

                egui::Grid::new("server_facts")
                    .num_columns(2)
                    .spacing([24.0, 8.0])
                    .striped(true)
                    .show(ui, |ui| {
                        for fact in &self.facts.facts {
                            ui.label(RichText::new(&fact.label).color(visuals.label_color()));
                            ui.label(RichText::new(&fact.value).strong());
                            ui.end_row();
                        }
                    });

                ui.add_space(8.0);
                ui.label(
                    RichText::new(format!("{}: {}", tr!("Last updated"), last_updated_now()))
                        .small()
                        .weak(),
                );

                ui.separator();

                // Snapshot, so the lock is not held while widgets run
                let (mut mode, pending, result) = {
                    let state = lock_state(self.runner.state());
                    (
                        state.probe_mode,
                        state.run.pending,
                        state.run.selected_result().cloned(),
                    )
                };

                ui.horizontal(|ui| {
                    ui.label(format!("{}:", tr!("Probe")));
                    ui.selectable_value(&mut mode, ProbeMode::Http, tr!("HTTP HEAD"))
                        .on_hover_text(TARGET_URL);
                    ui.selectable_value(&mut mode, ProbeMode::Simulated, tr!("Simulated"))
                        .on_hover_text(tr!("Random outcome after 2 seconds, no network traffic"));
                });
                {
                    let mut state = lock_state(self.runner.state());
                    if state.probe_mode != mode {
                        log::info!("probe mode changed to {mode:?}");
                        state.probe_mode = mode;
                    }
                }

                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    if ui.button(tr!("Ping Server")).clicked() {
                        self.ping(mode);
                    }
                    if pending {
                        ui.colored_label(visuals.pending_color(), tr!("Pinging…"));
                    }
                });

                if let Some(result) = result {
                    ui.add_space(8.0);
                    egui::Frame::new()
                        .fill(visuals.outcome_fill(result.success))
                        .corner_radius(CornerRadius::same(6))
                        .inner_margin(Margin::same(10))
                        .show(ui, |ui| {
                            ui.colored_label(
                                visuals.outcome_color(result.success),
                                RichText::new(result_text(&result)).monospace().strong(),
                            );
                        });
                }
            });
        });
    }
}

impl eframe::App for StatusBoard {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let serialized =
            serde_json::to_string_pretty(&*lock_state(self.runner.state())).unwrap_or_default();
        storage.set_string(eframe::APP_KEY, serialized);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_layout(ctx);
        // Results arrive from the background runtime, so poll faster while one is due
        let pending = lock_state(self.runner.state()).run.pending;
        ctx.request_repaint_after(Duration::from_millis(if pending { 100 } else { 1000 }));
    }
}
