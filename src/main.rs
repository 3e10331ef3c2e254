#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe::egui;
use qromarck_status::app::StatusBoard;
use tr::{tr, tr_init};

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    tr_init!("./locales");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(tr!("Qromarck server"))
            .with_inner_size([520.0, 420.0])
            .with_resizable(true),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "qromarck_status",
        options,
        Box::new(|cc| {
            let app = StatusBoard::new(cc)?;
            Ok(Box::new(app))
        }),
    )
}
