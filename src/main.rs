// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! DocDesk Desktop Application
//!
//! A native Rust desktop client for the document service, using egui/eframe.
//! Uploads JSON question files, searches them and lists stored documents.

use std::sync::Arc;

use anyhow::Context;
use docdesk::api::ApiClient;
use docdesk::config::Config;
use docdesk::gui::{DocDeskApp, UploadSearch};
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting DocDesk");

    let config = Config::load();
    let api = Arc::new(
        ApiClient::new(&config.base_url)
            .with_context(|| format!("bad base_url {:?}", config.base_url))?,
    );

    // Runtime for network requests; lives as long as the window
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;
    let workflow = UploadSearch::new(api, runtime.handle().clone(), &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("DocDesk")
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    log::info!("Launching egui window");

    eframe::run_native(
        "DocDesk",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(DocDeskApp::new(cc, workflow)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {}", e))?;

    drop(runtime);
    Ok(())
}
