mod api;
mod app;
mod controllers;
mod forms;
mod routes;
mod ui;
mod utils;

use adw::Application;
use adw::prelude::*;
use tracing_subscriber::EnvFilter;

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        eprintln!("logger already initialised");
    }
}

fn main() -> glib::ExitCode {
    let (config, warnings) = app::AppConfig::load();
    init_logging(&config.log_filter);
    for warning in &warnings {
        log::warn!("{warning}; using defaults");
    }
    log::info!("backend at {}", config.base_url);

    let app = Application::builder()
        .application_id("com.example.Finlog")
        .build();
    app.connect_activate(move |app| {
        crate::app::build_ui(app, &config);
    });
    app.run()
}
