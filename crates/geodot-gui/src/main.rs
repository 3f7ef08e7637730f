mod app;
mod canvas;
mod convert;
mod messages;
mod panels;
mod states;
mod workers;

use std::path::PathBuf;

use geodot_core::config::AppConfig;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Optional config file as the only argument.
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => match AppConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring config file");
                AppConfig::default()
            }
        },
        None => AppConfig::default(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Geodot"),
        ..Default::default()
    };

    eframe::run_native(
        "Geodot",
        options,
        Box::new(|cc| Ok(Box::new(app::GeodotApp::new(&cc.egui_ctx, config)))),
    )
}
