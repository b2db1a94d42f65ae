mod app;

use std::{
    fs::{self, OpenOptions},
    path::Path,
    sync::Mutex,
};

use anyhow::{Context, Result};
use tracing::warn;
use tracing_subscriber::{prelude::*, EnvFilter};
use zoo_core::{
    config::{self, AppConfig},
    LoadOutcome, Zoo, ZooStore,
};

fn main() -> Result<()> {
    config::ensure_default_config()?;
    let config = AppConfig::load()?;
    init_logging(&config.log_dir)?;

    let store = config.store();
    let (mut zoo, startup) = restore_zoo(&store, &config.zoo_name);

    let mut app = app::ZooApp::new(&mut zoo, &store);
    app.notice(startup);
    app.run()
}

fn restore_zoo(store: &ZooStore, fallback_name: &str) -> (Zoo, String) {
    let path = store.path().display();
    match store.load() {
        Ok(LoadOutcome::Loaded(zoo)) => (zoo, format!("Zoo loaded from {path}.")),
        Ok(LoadOutcome::NoPriorState) => (
            Zoo::new(fallback_name),
            format!("File {path} not found or empty, starting a new zoo."),
        ),
        Err(err) => {
            warn!("failed to load saved zoo: {err:#}");
            (
                Zoo::new(fallback_name),
                format!("Could not load {path} ({err}), starting a new zoo."),
            )
        }
    }
}

fn init_logging(log_dir: &Path) -> Result<()> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;
    let log_path = log_dir.join("zoo.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // The UI owns stdout, so events only go to the log file.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
