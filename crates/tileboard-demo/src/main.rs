//! Tileboard demo entry point.
//!
//! Loads a dashboard (a JSON file, a saved dashboard, or the built-in
//! showcase layout), replays a short scripted editing session and prints the
//! resulting document as JSON. Set `RUST_LOG=debug` to watch the controller
//! and the mutation gate.

mod config;
mod script;

use std::path::Path;
use std::process::ExitCode;

use config::{DemoConfig, DemoError};
use tileboard_core::storage::FileStorage;
use tileboard_core::{Dashboard, DashboardDocument, WidgetService};

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("tileboard-demo: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), DemoError> {
    let config = DemoConfig::from_env()?;
    log::info!(
        "Starting Tileboard demo ({}x{} viewport)",
        config.viewport.size.width,
        config.viewport.size.height
    );

    let storage = config.store_dir.as_ref().map(FileStorage::new).transpose()?;
    let document = open_document(&config, storage.as_ref())?;
    log::info!(
        "Loaded dashboard {:?} with {} widgets",
        document.name,
        document.widgets.len()
    );

    let mut dashboard = Dashboard::new(document, config.viewport);
    for outcome in script::run(&mut dashboard) {
        let status = if outcome.changed { "applied" } else { "no change" };
        println!("{:<28} {}", outcome.label, status);
    }
    println!("{}", dashboard.document().to_json()?);

    if let Some(storage) = &storage {
        let path = storage.save(dashboard.document())?;
        log::info!("Saved dashboard {} to {}", dashboard.document().id, path.display());
    }
    Ok(())
}

/// Pick the starting document: an explicit file, then a saved dashboard, then the showcase.
fn open_document(
    config: &DemoConfig,
    storage: Option<&FileStorage>,
) -> Result<DashboardDocument, DemoError> {
    if let Some(path) = &config.layout_path {
        return load_document(path);
    }
    match (&config.dashboard_id, storage) {
        (Some(id), Some(storage)) => Ok(storage.load(id)?),
        (Some(_), None) => Err(DemoError::NoStore),
        (None, _) => {
            let widgets = script::seed_layout(&WidgetService::new())?;
            Ok(DashboardDocument::with_widgets("Showcase", widgets))
        }
    }
}

fn load_document(path: &Path) -> Result<DashboardDocument, DemoError> {
    let json = std::fs::read_to_string(path).map_err(|source| DemoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(DashboardDocument::from_json(&json)?)
}
