//! Demo configuration from the command line and environment.

use std::ffi::OsString;
use std::path::PathBuf;

use thiserror::Error;
use tileboard_core::storage::StorageError;
use tileboard_core::{LayoutError, Viewport};

/// `WIDTHxHEIGHT` of the simulated screen, in pixels.
pub const VIEWPORT_ENV: &str = "TILEBOARD_VIEWPORT";
/// Directory to save the final dashboard into.
pub const STORE_ENV: &str = "TILEBOARD_STORE";
/// Id of a dashboard in the store to start from.
pub const DASHBOARD_ENV: &str = "TILEBOARD_DASHBOARD";

/// Errors surfaced by the demo.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("invalid viewport {0:?}, expected WIDTHxHEIGHT with positive sizes")]
    InvalidViewport(String),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid dashboard JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("TILEBOARD_DASHBOARD is set but TILEBOARD_STORE is not")]
    NoStore,
}

/// Resolved demo settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Dashboard JSON to start from; the built-in showcase layout otherwise.
    pub layout_path: Option<PathBuf>,
    pub viewport: Viewport,
    pub store_dir: Option<PathBuf>,
    /// Saved dashboard to resume; requires `store_dir`.
    pub dashboard_id: Option<String>,
}

impl DemoConfig {
    /// Read the first argument and the `TILEBOARD_*` variables.
    pub fn from_env() -> Result<Self, DemoError> {
        Self::from_parts(
            std::env::args_os().nth(1),
            std::env::var(VIEWPORT_ENV).ok(),
            std::env::var_os(STORE_ENV),
            std::env::var(DASHBOARD_ENV).ok(),
        )
    }

    fn from_parts(
        layout: Option<OsString>,
        viewport: Option<String>,
        store: Option<OsString>,
        dashboard: Option<String>,
    ) -> Result<Self, DemoError> {
        let viewport = match viewport {
            Some(raw) => parse_viewport(&raw)?,
            None => Viewport::default(),
        };
        let store_dir = store.filter(|dir| !dir.is_empty()).map(PathBuf::from);
        let dashboard_id = dashboard
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        if dashboard_id.is_some() && store_dir.is_none() {
            return Err(DemoError::NoStore);
        }
        Ok(Self {
            layout_path: layout.map(PathBuf::from),
            viewport,
            store_dir,
            dashboard_id,
        })
    }
}

/// Parse `WIDTHxHEIGHT`, e.g. `1280x720`.
pub fn parse_viewport(raw: &str) -> Result<Viewport, DemoError> {
    let invalid = || DemoError::InvalidViewport(raw.to_string());
    let (w, h) = raw.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
    let width: f64 = w.trim().parse().map_err(|_| invalid())?;
    let height: f64 = h.trim().parse().map_err(|_| invalid())?;

    let viewport = Viewport::new(width, height);
    if !viewport.is_usable() {
        return Err(invalid());
    }
    Ok(viewport)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_viewport() {
        assert_eq!(parse_viewport("1280x720").unwrap(), Viewport::new(1280.0, 720.0));
        assert_eq!(parse_viewport(" 800 X 600 ").unwrap(), Viewport::new(800.0, 600.0));
    }

    #[test]
    fn test_parse_viewport_rejects_garbage() {
        for raw in ["", "1280", "axb", "0x720", "-5x10", "1280x"] {
            assert!(
                matches!(parse_viewport(raw), Err(DemoError::InvalidViewport(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_defaults() {
        let config = DemoConfig::from_parts(None, None, None, None).unwrap();
        assert_eq!(config.viewport, Viewport::default());
        assert!(config.layout_path.is_none());
        assert!(config.store_dir.is_none());
        assert!(config.dashboard_id.is_none());
    }

    #[test]
    fn test_from_parts() {
        let config = DemoConfig::from_parts(
            Some("layout.json".into()),
            Some("1024x768".to_string()),
            Some("".into()),
            None,
        )
        .unwrap();
        assert_eq!(config.layout_path, Some(PathBuf::from("layout.json")));
        assert_eq!(config.viewport, Viewport::new(1024.0, 768.0));
        assert!(config.store_dir.is_none());
    }

    #[test]
    fn test_dashboard_id_needs_store() {
        let result = DemoConfig::from_parts(None, None, None, Some("ops".to_string()));
        assert!(matches!(result, Err(DemoError::NoStore)));

        let config = DemoConfig::from_parts(
            None,
            None,
            Some("/tmp/boards".into()),
            Some(" ops ".into()),
        )
        .unwrap();
        assert_eq!(config.store_dir, Some(PathBuf::from("/tmp/boards")));
        assert_eq!(config.dashboard_id.as_deref(), Some("ops"));
    }
}
