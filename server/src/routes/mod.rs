//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server only hosts the Leptos application: SSR for every client route,
//! the compiled WASM/CSS bundle under `/pkg`, and a health probe. Profile and
//! admin data live in the external backend the browser talks to directly.


use std::path::{Path, PathBuf};

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("leptos configuration: {0}")]
    Configuration(String),
}

/// Bundle directory served at `/pkg`.
fn pkg_dir(site_root: &str, site_pkg_dir: &str) -> PathBuf {
    Path::new(site_root).join(site_pkg_dir)
}

/// Leptos SSR routes plus static bundle and health probe.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[workspace.metadata.leptos]` section).
pub fn leptos_app(config: &ServerConfig) -> Result<Router, AppError> {
    let conf = get_configuration(None).map_err(|e| AppError::Configuration(e.to_string()))?;
    let mut leptos_options = conf.leptos_options;
    if let Some(root) = &config.site_root {
        leptos_options.site_root = root.as_str().into();
    }
    let routes = generate_route_list(mentorhub_client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || mentorhub_client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let pkg_path = pkg_dir(&leptos_options.site_root, &leptos_options.site_pkg_dir);
    tracing::info!(pkg = %pkg_path.display(), "serving client bundle");

    let mut app = Router::new()
        .route("/healthz", get(healthz))
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(pkg_path))
        .layer(TraceLayer::new_for_http());
    if config.compression {
        app = app.layer(CompressionLayer::new());
    }
    Ok(app)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
