#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for data-center water-risk estimates.
//!
//! Loads the project catalog once at startup (from the feature file, or
//! the built-in sample set) and serves read-only project lookups,
//! per-project scores, and county projections. Nothing is persisted.

mod handlers;

use actix_cors::Cors;
use actix_web::error::InternalError;
use actix_web::{App, HttpResponse, HttpServer, middleware, web};
use terrapulse_project::catalog::ProjectCatalog;
use terrapulse_project::paths;
use terrapulse_server_models::ApiError;

/// Default TCP port.
pub const DEFAULT_PORT: u16 = 8000;

/// Shared application state.
pub struct AppState {
    /// Projects loaded at startup, read-only for the process lifetime.
    pub catalog: ProjectCatalog,
}

/// Registers the API routes and the JSON/query error handlers.
///
/// Malformed bodies and query strings are answered with a `400` carrying
/// the same `{"detail": ...}` body as validation failures.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ApiError::new(err.to_string()));
        InternalError::from_response(err, response).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ApiError::new(err.to_string()));
        InternalError::from_response(err, response).into()
    }))
    .route("/health", web::get().to(handlers::health))
    .route("/meta", web::get().to(handlers::meta))
    .route("/projects", web::get().to(handlers::list_projects))
    .route("/projects/{project_id}", web::get().to(handlers::get_project))
    .route("/score", web::post().to(handlers::score))
    .route("/counties/summary", web::get().to(handlers::county_summary));
}

/// Starts the water-risk API server.
///
/// Reads `PROJECTS_GEOJSON`, `BIND_ADDR` and `PORT` from the environment,
/// loads the project catalog, and runs the Actix-Web HTTP server. The
/// caller provides the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let data_path = paths::projects_path();
    log::info!("Loading projects from {}...", data_path.display());
    let catalog = ProjectCatalog::load(&data_path);
    log::info!(
        "Serving {} projects (source: {})",
        catalog.len(),
        catalog.source()
    );

    let state = web::Data::new(AppState { catalog });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
