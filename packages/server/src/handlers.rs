//! HTTP handler functions for the water-risk API.

use actix_web::{HttpResponse, web};
use terrapulse_project_models::ProjectSummary;
use terrapulse_risk::RiskError;
use terrapulse_risk::county::summarize_counties;
use terrapulse_risk::scoring::{calculate_score, parse_configuration};
use terrapulse_server_models::{ApiError, ApiHealth, ApiMeta, CountySummaryParams, ScoreRequest};

use crate::AppState;

fn bad_request(e: &RiskError) -> HttpResponse {
    log::warn!("Rejected request: {e}");
    HttpResponse::BadRequest().json(ApiError::new(e.to_string()))
}

fn project_not_found(project_id: &str) -> HttpResponse {
    log::debug!("Unknown project id '{project_id}'");
    HttpResponse::NotFound().json(ApiError::new("Project not found"))
}

/// `GET /health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        status: "ok".to_string(),
        data_source: state.catalog.source(),
        project_count: state.catalog.len(),
    })
}

/// `GET /meta`
///
/// Reports whether projects came from the feature file or the sample set.
pub async fn meta(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiMeta {
        data_source: state.catalog.source(),
        project_count: state.catalog.len(),
        expects_geojson_at: state.catalog.data_path().display().to_string(),
    })
}

/// `GET /projects`
///
/// Lists every project without its boundary geometry, in load order.
pub async fn list_projects(state: web::Data<AppState>) -> HttpResponse {
    let summaries: Vec<ProjectSummary> = state
        .catalog
        .projects()
        .iter()
        .map(ProjectSummary::from)
        .collect();

    HttpResponse::Ok().json(summaries)
}

/// `GET /projects/{project_id}`
pub async fn get_project(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let project_id = path.into_inner();
    state.catalog.get(&project_id).map_or_else(
        || project_not_found(&project_id),
        |project| HttpResponse::Ok().json(project),
    )
}

/// `POST /score`
///
/// Validates the configuration before looking up the project.
pub async fn score(state: web::Data<AppState>, body: web::Json<ScoreRequest>) -> HttpResponse {
    let config = match parse_configuration(body.size_mw, &body.cooling_type) {
        Ok(config) => config,
        Err(e) => return bad_request(&e),
    };

    let Some(project) = state.catalog.get(&body.project_id) else {
        return project_not_found(&body.project_id);
    };

    match calculate_score(project, config.size_mw, config.cooling_type) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => bad_request(&e),
    }
}

/// `GET /counties/summary`
///
/// Projects every county under one shared configuration, highest impact
/// first. Defaults to 50 MW hybrid cooling.
pub async fn county_summary(
    state: web::Data<AppState>,
    params: web::Query<CountySummaryParams>,
) -> HttpResponse {
    let result = parse_configuration(params.size_mw(), &params.cooling_type())
        .and_then(|config| summarize_counties(state.catalog.projects(), &config));

    match result {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => bad_request(&e),
    }
}
