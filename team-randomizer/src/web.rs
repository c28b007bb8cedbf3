use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::RequestError;
use crate::parser::{parse_disabled, parse_names};
use crate::request::{prepare, run, Outcome, RawRequest};
use crate::teams::DisabledByRound;

/// Query parameters accepted by `/api/teams`
#[derive(Debug, Default, Deserialize)]
pub struct TeamsQuery {
    names: Option<String>,
    size: Option<usize>,
    rounds: Option<usize>,
    min: Option<usize>,
    max: Option<usize>,
    seed: Option<String>,
    disabled: Option<String>,
}

fn build_outcome(query: TeamsQuery) -> Result<Outcome, RequestError> {
    let disabled = match query.disabled.as_deref() {
        Some(raw) => parse_disabled(raw)?,
        None => DisabledByRound::new(),
    };

    let prepared = prepare(RawRequest {
        pool: parse_names(query.names.as_deref().unwrap_or("")),
        team_size: query.size,
        rounds: query.rounds,
        min_appearances: query.min,
        max_appearances: query.max,
        seed: query.seed,
        disabled,
    })?;

    Ok(run(&prepared)?)
}

// Teams endpoint
async fn get_teams(query: web::Query<TeamsQuery>) -> Result<HttpResponse> {
    match build_outcome(query.into_inner()) {
        Ok(outcome) => Ok(HttpResponse::Ok().json(outcome)),
        Err(e) => {
            warn!(error = %e, "team request rejected");
            Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": e.to_string()
            })))
        }
    }
}

async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "ok"})))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(health))
        .route("/api/teams", web::get().to(get_teams));
}

pub async fn start_server(config: ServerConfig) -> std::io::Result<()> {
    info!(host = %config.host, port = config.port, "starting web server");

    HttpServer::new(|| App::new().wrap(middleware::Logger::default()).configure(routes))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
