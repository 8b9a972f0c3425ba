//! Administrative operations: destructive reset, fixture load, and access
//! to the flat application log.

use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};
use serde::Serialize;

use outreach_db::db::migrate::reset_database;
use outreach_service::loader::fixture::Fixture;
use outreach_service::loader::initialize_from_fixture;

use super::resources::MessageResponse;
use crate::config::get_config_from_depot;
use crate::db_handler::get_db_from_depot;
use crate::error::{AppError, AppResult};

const DEFAULT_LOG_TAIL: usize = 100;

#[derive(Debug, Serialize)]
struct LogTailResponse {
    lines: Vec<String>,
}

/// POST /reset-project - drops the whole store and rebuilds the empty
/// schema. Destructive; there is no confirmation step.
#[handler]
async fn reset_project(depot: &mut Depot) -> AppResult<Json<MessageResponse>> {
    let settings = get_config_from_depot(depot)?;

    tracing::warn!("Reset project requested");

    let url = settings.database.url.clone();
    tokio::task::spawn_blocking(move || reset_database(&url))
        .await
        .map_err(|e| AppError::Unexpected(format!("Reset task failed: {e}")))??;

    Ok(Json(MessageResponse {
        message: "Project reset successfully".to_string(),
    }))
}

/// POST /initialize-db - loads the configured JSON fixture into the
/// store. Safe to re-run: every stage upserts, and already-synthesized
/// sample emails are skipped. Work committed before a failure stays
/// committed.
#[handler]
async fn initialize_db(depot: &mut Depot) -> AppResult<Json<MessageResponse>> {
    let settings = get_config_from_depot(depot)?;

    let raw = tokio::fs::read_to_string(&settings.fixture.path)
        .await
        .map_err(|e| {
            AppError::Unexpected(format!(
                "Cannot read fixture {path}: {e}",
                path = settings.fixture.path
            ))
        })?;

    let fixture = Fixture::from_json(&raw)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let summary = initialize_from_fixture(&mut conn, &fixture).await?;

    Ok(Json(MessageResponse {
        message: format!("Database initialized ({summary})"),
    }))
}

/// GET /logs?n= - tail of the flat append-only log file.
#[handler]
async fn tail_logs(req: &mut Request, depot: &mut Depot) -> AppResult<Json<LogTailResponse>> {
    let n = match req.query::<String>("n") {
        None => DEFAULT_LOG_TAIL,
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::validation("n must be a non-negative integer"))?,
    };

    let settings = get_config_from_depot(depot)?;

    // A missing log file reads as empty rather than failing the request.
    let content = tokio::fs::read_to_string(&settings.logging.file)
        .await
        .unwrap_or_default();

    let all: Vec<&str> = content.lines().collect();
    let start = all.len().saturating_sub(n);
    let lines = all[start..].iter().map(ToString::to_string).collect();

    Ok(Json(LogTailResponse { lines }))
}

/// POST /reset-logs - truncates the flat log file.
#[handler]
async fn reset_logs(depot: &mut Depot) -> AppResult<Json<MessageResponse>> {
    let settings = get_config_from_depot(depot)?;

    tokio::fs::File::create(&settings.logging.file)
        .await
        .map_err(|e| AppError::Unexpected(format!("Cannot truncate log file: {e}")))?;

    Ok(Json(MessageResponse {
        message: "Logs reset successfully".to_string(),
    }))
}

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(Router::with_path("reset-project").post(reset_project))
        .push(Router::with_path("initialize-db").post(initialize_db))
        .push(Router::with_path("logs").get(tail_logs))
        .push(Router::with_path("reset-logs").post(reset_logs))
}
