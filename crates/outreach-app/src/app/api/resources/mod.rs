//! Per-entity resource handlers.
//!
//! Every entity exposes the same surface: `list(skip, limit)`, `create`,
//! `get`, `update` (partial), `delete`. Handlers validate transfer
//! objects, resolve foreign-key strings against the store, and map store
//! results to wire responses; they never cascade deletes.

pub mod campaigns;
pub mod companies;
pub mod contacts;
pub mod emails;
pub mod users;

use salvo::Request;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

const DEFAULT_SKIP: i64 = 0;
const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

/// Response payload for delete operations and admin messages.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Offset/limit page window. Ordering across pages is store-dependent and
/// not a guarantee of the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Page {
    /// ## Summary
    /// Reads `skip` and `limit` from the query string, applying the
    /// defaults 0 and 10.
    ///
    /// ## Errors
    /// Returns a validation error if either value is not an integer, if
    /// `skip` is negative, or if `limit` is outside 1..=100.
    pub fn from_request(req: &Request) -> AppResult<Self> {
        let skip = query_i64(req, "skip", DEFAULT_SKIP)?;
        let limit = query_i64(req, "limit", DEFAULT_LIMIT)?;

        if skip < 0 {
            return Err(AppError::validation("skip must be non-negative"));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(AppError::validation(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            )));
        }

        Ok(Self { skip, limit })
    }
}

fn query_i64(req: &Request, name: &str, default: i64) -> AppResult<i64> {
    match req.query::<String>(name) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::validation(format!("{name} must be an integer"))),
    }
}

/// Parses a path id parameter. A missing parameter is a routing bug; a
/// malformed id cannot name any record and reads as absent.
fn path_id(req: &Request, name: &str, entity: &str) -> AppResult<Uuid> {
    let raw = req
        .param::<String>(name)
        .ok_or_else(|| AppError::validation(format!("{name} is required")))?;

    Uuid::parse_str(&raw).map_err(|_| AppError::not_found(format!("{entity} not found")))
}

fn require_non_empty(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(())
}

/// Resolves a foreign-key string supplied in a Create payload. Rejection
/// here is a validation failure, not a 404: the target resource is the
/// one being created.
fn parse_reference(raw: &str, field: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::validation(format!("{field} is not a valid id")))
}
