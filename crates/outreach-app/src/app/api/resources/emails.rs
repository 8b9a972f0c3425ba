use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use outreach_db::db::query;
use outreach_db::model::email::{Email, EmailChanges, NewEmail};

use super::{MessageResponse, Page, parse_reference, path_id, require_non_empty};
use crate::db_handler::get_db_from_depot;
use crate::error::{AppError, AppResult};

/// Company data embedded into an email at write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySnapshot {
    pub name: String,
    pub zoom_id: String,
}

/// Contact data embedded into an email at write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSnapshot {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailCreate {
    pub company: CompanySnapshot,
    pub contact: ContactSnapshot,
    pub subject: String,
    pub body: String,
    pub ai_model: String,
    pub tokens_sent: i32,
    pub tokens_returned: i32,
    pub generation_time: f64,
    /// Stamped campaign id. A soft reference: stored as supplied, never
    /// checked against the campaigns collection.
    pub campaign_id: String,
    pub full_prompt: String,
}

impl EmailCreate {
    fn validate(&self) -> AppResult<()> {
        require_non_empty(&self.subject, "subject")?;
        require_non_empty(&self.body, "body")?;
        require_non_empty(&self.ai_model, "ai_model")?;
        validate_counters(
            Some(self.tokens_sent),
            Some(self.tokens_returned),
            Some(self.generation_time),
        )
    }
}

/// Partial update of the scalar fields: absent fields are left untouched.
/// Snapshots and the stamped campaign id are immutable.
#[derive(Debug, Default, Deserialize)]
pub struct EmailUpdate {
    pub subject: Option<String>,
    pub body: Option<String>,
    pub ai_model: Option<String>,
    pub tokens_sent: Option<i32>,
    pub tokens_returned: Option<i32>,
    pub generation_time: Option<f64>,
    pub full_prompt: Option<String>,
}

impl EmailUpdate {
    fn validate(&self) -> AppResult<()> {
        validate_counters(self.tokens_sent, self.tokens_returned, self.generation_time)
    }

    fn into_changes(self) -> EmailChanges {
        EmailChanges {
            subject: self.subject,
            body: self.body,
            ai_model: self.ai_model,
            tokens_sent: self.tokens_sent,
            tokens_returned: self.tokens_returned,
            generation_time: self.generation_time,
            full_prompt: self.full_prompt,
        }
    }
}

fn validate_counters(
    tokens_sent: Option<i32>,
    tokens_returned: Option<i32>,
    generation_time: Option<f64>,
) -> AppResult<()> {
    if tokens_sent.is_some_and(|n| n < 0) {
        return Err(AppError::validation("tokens_sent must be non-negative"));
    }
    if tokens_returned.is_some_and(|n| n < 0) {
        return Err(AppError::validation("tokens_returned must be non-negative"));
    }
    if generation_time.is_some_and(|t| !(t >= 0.0)) {
        return Err(AppError::validation("generation_time must be non-negative"));
    }
    Ok(())
}

/// Wire projection of a stored email. Unlike the other resources, the
/// embedded company/contact snapshots are echoed verbatim instead of
/// being flattened to ids.
#[derive(Debug, Serialize)]
pub struct EmailResponse {
    pub email_id: String,
    pub company: serde_json::Value,
    pub contact: serde_json::Value,
    pub subject: String,
    pub body: String,
    pub ai_model: String,
    pub tokens_sent: i32,
    pub tokens_returned: i32,
    pub generation_time: f64,
    pub campaign_id: String,
    pub full_prompt: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Email> for EmailResponse {
    fn from(email: Email) -> Self {
        Self {
            email_id: email.id.to_string(),
            company: email.company,
            contact: email.contact,
            subject: email.subject,
            body: email.body,
            ai_model: email.ai_model,
            tokens_sent: email.tokens_sent,
            tokens_returned: email.tokens_returned,
            generation_time: email.generation_time,
            campaign_id: email.campaign_id.to_string(),
            full_prompt: email.full_prompt,
            created_at: email.created_at,
        }
    }
}

#[handler]
async fn list_emails(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Vec<EmailResponse>>> {
    let page = Page::from_request(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let emails = query::email::list(&mut conn, page.skip, page.limit).await?;

    Ok(Json(emails.into_iter().map(EmailResponse::from).collect()))
}

#[handler]
async fn create_email(req: &mut Request, depot: &mut Depot) -> AppResult<Json<EmailResponse>> {
    let payload: EmailCreate = req
        .parse_json()
        .await
        .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;
    payload.validate()?;

    let campaign_id = parse_reference(&payload.campaign_id, "campaign_id")?;

    let company = serde_json::to_value(&payload.company)
        .map_err(|e| AppError::Unexpected(format!("Failed to encode company snapshot: {e}")))?;
    let contact = serde_json::to_value(&payload.contact)
        .map_err(|e| AppError::Unexpected(format!("Failed to encode contact snapshot: {e}")))?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let email = query::email::insert(
        &mut conn,
        NewEmail {
            id: Uuid::new_v4(),
            company,
            contact,
            subject: &payload.subject,
            body: &payload.body,
            ai_model: &payload.ai_model,
            tokens_sent: payload.tokens_sent,
            tokens_returned: payload.tokens_returned,
            generation_time: payload.generation_time,
            campaign_id,
            full_prompt: &payload.full_prompt,
        },
    )
    .await?;

    tracing::info!(email_id = %email.id, subject = %email.subject, "Email created");

    Ok(Json(email.into()))
}

#[handler]
async fn get_email(req: &mut Request, depot: &mut Depot) -> AppResult<Json<EmailResponse>> {
    let id = path_id(req, "email_id", "Email")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let email = query::email::find(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Email not found"))?;

    Ok(Json(email.into()))
}

#[handler]
async fn update_email(req: &mut Request, depot: &mut Depot) -> AppResult<Json<EmailResponse>> {
    let id = path_id(req, "email_id", "Email")?;
    let payload: EmailUpdate = req
        .parse_json()
        .await
        .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;
    payload.validate()?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let changes = payload.into_changes();

    let email = if changes.is_empty() {
        query::email::find(&mut conn, id).await?
    } else {
        query::email::update(&mut conn, id, &changes).await?
    }
    .ok_or_else(|| AppError::not_found("Email not found"))?;

    Ok(Json(email.into()))
}

#[handler]
async fn delete_email(req: &mut Request, depot: &mut Depot) -> AppResult<Json<MessageResponse>> {
    let id = path_id(req, "email_id", "Email")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    if !query::email::delete(&mut conn, id).await? {
        return Err(AppError::not_found("Email not found"));
    }

    Ok(Json(MessageResponse {
        message: "Email deleted successfully".to_string(),
    }))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("emails")
        .get(list_emails)
        .post(create_email)
        .push(
            Router::with_path("{email_id}")
                .get(get_email)
                .put(update_email)
                .delete(delete_email),
        )
}
