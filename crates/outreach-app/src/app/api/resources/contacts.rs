use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use outreach_db::db::query;
use outreach_db::model::contact::{Contact, ContactChanges, NewContact};

use super::{MessageResponse, Page, parse_reference, path_id, require_non_empty};
use crate::db_handler::get_db_from_depot;
use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ContactCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub title: Option<String>,
    pub zoom_id: String,
    /// Owning user, as a string id resolved against the store.
    pub user_id: String,
    /// Owning company, as a string id resolved against the store.
    pub company_id: String,
}

impl ContactCreate {
    fn validate(&self) -> AppResult<()> {
        require_non_empty(&self.first_name, "first_name")?;
        require_non_empty(&self.last_name, "last_name")?;
        require_non_empty(&self.email, "email")?;
        require_non_empty(&self.zoom_id, "zoom_id")
    }
}

/// Partial update: absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct ContactUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
    pub zoom_id: Option<String>,
}

impl ContactUpdate {
    fn into_changes(self) -> ContactChanges {
        ContactChanges {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            title: self.title,
            zoom_id: self.zoom_id,
            ..ContactChanges::default()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub contact_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub title: Option<String>,
    pub zoom_id: String,
    pub user_id: String,
    pub company_id: String,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            contact_id: contact.id.to_string(),
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            title: contact.title,
            zoom_id: contact.zoom_id,
            user_id: contact.user_id.to_string(),
            company_id: contact.company_id.to_string(),
        }
    }
}

#[handler]
async fn list_contacts(
    req: &mut Request,
    depot: &mut Depot,
) -> AppResult<Json<Vec<ContactResponse>>> {
    let page = Page::from_request(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let contacts = query::contact::list(&mut conn, page.skip, page.limit).await?;

    Ok(Json(
        contacts.into_iter().map(ContactResponse::from).collect(),
    ))
}

#[handler]
async fn create_contact(req: &mut Request, depot: &mut Depot) -> AppResult<Json<ContactResponse>> {
    let payload: ContactCreate = req
        .parse_json()
        .await
        .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;
    payload.validate()?;

    let owner_id = parse_reference(&payload.user_id, "user_id")?;
    let company_id = parse_reference(&payload.company_id, "company_id")?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    if query::user::find(&mut conn, owner_id).await?.is_none() {
        return Err(AppError::validation("user_id does not resolve to a user"));
    }
    if query::company::find(&mut conn, company_id).await?.is_none() {
        return Err(AppError::validation(
            "company_id does not resolve to a company",
        ));
    }

    let contact = query::contact::insert(
        &mut conn,
        NewContact {
            id: Uuid::new_v4(),
            first_name: &payload.first_name,
            last_name: &payload.last_name,
            email: &payload.email,
            title: payload.title.as_deref(),
            zoom_id: &payload.zoom_id,
            user_id: owner_id,
            company_id,
        },
    )
    .await?;

    tracing::info!(contact_id = %contact.id, email = %contact.email, "Contact created");

    Ok(Json(contact.into()))
}

#[handler]
async fn get_contact(req: &mut Request, depot: &mut Depot) -> AppResult<Json<ContactResponse>> {
    let id = path_id(req, "contact_id", "Contact")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let contact = query::contact::find(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Contact not found"))?;

    Ok(Json(contact.into()))
}

#[handler]
async fn update_contact(req: &mut Request, depot: &mut Depot) -> AppResult<Json<ContactResponse>> {
    let id = path_id(req, "contact_id", "Contact")?;
    let payload: ContactUpdate = req
        .parse_json()
        .await
        .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let changes = payload.into_changes();

    let contact = if changes.is_empty() {
        query::contact::find(&mut conn, id).await?
    } else {
        query::contact::update(&mut conn, id, &changes).await?
    }
    .ok_or_else(|| AppError::not_found("Contact not found"))?;

    Ok(Json(contact.into()))
}

#[handler]
async fn delete_contact(req: &mut Request, depot: &mut Depot) -> AppResult<Json<MessageResponse>> {
    let id = path_id(req, "contact_id", "Contact")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    if !query::contact::delete(&mut conn, id).await? {
        return Err(AppError::not_found("Contact not found"));
    }

    Ok(Json(MessageResponse {
        message: "Contact deleted successfully".to_string(),
    }))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("contacts")
        .get(list_contacts)
        .post(create_contact)
        .push(
            Router::with_path("{contact_id}")
                .get(get_contact)
                .put(update_contact)
                .delete(delete_contact),
        )
}
