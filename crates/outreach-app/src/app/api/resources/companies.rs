use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use outreach_db::db::query;
use outreach_db::model::company::{Company, CompanyChanges, NewCompany};

use super::{MessageResponse, Page, parse_reference, path_id, require_non_empty};
use crate::db_handler::get_db_from_depot;
use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct CompanyCreate {
    pub name: String,
    pub website: Option<String>,
    pub primary_industry: Option<String>,
    pub primary_sub_industry: Option<String>,
    pub zoom_id: String,
    /// Owning user, as a string id resolved against the store.
    pub user_id: String,
}

impl CompanyCreate {
    fn validate(&self) -> AppResult<()> {
        require_non_empty(&self.name, "name")?;
        require_non_empty(&self.zoom_id, "zoom_id")
    }
}

/// Partial update: absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub website: Option<String>,
    pub primary_industry: Option<String>,
    pub primary_sub_industry: Option<String>,
    pub zoom_id: Option<String>,
}

impl CompanyUpdate {
    fn into_changes(self) -> CompanyChanges {
        CompanyChanges {
            name: self.name,
            website: self.website,
            primary_industry: self.primary_industry,
            primary_sub_industry: self.primary_sub_industry,
            zoom_id: self.zoom_id,
            ..CompanyChanges::default()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub company_id: String,
    pub name: String,
    pub website: Option<String>,
    pub primary_industry: Option<String>,
    pub primary_sub_industry: Option<String>,
    pub zoom_id: String,
    pub user_id: String,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            company_id: company.id.to_string(),
            name: company.name,
            website: company.website,
            primary_industry: company.primary_industry,
            primary_sub_industry: company.primary_sub_industry,
            zoom_id: company.zoom_id,
            user_id: company.user_id.to_string(),
        }
    }
}

#[handler]
async fn list_companies(
    req: &mut Request,
    depot: &mut Depot,
) -> AppResult<Json<Vec<CompanyResponse>>> {
    let page = Page::from_request(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let companies = query::company::list(&mut conn, page.skip, page.limit).await?;

    Ok(Json(
        companies.into_iter().map(CompanyResponse::from).collect(),
    ))
}

#[handler]
async fn create_company(req: &mut Request, depot: &mut Depot) -> AppResult<Json<CompanyResponse>> {
    let payload: CompanyCreate = req
        .parse_json()
        .await
        .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;
    payload.validate()?;

    let owner_id = parse_reference(&payload.user_id, "user_id")?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    if query::user::find(&mut conn, owner_id).await?.is_none() {
        return Err(AppError::validation("user_id does not resolve to a user"));
    }

    let company = query::company::insert(
        &mut conn,
        NewCompany {
            id: Uuid::new_v4(),
            name: &payload.name,
            website: payload.website.as_deref(),
            primary_industry: payload.primary_industry.as_deref(),
            primary_sub_industry: payload.primary_sub_industry.as_deref(),
            zoom_id: &payload.zoom_id,
            user_id: owner_id,
        },
    )
    .await?;

    tracing::info!(company_id = %company.id, name = %company.name, "Company created");

    Ok(Json(company.into()))
}

#[handler]
async fn get_company(req: &mut Request, depot: &mut Depot) -> AppResult<Json<CompanyResponse>> {
    let id = path_id(req, "company_id", "Company")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let company = query::company::find(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Company not found"))?;

    Ok(Json(company.into()))
}

#[handler]
async fn update_company(req: &mut Request, depot: &mut Depot) -> AppResult<Json<CompanyResponse>> {
    let id = path_id(req, "company_id", "Company")?;
    let payload: CompanyUpdate = req
        .parse_json()
        .await
        .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let changes = payload.into_changes();

    let company = if changes.is_empty() {
        query::company::find(&mut conn, id).await?
    } else {
        query::company::update(&mut conn, id, &changes).await?
    }
    .ok_or_else(|| AppError::not_found("Company not found"))?;

    Ok(Json(company.into()))
}

#[handler]
async fn delete_company(req: &mut Request, depot: &mut Depot) -> AppResult<Json<MessageResponse>> {
    let id = path_id(req, "company_id", "Company")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    // Contacts referencing this company are deliberately left in place.
    if !query::company::delete(&mut conn, id).await? {
        return Err(AppError::not_found("Company not found"));
    }

    Ok(Json(MessageResponse {
        message: "Company deleted successfully".to_string(),
    }))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("companies")
        .get(list_companies)
        .post(create_company)
        .push(
            Router::with_path("{company_id}")
                .get(get_company)
                .put(update_company)
                .delete(delete_company),
        )
}
