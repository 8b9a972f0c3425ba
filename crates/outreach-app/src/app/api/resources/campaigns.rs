use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use outreach_db::db::query;
use outreach_db::model::campaign::{Campaign, CampaignChanges, NewCampaign};

use super::{MessageResponse, Page, parse_reference, path_id, require_non_empty};
use crate::db_handler::get_db_from_depot;
use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct CampaignCreate {
    pub campaign_name: String,
    pub campaign_context: String,
    pub campaign_template_title: String,
    pub campaign_template_body: String,
    /// Owning user, as a string id resolved against the store.
    pub user_id: String,
}

impl CampaignCreate {
    fn validate(&self) -> AppResult<()> {
        require_non_empty(&self.campaign_name, "campaign_name")?;
        require_non_empty(&self.campaign_context, "campaign_context")?;
        require_non_empty(&self.campaign_template_title, "campaign_template_title")?;
        require_non_empty(&self.campaign_template_body, "campaign_template_body")
    }
}

/// Partial update: absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct CampaignUpdate {
    pub campaign_name: Option<String>,
    pub campaign_context: Option<String>,
    pub campaign_template_title: Option<String>,
    pub campaign_template_body: Option<String>,
}

impl CampaignUpdate {
    fn into_changes(self) -> CampaignChanges {
        CampaignChanges {
            campaign_name: self.campaign_name,
            campaign_context: self.campaign_context,
            campaign_template_title: self.campaign_template_title,
            campaign_template_body: self.campaign_template_body,
            ..CampaignChanges::default()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CampaignResponse {
    pub campaign_id: String,
    pub campaign_name: String,
    pub campaign_context: String,
    pub campaign_template_title: String,
    pub campaign_template_body: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub user_id: String,
}

impl From<Campaign> for CampaignResponse {
    fn from(campaign: Campaign) -> Self {
        Self {
            campaign_id: campaign.campaign_id.to_string(),
            campaign_name: campaign.campaign_name,
            campaign_context: campaign.campaign_context,
            campaign_template_title: campaign.campaign_template_title,
            campaign_template_body: campaign.campaign_template_body,
            created_at: campaign.created_at,
            updated_at: campaign.updated_at,
            user_id: campaign.user_id.to_string(),
        }
    }
}

#[handler]
async fn list_campaigns(
    req: &mut Request,
    depot: &mut Depot,
) -> AppResult<Json<Vec<CampaignResponse>>> {
    let page = Page::from_request(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let campaigns = query::campaign::list(&mut conn, page.skip, page.limit).await?;

    Ok(Json(
        campaigns.into_iter().map(CampaignResponse::from).collect(),
    ))
}

#[handler]
async fn create_campaign(
    req: &mut Request,
    depot: &mut Depot,
) -> AppResult<Json<CampaignResponse>> {
    let payload: CampaignCreate = req
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

    let campaign = query::campaign::insert(
        &mut conn,
        NewCampaign {
            campaign_id: Uuid::new_v4(),
            campaign_name: &payload.campaign_name,
            campaign_context: &payload.campaign_context,
            campaign_template_title: &payload.campaign_template_title,
            campaign_template_body: &payload.campaign_template_body,
            user_id: owner_id,
        },
    )
    .await?;

    tracing::info!(
        campaign_id = %campaign.campaign_id,
        name = %campaign.campaign_name,
        "Campaign created"
    );

    Ok(Json(campaign.into()))
}

#[handler]
async fn get_campaign(req: &mut Request, depot: &mut Depot) -> AppResult<Json<CampaignResponse>> {
    let id = path_id(req, "campaign_id", "Campaign")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let campaign = query::campaign::find(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Campaign not found"))?;

    Ok(Json(campaign.into()))
}

#[handler]
async fn update_campaign(
    req: &mut Request,
    depot: &mut Depot,
) -> AppResult<Json<CampaignResponse>> {
    let id = path_id(req, "campaign_id", "Campaign")?;
    let payload: CampaignUpdate = req
        .parse_json()
        .await
        .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let changes = payload.into_changes();

    let campaign = if changes.is_empty() {
        query::campaign::find(&mut conn, id).await?
    } else {
        query::campaign::update(&mut conn, id, &changes).await?
    }
    .ok_or_else(|| AppError::not_found("Campaign not found"))?;

    Ok(Json(campaign.into()))
}

#[handler]
async fn delete_campaign(req: &mut Request, depot: &mut Depot) -> AppResult<Json<MessageResponse>> {
    let id = path_id(req, "campaign_id", "Campaign")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    // Emails stamped with this campaign keep their stamp; no cleanup.
    if !query::campaign::delete(&mut conn, id).await? {
        return Err(AppError::not_found("Campaign not found"));
    }

    Ok(Json(MessageResponse {
        message: "Campaign deleted successfully".to_string(),
    }))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("campaigns")
        .get(list_campaigns)
        .post(create_campaign)
        .push(
            Router::with_path("{campaign_id}")
                .get(get_campaign)
                .put(update_campaign)
                .delete(delete_campaign),
        )
}
