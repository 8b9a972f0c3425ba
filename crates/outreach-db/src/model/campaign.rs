use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::schema;

/// A campaign keyed by an explicit generated identifier rather than any
/// store-assigned document id. The name+owner pair is the loader's upsert
/// key and is deliberately not unique in the store.
#[derive(
    Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Serialize, Deserialize,
)]
#[diesel(table_name = schema::campaigns)]
#[diesel(primary_key(campaign_id))]
#[diesel(check_for_backend(Pg))]
pub struct Campaign {
    pub campaign_id: uuid::Uuid,
    pub campaign_name: String,
    pub campaign_context: String,
    pub campaign_template_title: String,
    pub campaign_template_body: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub user_id: uuid::Uuid,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::campaigns)]
pub struct NewCampaign<'a> {
    pub campaign_id: uuid::Uuid,
    pub campaign_name: &'a str,
    pub campaign_context: &'a str,
    pub campaign_template_title: &'a str,
    pub campaign_template_body: &'a str,
    pub user_id: uuid::Uuid,
}

/// Partial update: `None` fields are left untouched by the store.
/// `updated_at` is stamped by the query layer on every successful update.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = schema::campaigns)]
pub struct CampaignChanges {
    pub campaign_name: Option<String>,
    pub campaign_context: Option<String>,
    pub campaign_template_title: Option<String>,
    pub campaign_template_body: Option<String>,
    pub user_id: Option<uuid::Uuid>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl CampaignChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.campaign_name.is_none()
            && self.campaign_context.is_none()
            && self.campaign_template_title.is_none()
            && self.campaign_template_body.is_none()
            && self.user_id.is_none()
    }
}
