//! Shapes of the JSON sample-data fixture consumed by the initialize
//! operation.
//!
//! `companies` is deliberately a required key: a fixture without it fails
//! the whole initialize operation before any stage runs. The other groups
//! default to empty and are tolerated when absent.

use serde::Deserialize;

use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub users: Vec<UserFixture>,
    pub companies: Vec<CompanyFixture>,
    #[serde(default)]
    pub contacts: Vec<ContactFixture>,
    #[serde(default)]
    pub campaigns: Vec<CampaignFixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserFixture {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompanyFixture {
    pub name: String,
    pub website: Option<String>,
    pub primary_industry: Option<String>,
    pub primary_sub_industry: Option<String>,
    pub zoom_id: String,
    /// Email of the owning user; resolved against the loader's in-memory
    /// user table, not the store.
    pub user_email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactFixture {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub title: Option<String>,
    pub zoom_id: String,
    pub user_email: String,
    /// Name of the owning company; resolved against the loader's
    /// in-memory company table.
    pub company_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CampaignFixture {
    pub campaign_name: String,
    pub campaign_context: String,
    pub campaign_template_title: String,
    pub campaign_template_body: String,
    pub user_email: String,
}

impl Fixture {
    /// ## Summary
    /// Parses a fixture document from raw JSON.
    ///
    /// ## Errors
    /// Returns a fixture error if the document is malformed or the
    /// required `companies` key is missing.
    pub fn from_json(raw: &str) -> ServiceResult<Self> {
        serde_json::from_str(raw).map_err(|e| ServiceError::FixtureError(e.to_string()))
    }
}
