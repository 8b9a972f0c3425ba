//! Fixture bulk loader.
//!
//! Reconciles a JSON fixture into the store in five sequential stages:
//! users, companies, contacts, campaigns, then one synthesized sample
//! email per contact. Each stage is upsert-based (absent -> created,
//! present -> updated; never deleted) so the loader can be re-run safely.
//!
//! Owner references are resolved against in-memory lookup tables built by
//! the earlier stages, not against the store. This is sound only because
//! each user appears at most once per run; see DESIGN.md.
//!
//! Per-item failures are logged and skipped so the rest of the batch can
//! proceed. There is no checkpointing and no rollback: if the run is
//! interrupted, every record saved so far stays committed.

pub mod fixture;

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use outreach_db::db::connection::DbConnection;
use outreach_db::db::query;
use outreach_db::model::campaign::{CampaignChanges, NewCampaign};
use outreach_db::model::company::{CompanyChanges, NewCompany};
use outreach_db::model::contact::{ContactChanges, NewContact};
use outreach_db::model::email::NewEmail;
use outreach_db::model::user::{NewUser, UserChanges};

use crate::auth::password::hash_password;
use crate::error::{ServiceError, ServiceResult};
use fixture::{CampaignFixture, CompanyFixture, ContactFixture, Fixture, UserFixture};

/// Model name stamped on synthesized sample emails.
const SAMPLE_EMAIL_MODEL: &str = "sample-data-loader";

/// Per-group reconciliation counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
}

impl fmt::Display for GroupSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} updated, {} skipped",
            self.created, self.updated, self.skipped
        )
    }
}

/// Summary of one initialize run, reported back to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub users: GroupSummary,
    pub companies: GroupSummary,
    pub contacts: GroupSummary,
    pub campaigns: GroupSummary,
    pub emails: GroupSummary,
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "users: {}; companies: {}; contacts: {}; campaigns: {}; emails: {}",
            self.users, self.companies, self.contacts, self.campaigns, self.emails
        )
    }
}

enum Outcome {
    Created,
    Updated,
}

impl GroupSummary {
    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Created => self.created += 1,
            Outcome::Updated => self.updated += 1,
        }
    }
}

/// ## Summary
/// Reconciles the fixture into the store and synthesizes sample emails.
///
/// ## Errors
/// Returns an error only when a whole stage cannot run (for example the
/// store is unreachable); individual bad records are skipped with a
/// warning instead.
#[tracing::instrument(skip(conn, fixture))]
pub async fn initialize_from_fixture(
    conn: &mut DbConnection<'_>,
    fixture: &Fixture,
) -> ServiceResult<LoadSummary> {
    let mut summary = LoadSummary::default();

    let users_by_email = load_users(conn, &fixture.users, &mut summary.users).await?;
    let companies_by_name = load_companies(
        conn,
        &fixture.companies,
        &users_by_email,
        &mut summary.companies,
    )
    .await?;
    load_contacts(
        conn,
        &fixture.contacts,
        &users_by_email,
        &companies_by_name,
        &mut summary.contacts,
    )
    .await?;
    load_campaigns(
        conn,
        &fixture.campaigns,
        &users_by_email,
        &mut summary.campaigns,
    )
    .await?;
    synthesize_emails(conn, &mut summary.emails).await?;

    tracing::info!(summary = %summary, "Fixture load complete");

    Ok(summary)
}

/// Upserts fixture users keyed by email and returns the email -> id table
/// later stages resolve owners against.
async fn load_users(
    conn: &mut DbConnection<'_>,
    users: &[UserFixture],
    summary: &mut GroupSummary,
) -> ServiceResult<HashMap<String, Uuid>> {
    let mut by_email = HashMap::new();

    for user in users {
        match upsert_user(conn, user).await {
            Ok((id, outcome)) => {
                summary.record(&outcome);
                by_email.insert(user.email.clone(), id);
            }
            Err(e) => {
                tracing::warn!(email = %user.email, error = %e, "Skipping fixture user");
                summary.skipped += 1;
            }
        }
    }

    Ok(by_email)
}

async fn upsert_user(
    conn: &mut DbConnection<'_>,
    user: &UserFixture,
) -> ServiceResult<(Uuid, Outcome)> {
    // The password is hashed on both branches so a re-run refreshes the
    // stored credential.
    let hashed = hash_password(&user.password)?;

    match query::user::find_by_email(conn, &user.email).await? {
        Some(existing) => {
            let changes = UserChanges {
                username: Some(user.username.clone()),
                first_name: Some(user.first_name.clone()),
                last_name: Some(user.last_name.clone()),
                hashed_password: Some(hashed),
                ..UserChanges::default()
            };
            query::user::update(conn, existing.id, &changes)
                .await?
                .ok_or_else(|| {
                    ServiceError::InvariantViolation("User vanished during fixture load")
                })?;
            Ok((existing.id, Outcome::Updated))
        }
        None => {
            let created = query::user::insert(
                conn,
                NewUser {
                    id: Uuid::new_v4(),
                    email: &user.email,
                    username: &user.username,
                    first_name: &user.first_name,
                    last_name: &user.last_name,
                    hashed_password: &hashed,
                },
            )
            .await?;
            Ok((created.id, Outcome::Created))
        }
    }
}

/// Upserts fixture companies keyed by name and returns the name -> id
/// table the contact stage resolves against.
async fn load_companies(
    conn: &mut DbConnection<'_>,
    companies: &[CompanyFixture],
    users_by_email: &HashMap<String, Uuid>,
    summary: &mut GroupSummary,
) -> ServiceResult<HashMap<String, Uuid>> {
    let mut by_name = HashMap::new();

    for company in companies {
        let Some(&owner_id) = users_by_email.get(&company.user_email) else {
            tracing::warn!(
                company = %company.name,
                user_email = %company.user_email,
                "Skipping fixture company: owner not found in this run's users"
            );
            summary.skipped += 1;
            continue;
        };

        match upsert_company(conn, company, owner_id).await {
            Ok((id, outcome)) => {
                summary.record(&outcome);
                by_name.insert(company.name.clone(), id);
            }
            Err(e) => {
                tracing::warn!(company = %company.name, error = %e, "Skipping fixture company");
                summary.skipped += 1;
            }
        }
    }

    Ok(by_name)
}

async fn upsert_company(
    conn: &mut DbConnection<'_>,
    company: &CompanyFixture,
    owner_id: Uuid,
) -> ServiceResult<(Uuid, Outcome)> {
    match query::company::find_by_name(conn, &company.name).await? {
        Some(existing) => {
            let changes = CompanyChanges {
                website: company.website.clone(),
                primary_industry: company.primary_industry.clone(),
                primary_sub_industry: company.primary_sub_industry.clone(),
                zoom_id: Some(company.zoom_id.clone()),
                user_id: Some(owner_id),
                ..CompanyChanges::default()
            };
            query::company::update(conn, existing.id, &changes)
                .await?
                .ok_or_else(|| {
                    ServiceError::InvariantViolation("Company vanished during fixture load")
                })?;
            Ok((existing.id, Outcome::Updated))
        }
        None => {
            let created = query::company::insert(
                conn,
                NewCompany {
                    id: Uuid::new_v4(),
                    name: &company.name,
                    website: company.website.as_deref(),
                    primary_industry: company.primary_industry.as_deref(),
                    primary_sub_industry: company.primary_sub_industry.as_deref(),
                    zoom_id: &company.zoom_id,
                    user_id: owner_id,
                },
            )
            .await?;
            Ok((created.id, Outcome::Created))
        }
    }
}

/// Upserts fixture contacts keyed by email. Contacts whose owner or
/// company is missing from the lookup tables are skipped, not failed.
async fn load_contacts(
    conn: &mut DbConnection<'_>,
    contacts: &[ContactFixture],
    users_by_email: &HashMap<String, Uuid>,
    companies_by_name: &HashMap<String, Uuid>,
    summary: &mut GroupSummary,
) -> ServiceResult<()> {
    for contact in contacts {
        let Some(&owner_id) = users_by_email.get(&contact.user_email) else {
            tracing::warn!(
                contact = %contact.email,
                user_email = %contact.user_email,
                "Skipping fixture contact: owner not found"
            );
            summary.skipped += 1;
            continue;
        };

        let Some(&company_id) = companies_by_name.get(&contact.company_name) else {
            tracing::warn!(
                contact = %contact.email,
                company = %contact.company_name,
                "Skipping fixture contact: company not found"
            );
            summary.skipped += 1;
            continue;
        };

        match upsert_contact(conn, contact, owner_id, company_id).await {
            Ok(outcome) => summary.record(&outcome),
            Err(e) => {
                tracing::warn!(contact = %contact.email, error = %e, "Skipping fixture contact");
                summary.skipped += 1;
            }
        }
    }

    Ok(())
}

async fn upsert_contact(
    conn: &mut DbConnection<'_>,
    contact: &ContactFixture,
    owner_id: Uuid,
    company_id: Uuid,
) -> ServiceResult<Outcome> {
    match query::contact::find_by_email(conn, &contact.email).await? {
        Some(existing) => {
            let changes = ContactChanges {
                first_name: Some(contact.first_name.clone()),
                last_name: Some(contact.last_name.clone()),
                title: contact.title.clone(),
                zoom_id: Some(contact.zoom_id.clone()),
                user_id: Some(owner_id),
                company_id: Some(company_id),
                ..ContactChanges::default()
            };
            query::contact::update(conn, existing.id, &changes)
                .await?
                .ok_or_else(|| {
                    ServiceError::InvariantViolation("Contact vanished during fixture load")
                })?;
            Ok(Outcome::Updated)
        }
        None => {
            query::contact::insert(
                conn,
                NewContact {
                    id: Uuid::new_v4(),
                    first_name: &contact.first_name,
                    last_name: &contact.last_name,
                    email: &contact.email,
                    title: contact.title.as_deref(),
                    zoom_id: &contact.zoom_id,
                    user_id: owner_id,
                    company_id,
                },
            )
            .await?;
            Ok(Outcome::Created)
        }
    }
}

/// Upserts fixture campaigns, matched by name plus owning user.
async fn load_campaigns(
    conn: &mut DbConnection<'_>,
    campaigns: &[CampaignFixture],
    users_by_email: &HashMap<String, Uuid>,
    summary: &mut GroupSummary,
) -> ServiceResult<()> {
    for campaign in campaigns {
        let Some(&owner_id) = users_by_email.get(&campaign.user_email) else {
            tracing::warn!(
                campaign = %campaign.campaign_name,
                user_email = %campaign.user_email,
                "Skipping fixture campaign: owner not found"
            );
            summary.skipped += 1;
            continue;
        };

        match upsert_campaign(conn, campaign, owner_id).await {
            Ok(outcome) => summary.record(&outcome),
            Err(e) => {
                tracing::warn!(
                    campaign = %campaign.campaign_name,
                    error = %e,
                    "Skipping fixture campaign"
                );
                summary.skipped += 1;
            }
        }
    }

    Ok(())
}

async fn upsert_campaign(
    conn: &mut DbConnection<'_>,
    campaign: &CampaignFixture,
    owner_id: Uuid,
) -> ServiceResult<Outcome> {
    match query::campaign::find_by_name_and_user(conn, &campaign.campaign_name, owner_id).await? {
        Some(existing) => {
            let changes = CampaignChanges {
                campaign_context: Some(campaign.campaign_context.clone()),
                campaign_template_title: Some(campaign.campaign_template_title.clone()),
                campaign_template_body: Some(campaign.campaign_template_body.clone()),
                ..CampaignChanges::default()
            };
            query::campaign::update(conn, existing.campaign_id, &changes)
                .await?
                .ok_or_else(|| {
                    ServiceError::InvariantViolation("Campaign vanished during fixture load")
                })?;
            Ok(Outcome::Updated)
        }
        None => {
            query::campaign::insert(
                conn,
                NewCampaign {
                    campaign_id: Uuid::new_v4(),
                    campaign_name: &campaign.campaign_name,
                    campaign_context: &campaign.campaign_context,
                    campaign_template_title: &campaign.campaign_template_title,
                    campaign_template_body: &campaign.campaign_template_body,
                    user_id: owner_id,
                },
            )
            .await?;
            Ok(Outcome::Created)
        }
    }
}

/// Synthesizes one sample email per contact currently in the store.
///
/// Every synthesized email is attached to the first campaign found in the
/// store regardless of which user owns the contact. That is a sample-data
/// shortcut carried over from the original fixture generator, kept for
/// fixture parity; do not reuse it as a campaign-assignment rule.
async fn synthesize_emails(
    conn: &mut DbConnection<'_>,
    summary: &mut GroupSummary,
) -> ServiceResult<()> {
    let Some(campaign) = query::campaign::first(conn).await? else {
        tracing::warn!("No campaign in store, skipping sample email synthesis");
        return Ok(());
    };

    // Snapshot scan once up front; contacts that already have a matching
    // embedded email are skipped so re-runs stay idempotent.
    let already_emailed: HashSet<String> = query::email::list_all(conn)
        .await?
        .iter()
        .filter_map(|email| email.snapshot_contact_email().map(str::to_owned))
        .collect();

    for contact in query::contact::list_all(conn).await? {
        if already_emailed.contains(&contact.email) {
            summary.skipped += 1;
            continue;
        }

        let Some(company) = query::company::find(conn, contact.company_id).await? else {
            tracing::warn!(
                contact = %contact.email,
                company_id = %contact.company_id,
                "Skipping sample email: contact's company not in store"
            );
            summary.skipped += 1;
            continue;
        };

        let new_email = NewEmail {
            id: Uuid::new_v4(),
            company: serde_json::json!({
                "name": company.name,
                "zoom_id": company.zoom_id,
            }),
            contact: serde_json::json!({
                "first_name": contact.first_name,
                "last_name": contact.last_name,
                "email": contact.email,
            }),
            subject: &campaign.campaign_template_title,
            body: &campaign.campaign_template_body,
            ai_model: SAMPLE_EMAIL_MODEL,
            tokens_sent: 0,
            tokens_returned: 0,
            generation_time: 0.0,
            campaign_id: campaign.campaign_id,
            full_prompt: "",
        };

        match query::email::insert(conn, new_email).await {
            Ok(_) => summary.created += 1,
            Err(e) => {
                tracing::warn!(contact = %contact.email, error = %e, "Skipping sample email");
                summary.skipped += 1;
            }
        }
    }

    Ok(())
}
