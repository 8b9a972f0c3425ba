use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::schema;

/// A generated outreach email. The company and contact fields are
/// denormalized snapshots taken at write time; they are never synced with
/// later edits to the source records, so historical emails stay
/// interpretable after a contact or company is changed or deleted.
/// `campaign_id` is a stamped value, not a live reference.
#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::emails)]
#[diesel(check_for_backend(Pg))]
pub struct Email {
    pub id: uuid::Uuid,
    pub company: serde_json::Value,
    pub contact: serde_json::Value,
    pub subject: String,
    pub body: String,
    pub ai_model: String,
    pub tokens_sent: i32,
    pub tokens_returned: i32,
    pub generation_time: f64,
    pub campaign_id: uuid::Uuid,
    pub full_prompt: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Email {
    /// Contact email address embedded in the snapshot, if present. The
    /// loader uses this to avoid synthesizing a second email for the same
    /// contact.
    #[must_use]
    pub fn snapshot_contact_email(&self) -> Option<&str> {
        self.contact.get("email").and_then(serde_json::Value::as_str)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::emails)]
pub struct NewEmail<'a> {
    pub id: uuid::Uuid,
    pub company: serde_json::Value,
    pub contact: serde_json::Value,
    pub subject: &'a str,
    pub body: &'a str,
    pub ai_model: &'a str,
    pub tokens_sent: i32,
    pub tokens_returned: i32,
    pub generation_time: f64,
    pub campaign_id: uuid::Uuid,
    pub full_prompt: &'a str,
}

/// Partial update of the scalar fields: `None` fields are left untouched.
/// Snapshots and the stamped campaign id are immutable once written.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = schema::emails)]
pub struct EmailChanges {
    pub subject: Option<String>,
    pub body: Option<String>,
    pub ai_model: Option<String>,
    pub tokens_sent: Option<i32>,
    pub tokens_returned: Option<i32>,
    pub generation_time: Option<f64>,
    pub full_prompt: Option<String>,
}

impl EmailChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subject.is_none()
            && self.body.is_none()
            && self.ai_model.is_none()
            && self.tokens_sent.is_none()
            && self.tokens_returned.is_none()
            && self.generation_time.is_none()
            && self.full_prompt.is_none()
    }
}
