use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::schema;

#[derive(
    Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Serialize, Deserialize,
)]
#[diesel(table_name = schema::contacts)]
#[diesel(check_for_backend(Pg))]
pub struct Contact {
    pub id: uuid::Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub title: Option<String>,
    pub zoom_id: String,
    pub user_id: uuid::Uuid,
    pub company_id: uuid::Uuid,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::contacts)]
pub struct NewContact<'a> {
    pub id: uuid::Uuid,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub title: Option<&'a str>,
    pub zoom_id: &'a str,
    pub user_id: uuid::Uuid,
    pub company_id: uuid::Uuid,
}

/// Partial update: `None` fields are left untouched by the store.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = schema::contacts)]
pub struct ContactChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
    pub zoom_id: Option<String>,
    pub user_id: Option<uuid::Uuid>,
    pub company_id: Option<uuid::Uuid>,
}

impl ContactChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.title.is_none()
            && self.zoom_id.is_none()
            && self.user_id.is_none()
            && self.company_id.is_none()
    }
}
