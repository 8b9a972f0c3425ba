use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::schema;

#[derive(
    Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Serialize, Deserialize,
)]
#[diesel(table_name = schema::companies)]
#[diesel(check_for_backend(Pg))]
pub struct Company {
    pub id: uuid::Uuid,
    pub name: String,
    pub website: Option<String>,
    pub primary_industry: Option<String>,
    pub primary_sub_industry: Option<String>,
    pub zoom_id: String,
    /// Owning user. Plain column, not a foreign key: resolved by the
    /// handler at create time, never cascaded on delete.
    pub user_id: uuid::Uuid,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::companies)]
pub struct NewCompany<'a> {
    pub id: uuid::Uuid,
    pub name: &'a str,
    pub website: Option<&'a str>,
    pub primary_industry: Option<&'a str>,
    pub primary_sub_industry: Option<&'a str>,
    pub zoom_id: &'a str,
    pub user_id: uuid::Uuid,
}

/// Partial update: `None` fields are left untouched by the store.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = schema::companies)]
pub struct CompanyChanges {
    pub name: Option<String>,
    pub website: Option<String>,
    pub primary_industry: Option<String>,
    pub primary_sub_industry: Option<String>,
    pub zoom_id: Option<String>,
    pub user_id: Option<uuid::Uuid>,
}

impl CompanyChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.website.is_none()
            && self.primary_industry.is_none()
            && self.primary_sub_industry.is_none()
            && self.zoom_id.is_none()
            && self.user_id.is_none()
    }
}
