use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::schema::campaigns;
use crate::error::DbResult;
use crate::model::campaign::{Campaign, CampaignChanges, NewCampaign};

/// Returns one page of campaigns in store order.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn list(conn: &mut DbConnection<'_>, skip: i64, limit: i64) -> DbResult<Vec<Campaign>> {
    Ok(campaigns::table
        .offset(skip)
        .limit(limit)
        .select(Campaign::as_select())
        .load(conn)
        .await?)
}

/// ## Errors
/// Returns an error if the query fails.
pub async fn find(conn: &mut DbConnection<'_>, campaign_id: Uuid) -> DbResult<Option<Campaign>> {
    Ok(campaigns::table
        .find(campaign_id)
        .select(Campaign::as_select())
        .first(conn)
        .await
        .optional()?)
}

/// Loader upsert key: campaigns are matched by name and owning user. The
/// pair is not unique in the store; the first match wins.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn find_by_name_and_user(
    conn: &mut DbConnection<'_>,
    name: &str,
    user_id: Uuid,
) -> DbResult<Option<Campaign>> {
    Ok(campaigns::table
        .filter(campaigns::campaign_name.eq(name))
        .filter(campaigns::user_id.eq(user_id))
        .select(Campaign::as_select())
        .first(conn)
        .await
        .optional()?)
}

/// First campaign in store order, if any. The loader's email synthesis
/// attaches every sample email to this campaign.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn first(conn: &mut DbConnection<'_>) -> DbResult<Option<Campaign>> {
    Ok(campaigns::table
        .select(Campaign::as_select())
        .first(conn)
        .await
        .optional()?)
}

/// ## Errors
/// Returns an error if the insert fails.
pub async fn insert(
    conn: &mut DbConnection<'_>,
    new_campaign: NewCampaign<'_>,
) -> DbResult<Campaign> {
    Ok(diesel::insert_into(campaigns::table)
        .values(&new_campaign)
        .returning(Campaign::as_select())
        .get_result(conn)
        .await?)
}

/// Applies only the fields present in `changes` and stamps `updated_at`.
/// Returns `None` if no campaign has the given id.
///
/// ## Errors
/// Returns an error if the update fails.
pub async fn update(
    conn: &mut DbConnection<'_>,
    campaign_id: Uuid,
    changes: &CampaignChanges,
) -> DbResult<Option<Campaign>> {
    let stamped = CampaignChanges {
        updated_at: Some(chrono::Utc::now()),
        ..changes.clone()
    };

    Ok(diesel::update(campaigns::table.find(campaign_id))
        .set(&stamped)
        .returning(Campaign::as_select())
        .get_result(conn)
        .await
        .optional()?)
}

/// Returns `true` if a record was removed. Emails stamped with the
/// campaign id keep their stamp.
///
/// ## Errors
/// Returns an error if the delete fails.
pub async fn delete(conn: &mut DbConnection<'_>, campaign_id: Uuid) -> DbResult<bool> {
    let removed = diesel::delete(campaigns::table.find(campaign_id))
        .execute(conn)
        .await?;
    Ok(removed > 0)
}
