use diesel::{OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::schema::emails;
use crate::error::DbResult;
use crate::model::email::{Email, EmailChanges, NewEmail};

/// Returns one page of emails in store order.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn list(conn: &mut DbConnection<'_>, skip: i64, limit: i64) -> DbResult<Vec<Email>> {
    Ok(emails::table
        .offset(skip)
        .limit(limit)
        .select(Email::as_select())
        .load(conn)
        .await?)
}

/// Returns every email in the store. The loader scans these snapshots to
/// decide which contacts already have a synthesized email.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn list_all(conn: &mut DbConnection<'_>) -> DbResult<Vec<Email>> {
    Ok(emails::table.select(Email::as_select()).load(conn).await?)
}

/// ## Errors
/// Returns an error if the query fails.
pub async fn find(conn: &mut DbConnection<'_>, id: Uuid) -> DbResult<Option<Email>> {
    Ok(emails::table
        .find(id)
        .select(Email::as_select())
        .first(conn)
        .await
        .optional()?)
}

/// ## Errors
/// Returns an error if the insert fails.
pub async fn insert(conn: &mut DbConnection<'_>, new_email: NewEmail<'_>) -> DbResult<Email> {
    Ok(diesel::insert_into(emails::table)
        .values(&new_email)
        .returning(Email::as_select())
        .get_result(conn)
        .await?)
}

/// Applies only the fields present in `changes`. Returns `None` if no
/// email has the given id.
///
/// ## Errors
/// Returns an error if the update fails.
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    changes: &EmailChanges,
) -> DbResult<Option<Email>> {
    Ok(diesel::update(emails::table.find(id))
        .set(changes)
        .returning(Email::as_select())
        .get_result(conn)
        .await
        .optional()?)
}

/// Returns `true` if a record was removed.
///
/// ## Errors
/// Returns an error if the delete fails.
pub async fn delete(conn: &mut DbConnection<'_>, id: Uuid) -> DbResult<bool> {
    let removed = diesel::delete(emails::table.find(id)).execute(conn).await?;
    Ok(removed > 0)
}
