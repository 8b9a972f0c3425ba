use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::schema::contacts;
use crate::error::DbResult;
use crate::model::contact::{Contact, ContactChanges, NewContact};

/// Returns one page of contacts in store order.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn list(conn: &mut DbConnection<'_>, skip: i64, limit: i64) -> DbResult<Vec<Contact>> {
    Ok(contacts::table
        .offset(skip)
        .limit(limit)
        .select(Contact::as_select())
        .load(conn)
        .await?)
}

/// Returns every contact in the store. Used by the loader's email
/// synthesis stage, which walks the whole collection.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn list_all(conn: &mut DbConnection<'_>) -> DbResult<Vec<Contact>> {
    Ok(contacts::table
        .select(Contact::as_select())
        .load(conn)
        .await?)
}

/// ## Errors
/// Returns an error if the query fails.
pub async fn find(conn: &mut DbConnection<'_>, id: Uuid) -> DbResult<Option<Contact>> {
    Ok(contacts::table
        .find(id)
        .select(Contact::as_select())
        .first(conn)
        .await
        .optional()?)
}

/// Loader upsert key: contacts are matched by email.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn find_by_email(conn: &mut DbConnection<'_>, email: &str) -> DbResult<Option<Contact>> {
    Ok(contacts::table
        .filter(contacts::email.eq(email))
        .select(Contact::as_select())
        .first(conn)
        .await
        .optional()?)
}

/// ## Errors
/// Returns an error if the insert fails, including on a duplicate zoom id.
pub async fn insert(conn: &mut DbConnection<'_>, new_contact: NewContact<'_>) -> DbResult<Contact> {
    Ok(diesel::insert_into(contacts::table)
        .values(&new_contact)
        .returning(Contact::as_select())
        .get_result(conn)
        .await?)
}

/// Applies only the fields present in `changes`. Returns `None` if no
/// contact has the given id.
///
/// ## Errors
/// Returns an error if the update fails.
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    changes: &ContactChanges,
) -> DbResult<Option<Contact>> {
    Ok(diesel::update(contacts::table.find(id))
        .set(changes)
        .returning(Contact::as_select())
        .get_result(conn)
        .await
        .optional()?)
}

/// Returns `true` if a record was removed.
///
/// ## Errors
/// Returns an error if the delete fails.
pub async fn delete(conn: &mut DbConnection<'_>, id: Uuid) -> DbResult<bool> {
    let removed = diesel::delete(contacts::table.find(id))
        .execute(conn)
        .await?;
    Ok(removed > 0)
}
