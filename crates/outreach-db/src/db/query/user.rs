use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::schema::users;
use crate::error::DbResult;
use crate::model::user::{NewUser, User, UserChanges};

/// Returns one page of users in store order.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn list(conn: &mut DbConnection<'_>, skip: i64, limit: i64) -> DbResult<Vec<User>> {
    Ok(users::table
        .offset(skip)
        .limit(limit)
        .select(User::as_select())
        .load(conn)
        .await?)
}

/// ## Errors
/// Returns an error if the query fails.
pub async fn find(conn: &mut DbConnection<'_>, id: Uuid) -> DbResult<Option<User>> {
    Ok(users::table
        .find(id)
        .select(User::as_select())
        .first(conn)
        .await
        .optional()?)
}

/// ## Errors
/// Returns an error if the query fails.
pub async fn find_by_email(conn: &mut DbConnection<'_>, email: &str) -> DbResult<Option<User>> {
    Ok(users::table
        .filter(users::email.eq(email))
        .select(User::as_select())
        .first(conn)
        .await
        .optional()?)
}

/// ## Errors
/// Returns an error if the insert fails, including on a unique-constraint
/// violation for email or username.
pub async fn insert(conn: &mut DbConnection<'_>, new_user: NewUser<'_>) -> DbResult<User> {
    Ok(diesel::insert_into(users::table)
        .values(&new_user)
        .returning(User::as_select())
        .get_result(conn)
        .await?)
}

/// Applies only the fields present in `changes`. Returns `None` if no user
/// has the given id.
///
/// ## Errors
/// Returns an error if the update fails, including on a unique-constraint
/// violation of the merged record.
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    changes: &UserChanges,
) -> DbResult<Option<User>> {
    Ok(diesel::update(users::table.find(id))
        .set(changes)
        .returning(User::as_select())
        .get_result(conn)
        .await
        .optional()?)
}

/// Returns `true` if a record was removed.
///
/// ## Errors
/// Returns an error if the delete fails.
pub async fn delete(conn: &mut DbConnection<'_>, id: Uuid) -> DbResult<bool> {
    let removed = diesel::delete(users::table.find(id)).execute(conn).await?;
    Ok(removed > 0)
}
