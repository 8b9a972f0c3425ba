use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::schema::companies;
use crate::error::DbResult;
use crate::model::company::{Company, CompanyChanges, NewCompany};

/// Returns one page of companies in store order.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn list(conn: &mut DbConnection<'_>, skip: i64, limit: i64) -> DbResult<Vec<Company>> {
    Ok(companies::table
        .offset(skip)
        .limit(limit)
        .select(Company::as_select())
        .load(conn)
        .await?)
}

/// ## Errors
/// Returns an error if the query fails.
pub async fn find(conn: &mut DbConnection<'_>, id: Uuid) -> DbResult<Option<Company>> {
    Ok(companies::table
        .find(id)
        .select(Company::as_select())
        .first(conn)
        .await
        .optional()?)
}

/// Loader upsert key: companies are matched by name.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn find_by_name(conn: &mut DbConnection<'_>, name: &str) -> DbResult<Option<Company>> {
    Ok(companies::table
        .filter(companies::name.eq(name))
        .select(Company::as_select())
        .first(conn)
        .await
        .optional()?)
}

/// ## Errors
/// Returns an error if the insert fails, including on a duplicate zoom id.
pub async fn insert(conn: &mut DbConnection<'_>, new_company: NewCompany<'_>) -> DbResult<Company> {
    Ok(diesel::insert_into(companies::table)
        .values(&new_company)
        .returning(Company::as_select())
        .get_result(conn)
        .await?)
}

/// Applies only the fields present in `changes`. Returns `None` if no
/// company has the given id.
///
/// ## Errors
/// Returns an error if the update fails.
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    changes: &CompanyChanges,
) -> DbResult<Option<Company>> {
    Ok(diesel::update(companies::table.find(id))
        .set(changes)
        .returning(Company::as_select())
        .get_result(conn)
        .await
        .optional()?)
}

/// Returns `true` if a record was removed. Contacts referencing the
/// company are left in place.
///
/// ## Errors
/// Returns an error if the delete fails.
pub async fn delete(conn: &mut DbConnection<'_>, id: Uuid) -> DbResult<bool> {
    let removed = diesel::delete(companies::table.find(id))
        .execute(conn)
        .await?;
    Ok(removed > 0)
}
