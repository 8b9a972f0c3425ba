//! Integration tests for the users resource.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn create_then_get_echoes_the_user() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = test_db.service();

    let created = post(
        &service,
        "/users",
        &json!({
            "email": "alice@example.com",
            "username": "alice",
            "first_name": "Alice",
            "last_name": "Hartley",
            "password": "hunter2hunter2",
        }),
    )
    .await
    .assert_status(StatusCode::OK);

    assert_eq!(created.str_field("email"), "alice@example.com");
    assert_eq!(created.str_field("username"), "alice");
    assert!(
        created.body.get("password").is_none() && created.body.get("hashed_password").is_none(),
        "Credentials must never appear on the wire: {}",
        created.body
    );

    let user_id = created.str_field("user_id").to_string();
    let fetched = get(&service, &format!("/users/{user_id}"))
        .await
        .assert_status(StatusCode::OK);

    assert_eq!(fetched.str_field("user_id"), user_id);
    assert_eq!(fetched.str_field("first_name"), "Alice");
}

#[test_log::test(tokio::test)]
async fn duplicate_email_is_rejected_and_leaves_one_row() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = test_db.service();

    create_user(&service, "dup@example.com", "first").await;

    let rejected = post(
        &service,
        "/users",
        &json!({
            "email": "dup@example.com",
            "username": "second",
            "first_name": "Other",
            "last_name": "Person",
            "password": "hunter2hunter2",
        }),
    )
    .await
    .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(rejected.str_field("error"), "Email already registered");

    let listed = get(&service, "/users")
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(
        listed.body.as_array().map(Vec::len),
        Some(1),
        "Exactly one user expected: {}",
        listed.body
    );
}

#[test_log::test(tokio::test)]
async fn partial_update_touches_only_named_fields() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = test_db.service();

    let user_id = create_user(&service, "carol@example.com", "carol").await;

    let updated = put(
        &service,
        &format!("/users/{user_id}"),
        &json!({"username": "carol_the_second"}),
    )
    .await
    .assert_status(StatusCode::OK);

    assert_eq!(updated.str_field("username"), "carol_the_second");
    assert_eq!(updated.str_field("email"), "carol@example.com");
    assert_eq!(updated.str_field("first_name"), "Test");
}

#[test_log::test(tokio::test)]
async fn empty_update_is_a_noop_read() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = test_db.service();

    let user_id = create_user(&service, "noop@example.com", "noop").await;

    let updated = put(&service, &format!("/users/{user_id}"), &json!({}))
        .await
        .assert_status(StatusCode::OK);

    assert_eq!(updated.str_field("user_id"), user_id);
    assert_eq!(updated.str_field("username"), "noop");
}

#[test_log::test(tokio::test)]
async fn delete_absent_user_is_not_found() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = test_db.service();

    let absent = uuid::Uuid::new_v4();
    delete(&service, &format!("/users/{absent}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // Malformed ids read the same as absent ones.
    delete(&service, "/users/not-a-uuid")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn delete_then_get_is_not_found() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = test_db.service();

    let user_id = create_user(&service, "gone@example.com", "gone").await;

    let deleted = delete(&service, &format!("/users/{user_id}"))
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(deleted.str_field("message"), "User deleted successfully");

    get(&service, &format!("/users/{user_id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn pagination_returns_min_of_limit_and_remaining() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = test_db.service();

    for i in 0..5 {
        create_user(&service, &format!("page{i}@example.com"), &format!("page{i}")).await;
    }

    let page = get(&service, "/users?skip=3&limit=10")
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(page.body.as_array().map(Vec::len), Some(2));

    let default_page = get(&service, "/users")
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(default_page.body.as_array().map(Vec::len), Some(5));

    let empty = get(&service, "/users?skip=5&limit=10")
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(empty.body.as_array().map(Vec::len), Some(0));
}

#[test_log::test(tokio::test)]
async fn pagination_bounds_are_enforced() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = test_db.service();

    get(&service, "/users?limit=0")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    get(&service, "/users?limit=101")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    get(&service, "/users?skip=-1")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    get(&service, "/users?skip=abc")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    get(&service, "/users?skip=0&limit=100")
        .await
        .assert_status(StatusCode::OK);
}
