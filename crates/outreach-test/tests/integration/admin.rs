//! Integration tests for the admin endpoints: fixture load, project
//! reset, and the log file operations.

use salvo::http::StatusCode;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn initialize_db_loads_the_sample_fixture_idempotently() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = test_db.service();

    let first = post_empty(&service, "/initialize-db")
        .await
        .assert_status(StatusCode::OK);
    assert!(
        first.str_field("message").starts_with("Database initialized"),
        "Unexpected message: {}",
        first.body
    );

    let users = get(&service, "/users").await.assert_status(StatusCode::OK);
    assert_eq!(users.body.as_array().map(Vec::len), Some(2));
    let companies = get(&service, "/companies")
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(companies.body.as_array().map(Vec::len), Some(3));

    // Re-running reconciles instead of duplicating.
    post_empty(&service, "/initialize-db")
        .await
        .assert_status(StatusCode::OK);
    let users_again = get(&service, "/users").await.assert_status(StatusCode::OK);
    assert_eq!(users_again.body.as_array().map(Vec::len), Some(2));
}

#[test_log::test(tokio::test)]
async fn reset_project_drops_everything() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = test_db.service();

    create_user(&service, "doomed@example.com", "doomed").await;

    let reset = post_empty(&service, "/reset-project")
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(reset.str_field("message"), "Project reset successfully");

    let users = get(&service, "/users").await.assert_status(StatusCode::OK);
    assert_eq!(users.body.as_array().map(Vec::len), Some(0));
}

#[test_log::test(tokio::test)]
async fn log_tail_returns_the_last_n_lines() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = test_db.service();

    std::fs::write(test_db.log_file(), "one\ntwo\nthree\nfour\n")
        .expect("Failed to seed log file");

    let tail = get(&service, "/logs?n=2").await.assert_status(StatusCode::OK);
    assert_eq!(
        tail.body["lines"],
        serde_json::json!(["three", "four"])
    );

    // Without n the whole (short) file comes back.
    let full = get(&service, "/logs").await.assert_status(StatusCode::OK);
    assert_eq!(full.body["lines"].as_array().map(Vec::len), Some(4));

    get(&service, "/logs?n=abc")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn missing_log_file_reads_as_empty() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = test_db.service();

    let tail = get(&service, "/logs").await.assert_status(StatusCode::OK);
    assert_eq!(tail.body["lines"].as_array().map(Vec::len), Some(0));
}

#[test_log::test(tokio::test)]
async fn reset_logs_truncates_the_file() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = test_db.service();

    std::fs::write(test_db.log_file(), "stale line\n").expect("Failed to seed log file");

    let reset = post_empty(&service, "/reset-logs")
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(reset.str_field("message"), "Logs reset successfully");

    let tail = get(&service, "/logs").await.assert_status(StatusCode::OK);
    assert_eq!(tail.body["lines"].as_array().map(Vec::len), Some(0));
}

#[test_log::test(tokio::test)]
async fn welcome_and_healthcheck_respond() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = test_db.service();

    let welcome = get(&service, "/").await.assert_status(StatusCode::OK);
    assert_eq!(
        welcome.str_field("message"),
        "Welcome to the Sales Outreach API"
    );

    get(&service, "/healthcheck")
        .await
        .assert_status(StatusCode::OK);
}
