//! Integration tests for the fixture loader, exercised directly against
//! the service layer.

use serde_json::json;

use outreach_test::component::loader::fixture::Fixture;
use outreach_test::component::loader::initialize_from_fixture;

use super::helpers::TestDb;

fn two_user_fixture() -> Fixture {
    let raw = json!({
        "users": [
            {
                "email": "alice@example.com",
                "username": "alice",
                "first_name": "Alice",
                "last_name": "Hartley",
                "password": "secret-one",
            },
            {
                "email": "ben@example.com",
                "username": "ben",
                "first_name": "Ben",
                "last_name": "Okafor",
                "password": "secret-two",
            },
        ],
        "companies": [
            {
                "name": "Northwind",
                "website": "https://northwind.example.com",
                "primary_industry": "Software",
                "primary_sub_industry": null,
                "zoom_id": "z-nw",
                "user_email": "alice@example.com",
            },
        ],
        "contacts": [
            {
                "first_name": "Dana",
                "last_name": "Reyes",
                "email": "dana@northwind.example.com",
                "title": "VP of Engineering",
                "zoom_id": "z-ct-1",
                "user_email": "alice@example.com",
                "company_name": "Northwind",
            },
        ],
        "campaigns": [
            {
                "campaign_name": "Launch",
                "campaign_context": "ctx",
                "campaign_template_title": "Hello {first_name}",
                "campaign_template_body": "Hi {first_name}",
                "user_email": "alice@example.com",
            },
        ],
    });

    Fixture::from_json(&raw.to_string()).expect("Fixture should parse")
}

#[test_log::test(tokio::test)]
async fn first_run_creates_everything() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let mut conn = test_db.conn().await.expect("Failed to get connection");

    let summary = initialize_from_fixture(&mut conn, &two_user_fixture())
        .await
        .expect("Load should succeed");

    assert_eq!(summary.users.created, 2);
    assert_eq!(summary.companies.created, 1);
    assert_eq!(summary.contacts.created, 1);
    assert_eq!(summary.campaigns.created, 1);
    assert_eq!(summary.emails.created, 1);
    assert_eq!(summary.users.skipped, 0);
}

#[test_log::test(tokio::test)]
async fn second_run_updates_and_skips_synthesized_emails() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let mut conn = test_db.conn().await.expect("Failed to get connection");

    let fixture = two_user_fixture();
    initialize_from_fixture(&mut conn, &fixture)
        .await
        .expect("First load should succeed");
    let second = initialize_from_fixture(&mut conn, &fixture)
        .await
        .expect("Second load should succeed");

    assert_eq!(second.users.created, 0);
    assert_eq!(second.users.updated, 2);
    assert_eq!(second.companies.updated, 1);
    assert_eq!(second.contacts.updated, 1);
    assert_eq!(second.campaigns.updated, 1);

    // The contact already has its sample email; no duplicate is written.
    assert_eq!(second.emails.created, 0);
    assert_eq!(second.emails.skipped, 1);
}

#[test_log::test(tokio::test)]
async fn unresolvable_references_skip_the_item_not_the_run() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let mut conn = test_db.conn().await.expect("Failed to get connection");

    let raw = json!({
        "users": [
            {
                "email": "only@example.com",
                "username": "only",
                "first_name": "Only",
                "last_name": "User",
                "password": "pw",
            },
        ],
        "companies": [
            {
                "name": "Owned Co",
                "website": null,
                "primary_industry": null,
                "primary_sub_industry": null,
                "zoom_id": "z-owned",
                "user_email": "only@example.com",
            },
            {
                "name": "Ghost Co",
                "website": null,
                "primary_industry": null,
                "primary_sub_industry": null,
                "zoom_id": "z-ghost",
                "user_email": "nobody@example.com",
            },
        ],
        "contacts": [
            {
                "first_name": "Lost",
                "last_name": "Soul",
                "email": "lost@ghost.example.com",
                "title": null,
                "zoom_id": "z-ct-lost",
                "user_email": "only@example.com",
                "company_name": "Ghost Co",
            },
        ],
        "campaigns": [],
    });
    let fixture = Fixture::from_json(&raw.to_string()).expect("Fixture should parse");

    let summary = initialize_from_fixture(&mut conn, &fixture)
        .await
        .expect("Load should succeed despite bad references");

    assert_eq!(summary.companies.created, 1);
    assert_eq!(summary.companies.skipped, 1);
    // The contact's company was itself skipped, so the contact is too.
    assert_eq!(summary.contacts.created, 0);
    assert_eq!(summary.contacts.skipped, 1);
    // No campaign means no sample emails, and no failure either.
    assert_eq!(summary.emails.created, 0);
}

#[test_log::test(tokio::test)]
async fn missing_companies_key_fails_before_any_stage() {
    let raw = json!({"users": [], "contacts": [], "campaigns": []});
    assert!(Fixture::from_json(&raw.to_string()).is_err());
}
