//! Integration tests for the campaigns resource, including the
//! end-to-end lifecycle scenario.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn campaign_lifecycle_end_to_end() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = test_db.service();

    let user_id = create_user(&service, "runner@example.com", "runner").await;

    let created = post(
        &service,
        "/campaigns",
        &json!({
            "campaign_name": "Test Campaign",
            "campaign_context": "Reaching out to evaluation-stage leads",
            "campaign_template_title": "Hello {first_name}",
            "campaign_template_body": "Hi {first_name}, quick question about {company_name}.",
            "user_id": user_id,
        }),
    )
    .await
    .assert_status(StatusCode::OK);
    assert_eq!(created.str_field("campaign_name"), "Test Campaign");
    assert_eq!(created.str_field("user_id"), user_id);
    let campaign_id = created.str_field("campaign_id").to_string();

    let fetched = get(&service, &format!("/campaigns/{campaign_id}"))
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(fetched.str_field("campaign_name"), "Test Campaign");

    let updated = put(
        &service,
        &format!("/campaigns/{campaign_id}"),
        &json!({"campaign_context": "Now targeting procurement"}),
    )
    .await
    .assert_status(StatusCode::OK);
    assert_eq!(
        updated.str_field("campaign_context"),
        "Now targeting procurement"
    );
    assert_eq!(updated.str_field("campaign_name"), "Test Campaign");

    let listed = get(&service, "/campaigns")
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(listed.body.as_array().map(Vec::len), Some(1));

    let deleted = delete(&service, &format!("/campaigns/{campaign_id}"))
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(deleted.str_field("message"), "Campaign deleted successfully");

    get(&service, &format!("/campaigns/{campaign_id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn update_stamps_updated_at() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = test_db.service();

    let user_id = create_user(&service, "stamp@example.com", "stamp").await;
    let campaign_id = create_campaign(&service, "Stamped", &user_id).await;

    let before = get(&service, &format!("/campaigns/{campaign_id}"))
        .await
        .assert_status(StatusCode::OK);
    let created_at = before.str_field("created_at").to_string();

    let after = put(
        &service,
        &format!("/campaigns/{campaign_id}"),
        &json!({"campaign_template_body": "New body"}),
    )
    .await
    .assert_status(StatusCode::OK);

    assert_eq!(after.str_field("created_at"), created_at);
    assert!(
        after.str_field("updated_at") >= after.str_field("created_at"),
        "updated_at must not precede created_at"
    );
}

#[test_log::test(tokio::test)]
async fn owner_must_resolve_on_create() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = test_db.service();

    let rejected = post(
        &service,
        "/campaigns",
        &json!({
            "campaign_name": "Ownerless",
            "campaign_context": "ctx",
            "campaign_template_title": "t",
            "campaign_template_body": "b",
            "user_id": uuid::Uuid::new_v4().to_string(),
        }),
    )
    .await
    .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        rejected.str_field("error"),
        "user_id does not resolve to a user"
    );
}

#[test_log::test(tokio::test)]
async fn deleting_a_campaign_leaves_stamped_emails() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = test_db.service();

    let user_id = create_user(&service, "mailer@example.com", "mailer").await;
    let campaign_id = create_campaign(&service, "Soon Gone", &user_id).await;

    let email = post(
        &service,
        "/emails",
        &json!({
            "company": {"name": "Acme", "zoom_id": "z-1"},
            "contact": {"first_name": "Dana", "last_name": "Reyes", "email": "dana@acme.example.com"},
            "subject": "Hello",
            "body": "Body",
            "ai_model": "gpt-4",
            "tokens_sent": 10,
            "tokens_returned": 5,
            "generation_time": 0.5,
            "campaign_id": campaign_id,
            "full_prompt": "prompt text",
        }),
    )
    .await
    .assert_status(StatusCode::OK);
    let email_id = email.str_field("email_id").to_string();

    delete(&service, &format!("/campaigns/{campaign_id}"))
        .await
        .assert_status(StatusCode::OK);

    // The stamp is soft: the email survives with the stale campaign id.
    let fetched = get(&service, &format!("/emails/{email_id}"))
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(fetched.str_field("campaign_id"), campaign_id);
}
