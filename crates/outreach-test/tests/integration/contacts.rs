//! Integration tests for the contacts resource.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

async fn seed_owner_and_company(service: &salvo::Service) -> (String, String) {
    let user_id = create_user(service, "seller@example.com", "seller").await;
    let company_id = create_company(service, "Acme Corp", "zoom-acme", &user_id).await;
    (user_id, company_id)
}

#[test_log::test(tokio::test)]
async fn create_then_get_echoes_the_contact() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = test_db.service();
    let (user_id, company_id) = seed_owner_and_company(&service).await;

    let created = post(
        &service,
        "/contacts",
        &json!({
            "first_name": "Dana",
            "last_name": "Reyes",
            "email": "dana@acme.example.com",
            "title": "VP of Engineering",
            "zoom_id": "zoom-ct-1",
            "user_id": user_id,
            "company_id": company_id,
        }),
    )
    .await
    .assert_status(StatusCode::OK);

    assert_eq!(created.str_field("email"), "dana@acme.example.com");
    assert_eq!(created.str_field("company_id"), company_id);

    let contact_id = created.str_field("contact_id").to_string();
    let fetched = get(&service, &format!("/contacts/{contact_id}"))
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(fetched.str_field("title"), "VP of Engineering");
}

#[test_log::test(tokio::test)]
async fn both_references_must_resolve() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = test_db.service();
    let (user_id, company_id) = seed_owner_and_company(&service).await;

    let absent = uuid::Uuid::new_v4().to_string();

    let no_user = post(
        &service,
        "/contacts",
        &json!({
            "first_name": "A",
            "last_name": "B",
            "email": "ab@example.com",
            "title": null,
            "zoom_id": "zoom-x",
            "user_id": absent,
            "company_id": company_id,
        }),
    )
    .await
    .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        no_user.str_field("error"),
        "user_id does not resolve to a user"
    );

    let no_company = post(
        &service,
        "/contacts",
        &json!({
            "first_name": "A",
            "last_name": "B",
            "email": "ab@example.com",
            "title": null,
            "zoom_id": "zoom-x",
            "user_id": user_id,
            "company_id": uuid::Uuid::new_v4().to_string(),
        }),
    )
    .await
    .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        no_company.str_field("error"),
        "company_id does not resolve to a company"
    );
}

#[test_log::test(tokio::test)]
async fn deleting_the_company_leaves_the_contact_behind() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = test_db.service();
    let (user_id, company_id) = seed_owner_and_company(&service).await;

    let created = post(
        &service,
        "/contacts",
        &json!({
            "first_name": "Orphan",
            "last_name": "Contact",
            "email": "orphan@acme.example.com",
            "title": null,
            "zoom_id": "zoom-ct-orphan",
            "user_id": user_id,
            "company_id": company_id,
        }),
    )
    .await
    .assert_status(StatusCode::OK);
    let contact_id = created.str_field("contact_id").to_string();

    delete(&service, &format!("/companies/{company_id}"))
        .await
        .assert_status(StatusCode::OK);

    let fetched = get(&service, &format!("/contacts/{contact_id}"))
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(fetched.str_field("company_id"), company_id);
}

#[test_log::test(tokio::test)]
async fn update_and_delete_round_out_the_lifecycle() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = test_db.service();
    let (user_id, company_id) = seed_owner_and_company(&service).await;

    let created = post(
        &service,
        "/contacts",
        &json!({
            "first_name": "Marcus",
            "last_name": "Lindqvist",
            "email": "marcus@acme.example.com",
            "title": null,
            "zoom_id": "zoom-ct-2",
            "user_id": user_id,
            "company_id": company_id,
        }),
    )
    .await
    .assert_status(StatusCode::OK);
    let contact_id = created.str_field("contact_id").to_string();

    let updated = put(
        &service,
        &format!("/contacts/{contact_id}"),
        &json!({"title": "Head of Data"}),
    )
    .await
    .assert_status(StatusCode::OK);
    assert_eq!(updated.str_field("title"), "Head of Data");
    assert_eq!(updated.str_field("first_name"), "Marcus");

    let deleted = delete(&service, &format!("/contacts/{contact_id}"))
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(deleted.str_field("message"), "Contact deleted successfully");

    delete(&service, &format!("/contacts/{contact_id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
