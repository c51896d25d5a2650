mod common;

use actix_web::{http::StatusCode, test};
use account_auth::types::{error::AppError, user::DBUserUpdate};
use common::{client::{bearer, TestClient}, test_data, TestContext};
use serde_json::json;
use uuid::Uuid;

#[actix_web::test]
async fn test_user_creation_flow_success() {
    println!("\n\n[+] Running test: test_user_creation_flow_success");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let user_data = test_data::sample_user();
    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(&user_data)
        .to_request();

    let resp = test::call_service(&app, req).await;
    println!("[<] Received response with status: {}", resp.status());
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    println!("[<] Response body: {}", body);
    assert_eq!(body["email"], "test@example.com");
    assert_eq!(body["first_name"], "Test");
    assert_eq!(body["is_active"], false);
    assert_eq!(body["is_staff"], false);
    assert!(body.get("password").is_none());

    let created = ctx.db.get_user_by_email("test@example.com").await.unwrap();
    assert_ne!(created.password, test_data::PASSWORD);
    assert!(created.password.starts_with("$argon2"));
    println!("[/] Test passed: User creation flow successful.");
}

#[actix_web::test]
async fn test_user_creation_auto_activate() {
    let mut config = common::get_test_config();
    config.auto_activate_user = true;
    let ctx = TestContext::with_config(config).await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(test_data::sample_user())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["is_active"], true);
}

#[actix_web::test]
async fn test_user_creation_missing_fields() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "first_name": "Nobody" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    // field errors are the whole body
    assert!(body.get("error").is_none());
    assert_eq!(body["email"][0], "This field is required.");
    assert_eq!(body["password"][0], "This field is required.");
}

#[actix_web::test]
async fn test_user_creation_duplicate_email() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    client.create_inactive_user("taken@example.com").await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(test_data::sample_user_with_email("taken@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["email"][0], "A user with that email already exists.");
}

#[actix_web::test]
async fn test_user_creation_rejects_weak_password_and_bad_email() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "email": "not-an-email", "password": "1234" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["email"][0], "Enter a valid email address.");
    assert_eq!(body["password"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_user_creation_malformed_json() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[actix_web::test]
async fn test_user_list_requires_staff() {
    println!("\n\n[+] Running test: test_user_list_requires_staff");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let (_user, user_token) = client.create_test_user().await;
    let (_admin, admin_token) = client.create_test_admin().await;

    let req = test::TestRequest::get().uri("/users").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/users")
        .insert_header(bearer(&user_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/users")
        .insert_header(bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    println!("[/] Test passed: list is staff only.");
}

#[actix_web::test]
async fn test_user_list_filters() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let (_admin, admin_token) = client.create_test_admin().await;
    client.create_test_user().await;
    let pending = client.create_inactive_user("pending@example.com").await;

    let req = test::TestRequest::get()
        .uri("/users?is_active=false")
        .insert_header(bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"], pending.id.to_string());

    let req = test::TestRequest::get()
        .uri("/users?is_staff=true")
        .insert_header(bearer(&admin_token))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_user_retrieve_ownership() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let (user, user_token) = client.create_test_user().await;
    let (other, _) = client.create_test_user().await;
    let (_admin, admin_token) = client.create_test_admin().await;

    // me alias
    let req = test::TestRequest::get()
        .uri("/users/me")
        .insert_header(bearer(&user_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], user.id.to_string());

    // someone else's account
    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", other.id))
        .insert_header(bearer(&user_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // missing account is indistinguishable for non-staff
    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", Uuid::new_v4()))
        .insert_header(bearer(&user_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // staff see everything and get a real 404
    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", other.id))
        .insert_header(bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", Uuid::new_v4()))
        .insert_header(bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_user_partial_update_self() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let (user, user_token) = client.create_test_user().await;

    let req = test::TestRequest::patch()
        .uri("/users/me")
        .insert_header(bearer(&user_token))
        .set_json(json!({ "first_name": "Renamed" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["first_name"], "Renamed");
    assert_eq!(body["last_name"], "User");
    assert_eq!(body["email"], user.email);
}

#[actix_web::test]
async fn test_user_update_rejects_staff_fields_for_regular_user() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let (user, user_token) = client.create_test_user().await;

    let req = test::TestRequest::patch()
        .uri("/users/me")
        .insert_header(bearer(&user_token))
        .set_json(json!({ "is_staff": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["is_staff"].is_array());

    let stored = ctx.db.get_user_by_id(&user.id).await.unwrap();
    assert!(!stored.is_staff);
}

#[actix_web::test]
async fn test_user_put_requires_full_body() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let (_user, user_token) = client.create_test_user().await;

    let req = test::TestRequest::put()
        .uri("/users/me")
        .insert_header(bearer(&user_token))
        .set_json(json!({ "first_name": "Only" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["email"][0], "This field is required.");
    assert_eq!(body["last_name"][0], "This field is required.");

    let req = test::TestRequest::put()
        .uri("/users/me")
        .insert_header(bearer(&user_token))
        .set_json(json!({
            "email": "fresh@example.com",
            "first_name": "Fresh",
            "last_name": "Start"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "fresh@example.com");
}

#[actix_web::test]
async fn test_user_password_change_needs_old_password() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let (user, user_token) = client.create_test_user().await;

    let req = test::TestRequest::patch()
        .uri("/users/me")
        .insert_header(bearer(&user_token))
        .set_json(json!({ "password": "An0ther-Secret!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["old_password"][0], "This field is required.");

    let req = test::TestRequest::patch()
        .uri("/users/me")
        .insert_header(bearer(&user_token))
        .set_json(json!({ "password": "An0ther-Secret!", "old_password": "wrong-one" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::patch()
        .uri("/users/me")
        .insert_header(bearer(&user_token))
        .set_json(json!({ "password": "An0ther-Secret!", "old_password": test_data::PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/authentication")
        .set_json(json!({ "email": user.email, "password": "An0ther-Secret!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_staff_assigns_permissions() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let (user, _) = client.create_test_user().await;
    let (_admin, admin_token) = client.create_test_admin().await;
    let perm = ctx
        .db
        .create_permission("Can view reports".into(), "view_reports".into())
        .await
        .unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/users/{}", user.id))
        .insert_header(bearer(&admin_token))
        .set_json(json!({ "user_permissions": [perm.id, perm.id] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["user_permissions"], json!([perm.id]));

    let req = test::TestRequest::patch()
        .uri(&format!("/users/{}", user.id))
        .insert_header(bearer(&admin_token))
        .set_json(json!({ "user_permissions": [9999] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::patch()
        .uri(&format!("/users/{}", user.id))
        .insert_header(bearer(&admin_token))
        .set_json(json!({ "user_permissions": [] }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["user_permissions"], json!([]));
}

#[actix_web::test]
async fn test_user_deactivate_flow() {
    println!("\n\n[+] Running test: test_user_deactivate_flow");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let (user, user_token) = client.create_test_user().await;
    let (other, other_token) = client.create_test_user().await;

    // other people's accounts are off limits
    let req = test::TestRequest::delete()
        .uri(&format!("/users/{}", user.id))
        .insert_header(bearer(&other_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // unknown ids still answer 204
    let req = test::TestRequest::delete()
        .uri(&format!("/users/{}", Uuid::new_v4()))
        .insert_header(bearer(&other_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete()
        .uri("/users/me")
        .insert_header(bearer(&user_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let stored = ctx.db.get_user_by_id(&user.id).await.unwrap();
    assert!(!stored.is_active);
    assert!(ctx.db.get_user_by_id(&other.id).await.unwrap().is_active);

    // the session of a deactivated account no longer works
    let req = test::TestRequest::get()
        .uri("/users/me")
        .insert_header(bearer(&user_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    println!("[/] Test passed: deactivation is a soft delete.");
}

#[actix_web::test]
async fn test_staff_deactivates_other_user() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let (user, _) = client.create_test_user().await;
    let (_admin, admin_token) = client.create_test_admin().await;

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{}", user.id))
        .insert_header(bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    assert!(!ctx.db.get_user_by_id(&user.id).await.unwrap().is_active);
}

#[actix_web::test]
async fn test_update_user_reports_email_collision_from_database() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());

    let (first, _) = client.create_test_user().await;
    let (second, _) = client.create_test_user().await;

    // skips the route's pre-check, as a concurrent writer would
    let result = ctx
        .db
        .update_user(
            second.id,
            DBUserUpdate {
                email: Some(first.email.clone()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::AlreadyExists)));

    let stored = ctx.db.get_user_by_id(&second.id).await.unwrap();
    assert_eq!(stored.email, second.email);
}

#[actix_web::test]
async fn test_user_update_rejects_taken_email() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;

    let (first, _) = client.create_test_user().await;
    let (_second, second_token) = client.create_test_user().await;

    let req = test::TestRequest::patch()
        .uri("/users/me")
        .insert_header(bearer(&second_token))
        .set_json(json!({ "email": first.email }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["email"][0], "A user with that email already exists.");
}
