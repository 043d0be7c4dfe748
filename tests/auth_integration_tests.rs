use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use car_rental_api::data::memory::InMemoryCarRepository;
use car_rental_api::data::user_repository::InMemoryUserRepository;
use car_rental_api::domain::user::{Identity, LoginRequest, RegisterUser};
use car_rental_api::infrastructure::security::{TOKEN_TTL_SECS, generate_token, generate_token_at};
use car_rental_api::presentation::handlers::AppState;
use car_rental_api::presentation::routes;
use chrono::{Duration, Utc};
use std::sync::Arc;

const JWT_SECRET: &str = "test-secret-key-for-auth-tests";

macro_rules! setup_auth_test {
    () => {{
        let users = Arc::new(InMemoryUserRepository::new());
        let state = web::Data::new(AppState::new(
            Arc::new(InMemoryCarRepository::new()),
            users.clone(),
            JWT_SECRET.to_string(),
        ));

        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .configure(|cfg| routes::configure(cfg, JWT_SECRET)),
        )
        .await;

        (app, users)
    }};
}

fn jane() -> RegisterUser {
    RegisterUser {
        full_name: Some("Jane Doe".to_string()),
        email: Some("jane@example.com".to_string()),
        username: Some("jane".to_string()),
        password: Some("correct horse".to_string()),
    }
}

fn credentials(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: Some(username.to_string()),
        password: Some(password.to_string()),
    }
}

#[actix_web::test]
async fn test_full_registration_login_profile_flow() {
    let (app, _users) = setup_auth_test!();

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(&jane())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User registered successfully");
    assert!(body["userId"].as_str().is_some_and(|id| !id.is_empty()));

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(&credentials("jane", "correct horse"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Login successful");
    let token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/my-profile")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        serde_json::json!({
            "full_name": "Jane Doe",
            "username": "jane",
            "email": "jane@example.com",
        })
    );
}

#[actix_web::test]
async fn test_register_missing_fields_creates_nothing() {
    let (app, users) = setup_auth_test!();

    let variants = [
        RegisterUser {
            full_name: None,
            ..jane()
        },
        RegisterUser {
            email: None,
            ..jane()
        },
        RegisterUser {
            username: None,
            ..jane()
        },
        RegisterUser {
            password: Some(String::new()),
            ..jane()
        },
    ];

    for body in variants {
        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "All fields are required");
    }

    assert_eq!(users.count().await, 0);
}

#[actix_web::test]
async fn test_register_duplicate_username_or_email() {
    let (app, users) = setup_auth_test!();

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(&jane())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let same_username = RegisterUser {
        email: Some("someone.else@example.com".to_string()),
        ..jane()
    };
    let same_email = RegisterUser {
        username: Some("someone_else".to_string()),
        ..jane()
    };

    for body in [same_username, same_email] {
        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Email or username already in use");
    }

    assert_eq!(users.count().await, 1);
}

#[actix_web::test]
async fn test_register_response_never_contains_password() {
    let (app, _users) = setup_auth_test!();

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(&jane())
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[actix_web::test]
async fn test_login_wrong_password() {
    let (app, _users) = setup_auth_test!();

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(&jane())
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(&credentials("jane", "wrong"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid password");
}

#[actix_web::test]
async fn test_login_unknown_username() {
    let (app, _users) = setup_auth_test!();

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(&credentials("nobody", "whatever"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid username");
}

#[actix_web::test]
async fn test_login_requires_username_and_password() {
    let (app, _users) = setup_auth_test!();

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(serde_json::json!({ "username": "jane" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Username and password are required");
}

#[actix_web::test]
async fn test_register_malformed_json_is_bad_request() {
    let (app, _users) = setup_auth_test!();

    let req = test::TestRequest::post()
        .uri("/register")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["message"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[actix_web::test]
async fn test_profile_without_token_is_unauthorized() {
    let (app, _users) = setup_auth_test!();

    let req = test::TestRequest::get().uri("/my-profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Access denied. No token provided.");
}

#[actix_web::test]
async fn test_profile_with_empty_authorization_header_counts_as_missing() {
    let (app, _users) = setup_auth_test!();

    let req = test::TestRequest::get()
        .uri("/my-profile")
        .insert_header(("Authorization", ""))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Access denied. No token provided.");
}

#[actix_web::test]
async fn test_profile_rejects_bad_tokens() {
    let (app, _users) = setup_auth_test!();

    let identity = Identity {
        user_id: "u-1".to_string(),
        full_name: "Jane Doe".to_string(),
        username: "jane".to_string(),
        email: "jane@example.com".to_string(),
    };
    let foreign = generate_token(&identity, "some-other-secret").unwrap();
    let valid = generate_token(&identity, JWT_SECRET).unwrap();

    let headers = [
        "Bearer not.a.token".to_string(),
        format!("Bearer {}", foreign),
        // Scheme is required
        valid,
        "Bearer ".to_string(),
    ];

    for header in headers {
        let req = test::TestRequest::get()
            .uri("/my-profile")
            .insert_header(("Authorization", header))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Invalid or expired token");
    }
}

#[actix_web::test]
async fn test_profile_rejects_token_older_than_an_hour() {
    let (app, _users) = setup_auth_test!();

    let identity = Identity {
        user_id: "u-1".to_string(),
        full_name: "Jane Doe".to_string(),
        username: "jane".to_string(),
        email: "jane@example.com".to_string(),
    };
    let issued_at = Utc::now() - Duration::seconds(TOKEN_TTL_SECS + 60);
    let expired = generate_token_at(&identity, JWT_SECRET, issued_at).unwrap();

    let req = test::TestRequest::get()
        .uri("/my-profile")
        .insert_header(("Authorization", format!("Bearer {}", expired)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_profile_reflects_token_claims_only() {
    let (app, users) = setup_auth_test!();

    // No user exists in the store; the profile is read from the token.
    let identity = Identity {
        user_id: "ghost".to_string(),
        full_name: "Ghost Rider".to_string(),
        username: "ghost".to_string(),
        email: "ghost@example.com".to_string(),
    };
    let token = generate_token(&identity, JWT_SECRET).unwrap();

    let req = test::TestRequest::get()
        .uri("/my-profile")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["username"], "ghost");
    assert_eq!(body["full_name"], "Ghost Rider");
    assert_eq!(users.count().await, 0);
}
