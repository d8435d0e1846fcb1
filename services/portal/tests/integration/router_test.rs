use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::Value;

use ecclesia_portal::domain::types::ChurchSettings;
use ecclesia_portal::infra::hashing::BcryptHasher;
use ecclesia_portal::infra::mail::SmtpResetNotifier;
use ecclesia_portal::router::build_router;
use ecclesia_portal::settings::SettingsHandle;
use ecclesia_portal::state::AppState;

/// Real router over backends that are never reached: the database is
/// disconnected, the Redis pool and SMTP transport connect lazily. Every
/// request below is answered before any storage is touched.
fn test_server() -> TestServer {
    let redis = deadpool_redis::Config::from_url("redis://127.0.0.1:1")
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .unwrap();
    let mailer = SmtpResetNotifier::new(
        "localhost",
        587,
        "mailer",
        "secret",
        "noreply@egliselagrace.com",
    )
    .unwrap();
    let state = AppState {
        db: DatabaseConnection::default(),
        redis,
        mailer,
        hasher: BcryptHasher { cost: 4 },
        settings: SettingsHandle::new(ChurchSettings::defaults(Utc::now())),
        cookie_domain: "localhost".to_owned(),
        session_ttl_secs: 60,
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn should_answer_liveness_with_request_id() {
    let server = test_server();
    let response = server.get("/healthz").await;
    response.assert_status_ok();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    let server = test_server();
    let response = server.get("/readyz").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_send_verify_without_session_back_to_issuance() {
    let server = test_server();
    let response = server
        .post("/password-reset/verify")
        .form(&[("code", "483920")])
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["kind"], "SESSION_EXPIRED");
    assert_eq!(body["redirect"], "/password-reset");
}

#[tokio::test]
async fn should_ignore_tampered_session_cookie() {
    let server = test_server();
    let response = server
        .post("/password-reset/verify")
        .add_header(
            header::COOKIE,
            HeaderValue::from_static("ecclesia_session=session:*"),
        )
        .form(&[("code", "483920")])
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["kind"], "SESSION_EXPIRED");
}

#[tokio::test]
async fn should_refuse_final_step_without_verified_code() {
    let server = test_server();
    let response = server
        .post("/password-reset/new")
        .form(&[("password1", "nouveau-mdp"), ("password2", "nouveau-mdp")])
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_SESSION");
    assert_eq!(body["redirect"], "/password-reset");
}

#[tokio::test]
async fn should_reject_reset_request_without_email_field() {
    let server = test_server();
    let response = server
        .post("/password-reset")
        .form(&[("mail", "m.diallo@example.com")])
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn should_require_login_for_account_and_settings_routes() {
    let server = test_server();

    let profile = server.get("/accounts/profile").await;
    profile.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(profile.json::<Value>()["kind"], "UNAUTHENTICATED");

    server
        .get("/settings")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/settings/themes")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post("/settings/themes/1/apply")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post("/accounts/00000000-0000-0000-0000-000000000001/toggle-status")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post("/accounts/00000000-0000-0000-0000-000000000001/validate")
        .form(&[("action", "validate")])
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post("/accounts/profile")
        .form(&[
            ("first_name", "Moussa"),
            ("last_name", "Diallo"),
            ("email", "m.diallo@example.com"),
        ])
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/settings/preview.css")
        .add_query_param("primary", "#0F766E")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_registration_with_invalid_username() {
    let server = test_server();
    let response = server
        .post("/register")
        .form(&[
            ("username", "moussa diallo"),
            ("email", "m.diallo@example.com"),
            ("first_name", "Moussa"),
            ("last_name", "Diallo"),
            ("password1", "bienvenue-2024"),
            ("password2", "bienvenue-2024"),
        ])
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_PROFILE");
}

#[tokio::test]
async fn should_serve_colors_css_publicly() {
    let server = test_server();
    let response = server.get("/settings/colors.css").await;

    response.assert_status_ok();
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/css"));
    let css = response.text();
    assert!(css.contains("--color-primary: #4F46E5;"));
    assert!(css.contains("--color-danger: #EF4444;"));
}
