use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use ecclesia_core::health::healthz;
use ecclesia_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    account::{
        assign_role, change_password, login, logout, profile, register, toggle_status,
        update_profile, validate_user,
    },
    health::readyz,
    password_reset::{request_reset, set_new_password, verify_code},
    settings::{
        apply_theme, colors_css, get_settings, list_themes, preview_colors, update_settings,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Password reset
        .route("/password-reset", post(request_reset))
        .route("/password-reset/verify", post(verify_code))
        .route("/password-reset/new", post(set_new_password))
        // Accounts
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/register", post(register))
        .route("/accounts/profile", get(profile).post(update_profile))
        .route("/accounts/password", post(change_password))
        .route("/accounts/{id}/role", post(assign_role))
        .route("/accounts/{id}/toggle-status", post(toggle_status))
        .route("/accounts/{id}/validate", post(validate_user))
        // Settings
        .route("/settings", get(get_settings).put(update_settings))
        .route("/settings/colors.css", get(colors_css))
        .route("/settings/preview.css", get(preview_colors))
        .route("/settings/themes", get(list_themes))
        .route("/settings/themes/{id}/apply", post(apply_theme))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
