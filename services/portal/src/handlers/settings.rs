use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Redirect};

use ecclesia_domain::capability::Capability;

use crate::domain::repository::{SystemClock, ThemeRepository};
use crate::domain::types::{ChurchSettings, ThemePreset};
use crate::error::PortalError;
use crate::handlers::current_user::CurrentUser;
use crate::state::AppState;
use crate::usecase::settings::{
    ApplyThemeUseCase, PreviewColorsInput, UpdateSettingsInput, UpdateSettingsUseCase,
};

pub const THEMES_PATH: &str = "/settings/themes";

/// `GET /settings`
pub async fn get_settings(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ChurchSettings>, PortalError> {
    user.require(Capability::Admin)?;
    Ok(Json(ChurchSettings::clone(&state.settings.current())))
}

/// `PUT /settings`
pub async fn update_settings(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<UpdateSettingsInput>,
) -> Result<Json<ChurchSettings>, PortalError> {
    user.require(Capability::Admin)?;
    let usecase = UpdateSettingsUseCase {
        repo: state.settings_repo(),
        handle: state.settings.clone(),
        clock: SystemClock,
    };
    let settings = usecase.execute(user.id(), body).await?;
    Ok(Json(ChurchSettings::clone(&settings)))
}

/// `GET /settings/colors.css`, public so that the login page can use it.
pub async fn colors_css(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        state.settings.current().colors_css(),
    )
}

/// `GET /settings/preview.css?primary=&secondary=&accent=`
///
/// Saved palette with the given colors swapped in. Nothing is saved.
pub async fn preview_colors(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(input): Query<PreviewColorsInput>,
) -> Result<impl IntoResponse, PortalError> {
    user.require(Capability::Admin)?;
    let colors = input.apply_to(&state.settings.current().colors)?;
    Ok((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        colors.to_css(),
    ))
}

/// `GET /settings/themes`
pub async fn list_themes(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<ThemePreset>>, PortalError> {
    Ok(Json(state.theme_repo().list().await?))
}

/// `POST /settings/themes/{id}/apply`
pub async fn apply_theme(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Redirect, PortalError> {
    user.require(Capability::Admin)?;
    let usecase = ApplyThemeUseCase {
        repo: state.settings_repo(),
        themes: state.theme_repo(),
        handle: state.settings.clone(),
        clock: SystemClock,
    };
    usecase.execute(user.id(), id).await?;
    Ok(Redirect::to(THEMES_PATH))
}
