use axum::{
    extract::State,
    routing::{get, on},
    Json, Router,
};
use model::preferences::{Language, Theme, UserPreferences};
use serde::Deserialize;

use crate::{
    common::{route_not_found, METHOD_FILTER_ALL},
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", get(get_preferences).put(put_preferences))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

/// Fields left out keep their current value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreferencesUpdate {
    language: Option<Language>,
    theme: Option<Theme>,
}

async fn get_preferences(
    State(WebState { preferences, .. }): State<WebState>,
) -> Json<UserPreferences> {
    Json(preferences.snapshot())
}

async fn put_preferences(
    State(WebState { preferences, .. }): State<WebState>,
    Json(update): Json<PreferencesUpdate>,
) -> Json<UserPreferences> {
    if let Some(language) = update.language {
        preferences.set_language(language);
    }
    if let Some(theme) = update.theme {
        preferences.set_theme(theme);
    }
    Json(preferences.snapshot())
}
