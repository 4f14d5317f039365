use axum::{
    extract::{OriginalUri, Path, State},
    http::{Method, StatusCode},
    routing::{delete, get, on},
    Json, Router,
};
use model::favorite::{FavoriteRoute, FavoriteStation, NewFavoriteRoute, NewFavoriteStation};
use transit::{state::FavoritesSnapshot, RequestError};
use utility::id::Id;

use crate::{
    common::{route_not_found, RouteErrorResponse, RouteResult, VecResponse, METHOD_FILTER_ALL},
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/routes/:id", delete(remove_route))
        .route("/stations/:id", delete(remove_station))
        .route("/routes", get(get_routes).post(add_route))
        .route("/stations", get(get_stations).post(add_station))
        .route("/", get(get_favorites))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_favorites(
    State(WebState { favorites, .. }): State<WebState>,
) -> Json<FavoritesSnapshot> {
    Json(favorites.snapshot())
}

async fn get_routes(
    State(WebState { favorites, .. }): State<WebState>,
) -> Json<VecResponse<FavoriteRoute>> {
    VecResponse::new(favorites.snapshot().routes).json()
}

async fn get_stations(
    State(WebState { favorites, .. }): State<WebState>,
) -> Json<VecResponse<FavoriteStation>> {
    VecResponse::new(favorites.snapshot().stations).json()
}

async fn add_route(
    State(WebState { favorites, .. }): State<WebState>,
    Json(route): Json<NewFavoriteRoute>,
) -> (StatusCode, Json<FavoriteRoute>) {
    (StatusCode::CREATED, Json(favorites.add_route(route)))
}

async fn add_station(
    State(WebState { favorites, .. }): State<WebState>,
    Json(station): Json<NewFavoriteStation>,
) -> (StatusCode, Json<FavoriteStation>) {
    (StatusCode::CREATED, Json(favorites.add_station(station)))
}

async fn remove_route(
    original_uri: OriginalUri,
    Path(id): Path<u32>,
    State(WebState { favorites, .. }): State<WebState>,
) -> RouteResult<StatusCode> {
    removed(favorites.remove_route(Id::new(id)), &original_uri)
}

async fn remove_station(
    original_uri: OriginalUri,
    Path(id): Path<u32>,
    State(WebState { favorites, .. }): State<WebState>,
) -> RouteResult<StatusCode> {
    removed(favorites.remove_station(Id::new(id)), &original_uri)
}

fn removed(found: bool, original_uri: &OriginalUri) -> RouteResult<StatusCode> {
    if found {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(RouteErrorResponse::from(RequestError::NotFound).at(&Method::DELETE, original_uri))
    }
}
