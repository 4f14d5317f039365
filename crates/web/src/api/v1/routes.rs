use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, State},
    http::{Method, StatusCode},
    routing::{get, on, post, put},
    Extension, Json, Router,
};
use model::{remote_station::RemoteStation, route::RouteEstimate};
use transit::state::RouteSelectionSnapshot;
use utility::id::Id;

use crate::{
    common::{
        route_not_found, schema, HateoasResult, RouteErrorResponse, RouteResult, VecResponse,
        METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/routes{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<RouteEstimate>))
        .route(
            "/remote-stations",
            get(get_remote_stations).post(reload_remote_stations),
        )
        .route("/selection", get(get_selection))
        .route("/selection/origin/:id", put(select_origin))
        .route("/selection/destination/:id", put(select_destination))
        .route("/selection/estimate", post(estimate_selection))
        .route("/:origin/:destination", get(estimate_route))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn estimate_route(
    original_uri: OriginalUri,
    Path((origin, destination)): Path<(i64, i64)>,
    State(WebState {
        transit_client,
        route_estimator,
        ..
    }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<RouteEstimate> {
    transit_client
        .estimate_route(Id::new(origin), Id::new(destination), route_estimator.as_ref())
        .await
        .map(|estimate| {
            hateoas::Response::builder(estimate, base_url)
                .link("origin", super::stations::resource!("/{}", origin))
                .link("destination", super::stations::resource!("/{}", destination))
                .build()
                .json()
        })
        .map_err(|why| RouteErrorResponse::from(why).at(&Method::GET, &original_uri))
}

/// The remote stations of the last reload.
async fn get_remote_stations(
    State(WebState { route_selection, .. }): State<WebState>,
) -> Json<VecResponse<RemoteStation>> {
    VecResponse::new(route_selection.snapshot().stations).json()
}

/// Fetches the remote feed again. An unreachable feed yields an empty list.
async fn reload_remote_stations(
    State(WebState { route_selection, .. }): State<WebState>,
) -> Json<VecResponse<RemoteStation>> {
    route_selection.load_remote().await;
    VecResponse::new(route_selection.snapshot().stations).json()
}

async fn get_selection(
    State(WebState { route_selection, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> Json<hateoas::Response<RouteSelectionSnapshot>> {
    selection_hateoas(route_selection.snapshot(), base_url).json()
}

async fn select_origin(
    original_uri: OriginalUri,
    Path(id): Path<i64>,
    State(WebState { route_selection, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<RouteSelectionSnapshot> {
    if !route_selection.select_origin(id) {
        return Err(remote_station_not_loaded(id, &original_uri));
    }
    Ok(selection_hateoas(route_selection.snapshot(), base_url).json())
}

async fn select_destination(
    original_uri: OriginalUri,
    Path(id): Path<i64>,
    State(WebState { route_selection, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<RouteSelectionSnapshot> {
    if !route_selection.select_destination(id) {
        return Err(remote_station_not_loaded(id, &original_uri));
    }
    Ok(selection_hateoas(route_selection.snapshot(), base_url).json())
}

async fn estimate_selection(
    original_uri: OriginalUri,
    State(WebState { route_selection, .. }): State<WebState>,
) -> RouteResult<Json<RouteEstimate>> {
    route_selection.calculate().map(Json).ok_or_else(|| {
        RouteErrorResponse::new(StatusCode::BAD_REQUEST)
            .at(&Method::POST, &original_uri)
            .with_message("origin and destination must be selected first")
    })
}

fn remote_station_not_loaded(id: i64, original_uri: &OriginalUri) -> RouteErrorResponse {
    RouteErrorResponse::new(StatusCode::NOT_FOUND)
        .at(&Method::PUT, original_uri)
        .with_message(format!("remote station {} is not loaded", id))
}

fn selection_hateoas(
    selection: RouteSelectionSnapshot,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<RouteSelectionSnapshot> {
    hateoas::Response::builder(selection, base_url)
        .link("self", resource!("/selection"))
        .link("stations", resource!("/remote-stations"))
        .link("estimate", resource!("/selection/estimate"))
        .build()
}
