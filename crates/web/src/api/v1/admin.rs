use axum::{
    extract::{OriginalUri, State},
    http::Method,
    routing::{on, post},
    Json, Router,
};
use transit::seed::SeedOutcome;

use crate::{
    common::{route_not_found, RouteErrorResponse, RouteResult, METHOD_FILTER_ALL},
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/reset", post(reset))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

/// Replaces every line and station with the seed network.
async fn reset(
    original_uri: OriginalUri,
    State(WebState { transit_client, .. }): State<WebState>,
) -> RouteResult<Json<SeedOutcome>> {
    transit_client
        .reset_to_seed()
        .await
        .map(Json)
        .map_err(|why| RouteErrorResponse::from(why).at(&Method::POST, &original_uri))
}
