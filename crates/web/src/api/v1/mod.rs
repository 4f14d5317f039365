use axum::{
    routing::{get, on},
    Json, Router,
};
use model::map::MapPoint;
use schemars::JsonSchema;
use serde::Serialize;

use crate::{
    common::{route_not_found, METHOD_FILTER_ALL},
    middleware::base_url::base_url_middleware,
    WebState,
};

mod admin;
mod events;
mod favorites;
mod information;
mod lines;
mod preferences;
mod routes;
mod stations;

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::resource!("/v1{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/map", get(default_map))
        .nest_service("/lines", lines::routes(state.clone()))
        .nest_service("/stations", stations::routes(state.clone()))
        .nest_service("/routes", routes::routes(state.clone()))
        .nest_service("/information", information::routes(state.clone()))
        .nest_service("/favorites", favorites::routes(state.clone()))
        .nest_service("/preferences", preferences::routes(state.clone()))
        .nest_service("/admin", admin::routes(state.clone()))
        .nest_service("/events", events::routes(state.clone()))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

/// A map point together with the two ways of opening it.
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MapHandoffDto {
    #[serde(flatten)]
    point: MapPoint,
    geo_uri: String,
    web_url: String,
}

impl From<MapPoint> for MapHandoffDto {
    fn from(point: MapPoint) -> Self {
        Self {
            geo_uri: point.geo_uri(),
            web_url: point.web_url(),
            point,
        }
    }
}

async fn default_map() -> Json<MapHandoffDto> {
    Json(MapPoint::metro_de_lima().into())
}
