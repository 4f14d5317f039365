use std::sync::Arc;

use axum::{
    routing::{get, on},
    Extension, Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};

pub mod v1;

use crate::{
    common::{route_not_found, METHOD_FILTER_ALL},
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        format!("/api{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub fn routes(state: WebState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/", get(index))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .nest_service("/v1", v1::routes(state))
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn ping() -> Json<Value> {
    Json(json!({
        "message": "pong!"
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiIndex {
    version: &'static str,
}

/// Entry point listing the top level resources.
async fn index(Extension(base_url): Extension<Arc<BaseUrl>>) -> Json<hateoas::Response<ApiIndex>> {
    [
        "lines",
        "stations",
        "routes",
        "information",
        "favorites",
        "preferences",
        "map",
    ]
    .into_iter()
    .fold(
        hateoas::Response::builder(ApiIndex { version: "v1" }, base_url),
        |builder, relation| builder.link(relation, v1::resource!("/{}", relation)),
    )
    .build()
    .json()
}
