use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, on},
    Extension, Json, Router,
};
use model::information::{MaintenanceNotice, SafetyTip, Tariff};
use transit::state::InformationSnapshot;

use crate::{
    common::{route_not_found, VecResponse, METHOD_FILTER_ALL},
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/information{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/tariffs", get(get_tariffs))
        .route("/notices", get(get_notices))
        .route("/tips", get(get_tips))
        .route("/", get(get_information))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_information(
    State(WebState { information, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> Json<hateoas::Response<InformationSnapshot>> {
    hateoas::Response::builder(information.snapshot(), base_url)
        .link("tariffs", resource!("/tariffs"))
        .link("notices", resource!("/notices"))
        .link("tips", resource!("/tips"))
        .build()
        .json()
}

async fn get_tariffs(
    State(WebState { information, .. }): State<WebState>,
) -> Json<VecResponse<Tariff>> {
    VecResponse::new(information.snapshot().tariffs).json()
}

async fn get_notices(
    State(WebState { information, .. }): State<WebState>,
) -> Json<VecResponse<MaintenanceNotice>> {
    VecResponse::new(information.snapshot().notices).json()
}

async fn get_tips(
    State(WebState { information, .. }): State<WebState>,
) -> Json<VecResponse<SafetyTip>> {
    VecResponse::new(information.snapshot().tips).json()
}
