use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, State},
    http::Method,
    routing::{get, on},
    Extension, Router,
};
use model::{line::Line, station::Station, WithId};
use transit::RequestError;
use utility::{id::Id, let_also::LetAlso};

use crate::{
    common::{
        route_not_found, schema, HateoasResult, RouteErrorResponse, VecResponse,
        METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

use super::stations::station_hateoas;

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/lines{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<Line>))
        .route("/:id/stations", get(get_line_stations))
        .route("/:id", get(get_line))
        .route("/", get(get_lines))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_lines(
    original_uri: OriginalUri,
    State(WebState { transit_client, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<WithId<Line>>>> {
    transit_client
        .get_lines()
        .await
        .map(|lines| {
            lines
                .into_iter()
                .map(|line| line_hateoas(line, base_url.clone()))
                .collect::<Vec<_>>()
                .let_owned(|data| VecResponse::new(data).hateoas().json())
        })
        .map_err(|why| RouteErrorResponse::from(why).at(&Method::GET, &original_uri))
}

async fn get_line(
    original_uri: OriginalUri,
    Path(id): Path<i64>,
    State(WebState { transit_client, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<WithId<Line>> {
    transit_client
        .get_line(Id::new(id))
        .await
        .and_then(|line| line.ok_or(RequestError::NotFound))
        .map(|line| line_hateoas(line, base_url).json())
        .map_err(|why| RouteErrorResponse::from(why).at(&Method::GET, &original_uri))
}

async fn get_line_stations(
    original_uri: OriginalUri,
    Path(id): Path<i64>,
    State(WebState { transit_client, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<WithId<Station>>>> {
    let id = Id::<Line>::new(id);
    let result = async {
        // an unknown line is a missing resource, not an empty list
        transit_client
            .get_line(id.clone())
            .await?
            .ok_or(RequestError::NotFound)?;
        transit_client.get_stations_of_line(&id).await
    }
    .await;
    result
        .map(|stations| {
            stations
                .into_iter()
                .map(|station| station_hateoas(station, base_url.clone()))
                .collect::<Vec<_>>()
                .let_owned(|data| {
                    hateoas::Response::builder(VecResponse::new(data), base_url)
                        .link("self", resource!("/{}/stations", id.raw()))
                        .link("line", resource!("/{}", id.raw()))
                        .build()
                        .json()
                })
        })
        .map_err(|why| RouteErrorResponse::from(why).at(&Method::GET, &original_uri))
}

pub(crate) fn line_hateoas(
    line: WithId<Line>,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<WithId<Line>> {
    let id = line.id.raw();
    hateoas::Response::builder(line, base_url)
        .link("self", resource!("/{}", id))
        .link("stations", resource!("/{}/stations", id))
        .build()
}
