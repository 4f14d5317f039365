use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::Method,
    routing::{get, on},
    Extension, Json, Router,
};
use chrono::NaiveTime;
use model::{station::Station, WithDistance, WithId};
use serde::Deserialize;
use transit::RequestError;
use utility::{id::Id, let_also::LetAlso, serde::clock_time};

use crate::{
    common::{
        route_not_found, schema, HateoasResult, RouteErrorResponse, RouteResult, VecResponse,
        METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

use super::MapHandoffDto;

/// Search radius of `/nearby` when the request names none.
const DEFAULT_NEARBY_RADIUS_KM: f64 = 1.0;

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/stations{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<Station>))
        .route("/nearby", get(get_nearby_stations))
        .route("/:id/map", get(get_station_map))
        .route("/:id", get(get_station))
        .route("/", get(get_stations))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StationsQuery {
    /// Part of the station name or district.
    query: Option<String>,
    /// Exact display name of a line.
    line: Option<String>,
    /// Time of day such as `06:00 AM`; keeps the stations served at that time.
    open_at: Option<String>,
}

async fn get_stations(
    original_uri: OriginalUri,
    State(WebState { transit_client, .. }): State<WebState>,
    Query(params): Query<StationsQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<WithId<Station>>>> {
    let query = params.query.unwrap_or_default();
    let open_at = match params.open_at.as_deref().map(parse_open_at).transpose() {
        Ok(open_at) => open_at,
        Err(why) => return Err(RouteErrorResponse::from(why).at(&Method::GET, &original_uri)),
    };
    transit_client
        .search_stations_on_line(&query, params.line.as_deref())
        .await
        .map(|stations| {
            stations
                .into_iter()
                .filter(|station| open_at.map_or(true, |time| station.content.is_open_at(time)))
                .map(|station| station_hateoas(station, base_url.clone()))
                .collect::<Vec<_>>()
                .let_owned(|data| VecResponse::new(data).hateoas().json())
        })
        .map_err(|why| RouteErrorResponse::from(why).at(&Method::GET, &original_uri))
}

fn parse_open_at(time: &str) -> Result<NaiveTime, RequestError> {
    clock_time::parse(time)
        .ok_or_else(|| RequestError::Invalid(format!("no time of day: {}", time)))
}

#[derive(Deserialize)]
struct NearbyQuery {
    latitude: f64,
    longitude: f64,
    radius: Option<f64>,
}

async fn get_nearby_stations(
    original_uri: OriginalUri,
    State(WebState { transit_client, .. }): State<WebState>,
    Query(params): Query<NearbyQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<WithDistance<hateoas::Response<WithId<Station>>>>> {
    let radius = params.radius.unwrap_or(DEFAULT_NEARBY_RADIUS_KM);
    transit_client
        .find_nearby_stations(params.latitude, params.longitude, radius)
        .await
        .map(|stations| {
            stations
                .into_iter()
                .map(|station| {
                    WithDistance::new(
                        station.distance_km,
                        station_hateoas(station.content, base_url.clone()),
                    )
                })
                .collect::<Vec<_>>()
                .let_owned(|data| VecResponse::new(data).hateoas().json())
        })
        .map_err(|why| RouteErrorResponse::from(why).at(&Method::GET, &original_uri))
}

async fn get_station(
    original_uri: OriginalUri,
    Path(id): Path<i64>,
    State(WebState { transit_client, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<WithId<Station>> {
    transit_client
        .get_station(Id::new(id))
        .await
        .and_then(|station| station.ok_or(RequestError::NotFound))
        .map(|station| station_hateoas(station, base_url).json())
        .map_err(|why| RouteErrorResponse::from(why).at(&Method::GET, &original_uri))
}

async fn get_station_map(
    original_uri: OriginalUri,
    Path(id): Path<i64>,
    State(WebState { transit_client, .. }): State<WebState>,
) -> RouteResult<Json<MapHandoffDto>> {
    transit_client
        .get_station(Id::new(id))
        .await
        .and_then(|station| station.ok_or(RequestError::NotFound))
        .map(|station| Json(station.content.map_point().into()))
        .map_err(|why| RouteErrorResponse::from(why).at(&Method::GET, &original_uri))
}

pub(crate) fn station_hateoas(
    station: WithId<Station>,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<WithId<Station>> {
    let id = station.id.raw();
    let line_id = station.content.line_id.raw();
    hateoas::Response::builder(station, base_url)
        .link("self", resource!("/{}", id))
        .link("line", super::lines::resource!("/{}", line_id))
        .link("map", resource!("/{}/map", id))
        .build()
}
