use std::convert::Infallible;

use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, on},
    Router,
};
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use transit::RequestResult;

use crate::{
    common::{route_not_found, VecResponse, METHOD_FILTER_ALL},
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/lines", get(lines_events))
        .route("/stations", get(stations_events))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

/// Sends the current lines, then again after every change of the store.
async fn lines_events(
    State(WebState { transit_client, .. }): State<WebState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    log::debug!("lines subscriber connected");
    let stream = transit_client
        .watch_lines()
        .map(|lines| Ok(to_event("lines", lines)));
    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[derive(Deserialize)]
struct StationsEventsQuery {
    query: Option<String>,
    line: Option<String>,
}

/// Like `lines_events` for the stations matching `query`, narrowed to the
/// line named `line` if given.
async fn stations_events(
    State(WebState { transit_client, .. }): State<WebState>,
    Query(params): Query<StationsEventsQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    log::debug!("stations subscriber connected");
    let stream = transit_client
        .watch_search_on_line(params.query.unwrap_or_default(), params.line)
        .map(|stations| Ok(to_event("stations", stations)));
    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEvent {
    message: String,
}

fn to_event<T: Serialize>(name: &str, result: RequestResult<Vec<T>>) -> Event {
    let event = Event::default().event(name);
    let encoded = match result {
        Ok(data) => event.json_data(VecResponse::new(data)),
        Err(why) => {
            log::warn!("{} query failed: {}", name, why);
            Event::default().event("error").json_data(ErrorEvent {
                message: why.to_string(),
            })
        }
    };
    encoded.unwrap_or_else(|why| {
        log::error!("could not encode {} event: {}", name, why);
        Event::default().event("error").data("could not encode event")
    })
}
