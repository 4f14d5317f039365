use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use database::{DatabaseConnectionInfo, SqliteDatabase};
use model::remote_station::RemoteStation;
use serde_json::{json, Value};
use tower::ServiceExt;
use transit::{
    feed::StationFeed, route::RandomRouteEstimator, server::Server, RequestError, RequestResult,
};
use web::{app, WebState};

struct FixedFeed;

#[async_trait]
impl StationFeed for FixedFeed {
    async fn fetch_remote_stations(&self) -> RequestResult<Vec<RemoteStation>> {
        Ok(vec![
            remote_station(1, "Estación Villa El Salvador"),
            remote_station(2, "Estación Bayóvar"),
        ])
    }
}

struct BrokenFeed;

#[async_trait]
impl StationFeed for BrokenFeed {
    async fn fetch_remote_stations(&self) -> RequestResult<Vec<RemoteStation>> {
        Err(RequestError::Invalid("feed is down".to_owned()))
    }
}

fn remote_station(id: i64, name: &str) -> RemoteStation {
    RemoteStation {
        id,
        name: name.to_owned(),
        line: "Línea 1".to_owned(),
        district: "Lima".to_owned(),
        opening_time: "05:30 AM".to_owned(),
        closing_time: "10:00 PM".to_owned(),
        alert: None,
        latitude: None,
        longitude: None,
    }
}

async fn seeded_app_with_feed(feed: Arc<dyn StationFeed>) -> Router {
    let database = SqliteDatabase::connect(DatabaseConnectionInfo::in_memory())
        .await
        .unwrap();
    let server = Server::new(database);
    server.bootstrap(false).await.unwrap();
    app(WebState::new(
        server.client("test"),
        Arc::new(RandomRouteEstimator::seeded(3)),
        feed,
    ))
}

async fn seeded_app() -> Router {
    seeded_app_with_feed(Arc::new(FixedFeed)).await
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

fn names(value: &Value) -> Vec<String> {
    value["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|element| element["name"].as_str().unwrap().to_owned())
        .collect()
}

#[tokio::test]
async fn ping() {
    let app = seeded_app().await;
    let (status, body) = get(&app, "/api/ping").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "pong!" }));
}

#[tokio::test]
async fn index_links_resources() {
    let app = seeded_app().await;
    let (status, body) = get(&app, "/api/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], "v1");
    assert!(body["links"]
        .as_array()
        .unwrap()
        .iter()
        .any(|link| link["href"] == "http://localhost/api/v1/stations"));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = seeded_app().await;
    let (status, body) = get(&app, "/api/v1/trains").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["httpMethod"], "GET");
    assert_eq!(body["requestedUri"], "/api/v1/trains");
}

#[tokio::test]
async fn lists_lines_by_number_with_links() {
    let app = seeded_app().await;
    let (status, body) = get(&app, "/api/v1/lines").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 6);
    let numbers = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|line| line["number"].as_u64().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);

    let first = &body["data"][0];
    assert_eq!(first["name"], "Línea 1");
    assert_eq!(first["status"], "operational");
    assert_eq!(first["links"][0]["rel"], "self");
    assert_eq!(first["links"][0]["href"], "http://localhost/api/v1/lines/1");
    assert_eq!(first["links"][1]["href"], "http://localhost/api/v1/lines/1/stations");
}

#[tokio::test]
async fn links_follow_forwarded_headers() {
    let app = seeded_app().await;
    let request = Request::builder()
        .uri("/api/v1/lines/2")
        .header("x-forwarded-proto", "https")
        .header("x-forwarded-host", "metro.example.org")
        .header("x-forwarded-prefix", "/transit")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body["links"][0]["href"],
        "https://metro.example.org/transit/api/v1/lines/2"
    );
}

#[tokio::test]
async fn line_details_and_missing_line() {
    let app = seeded_app().await;
    let (status, body) = get(&app, "/api/v1/lines/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Línea 2");
    assert_eq!(body["colorHex"], "#FFC107");

    let (status, body) = get(&app, "/api/v1/lines/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "not found");
}

#[tokio::test]
async fn stations_of_a_line() {
    let app = seeded_app().await;
    let (status, body) = get(&app, "/api/v1/lines/1/stations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 5);
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|station| station["lineId"] == 1));

    let (status, _) = get(&app, "/api/v1/lines/42/stations").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn filters_stations() {
    let app = seeded_app().await;
    let (_, all) = get(&app, "/api/v1/stations").await;
    assert_eq!(all["count"], 20);

    let (_, blank) = get(&app, "/api/v1/stations?query=%20%20").await;
    assert_eq!(blank["count"], 20);

    let (_, line_2) = get(&app, "/api/v1/stations?line=L%C3%ADnea%202").await;
    assert_eq!(line_2["count"], 5);

    let (_, santa_anita) = get(&app, "/api/v1/stations?query=san&line=L%C3%ADnea%202").await;
    assert_eq!(names(&santa_anita), vec!["Estación Santa Anita"]);

    let (status, unknown) = get(&app, "/api/v1/stations?line=L%C3%ADnea%209").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unknown["count"], 0);
}

#[tokio::test]
async fn filters_stations_by_service_hours() {
    let app = seeded_app().await;
    let (_, early) = get(&app, "/api/v1/stations?openAt=05:15").await;
    assert_eq!(early["count"], 3);

    let (_, dawn) = get(&app, "/api/v1/stations?openAt=05:45%20AM").await;
    assert_eq!(dawn["count"], 8);

    let (_, noon) = get(&app, "/api/v1/stations?openAt=12:00").await;
    assert_eq!(noon["count"], 20);

    let (_, late) = get(&app, "/api/v1/stations?openAt=10:45%20PM&line=L%C3%ADnea%204").await;
    assert_eq!(late["count"], 3);

    let (status, error) = get(&app, "/api/v1/stations?openAt=sunrise").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["status"], 400);
}

#[tokio::test]
async fn station_details_with_links() {
    let app = seeded_app().await;
    let (status, body) = get(&app, "/api/v1/stations/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Estación La Cultura");
    assert_eq!(body["openingTime"], "05:30 AM");
    assert_eq!(body["closingTime"], "10:00 PM");
    let relations = body["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|link| link["rel"].as_str().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(relations, vec!["self", "line", "map"]);

    let (status, body) = get(&app, "/api/v1/stations/1000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "not found");
}

#[tokio::test]
async fn station_map_handoff() {
    let app = seeded_app().await;
    let (status, body) = get(&app, "/api/v1/stations/2/map").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "Estación La Cultura");
    assert!(body["geoUri"].as_str().unwrap().starts_with("geo:"));
    assert!(body["webUrl"]
        .as_str()
        .unwrap()
        .starts_with("https://www.google.com/maps/search/"));
}

#[tokio::test]
async fn default_map_point() {
    let app = seeded_app().await;
    let (status, body) = get(&app, "/api/v1/map").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "Metro de Lima");
    assert_eq!(body["geoUri"], "geo:-12.0464,-77.0428?q=Metro+de+Lima");
}

#[tokio::test]
async fn nearby_stations_are_sorted() {
    let app = seeded_app().await;
    let (status, body) = get(
        &app,
        "/api/v1/stations/nearby?latitude=-12.082167&longitude=-76.995367&radius=2",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let distances = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|station| station["distanceKm"].as_f64().unwrap())
        .collect::<Vec<_>>();
    assert!(!distances.is_empty());
    assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(body["data"][0]["name"], "Estación La Cultura");

    let (status, _) = get(
        &app,
        "/api/v1/stations/nearby?latitude=-12.08&longitude=-76.99&radius=-1",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn estimates_route_between_stored_stations() {
    let app = seeded_app().await;
    let (status, body) = get(&app, "/api/v1/routes/1/5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["origin"], "Estación Villa El Salvador");
    assert_eq!(body["destination"], "Estación Bayóvar");
    let minutes = body["minutes"].as_u64().unwrap();
    let stations = body["intermediateStations"].as_u64().unwrap();
    assert!((15..=45).contains(&minutes));
    assert!((5..=20).contains(&stations));

    let (status, _) = get(&app, "/api/v1/routes/1/500").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn route_selection_over_remote_stations() {
    let app = seeded_app().await;
    let (_, before) = get(&app, "/api/v1/routes/remote-stations").await;
    assert_eq!(before["count"], 0);
    let (_, remote) = send(&app, Method::POST, "/api/v1/routes/remote-stations", None).await;
    assert_eq!(remote["count"], 2);
    assert_eq!(remote["data"][0]["nombre"], "Estación Villa El Salvador");

    let (status, _) = send(&app, Method::POST, "/api/v1/routes/selection/estimate", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::PUT, "/api/v1/routes/selection/origin/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, selection) =
        send(&app, Method::PUT, "/api/v1/routes/selection/origin/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(selection["origin"]["id"], 1);
    send(&app, Method::PUT, "/api/v1/routes/selection/destination/2", None).await;

    let (status, estimate) =
        send(&app, Method::POST, "/api/v1/routes/selection/estimate", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(estimate["destination"], "Estación Bayóvar");

    let (_, selection) = get(&app, "/api/v1/routes/selection").await;
    assert_eq!(selection["estimate"], estimate);

    // reading the list leaves the selection alone
    let (_, listed) = get(&app, "/api/v1/routes/remote-stations").await;
    assert_eq!(listed["count"], 2);
    let (_, selection) = get(&app, "/api/v1/routes/selection").await;
    assert_eq!(selection["origin"]["id"], 1);
    assert_eq!(selection["estimate"], estimate);
}

#[tokio::test]
async fn failing_feed_yields_no_remote_stations() {
    let app = seeded_app_with_feed(Arc::new(BrokenFeed)).await;
    let (status, body) = send(&app, Method::POST, "/api/v1/routes/remote-stations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn reference_information() {
    let app = seeded_app().await;
    let (_, tariffs) = get(&app, "/api/v1/information/tariffs").await;
    assert_eq!(tariffs["count"], 5);
    let (_, notices) = get(&app, "/api/v1/information/notices").await;
    assert_eq!(notices["count"], 2);
    let (_, tips) = get(&app, "/api/v1/information/tips").await;
    assert_eq!(tips["count"], 8);
}

#[tokio::test]
async fn bookmarks_routes_and_stations() {
    let app = seeded_app().await;
    let (_, before) = get(&app, "/api/v1/favorites/stations").await;
    let count = before["count"].as_u64().unwrap();

    let (status, added) = send(
        &app,
        Method::POST,
        "/api/v1/favorites/stations",
        Some(json!({ "name": "Estación Angamos", "line": "Línea 3", "district": "Surquillo" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = added["id"].as_u64().unwrap();

    let (_, after) = get(&app, "/api/v1/favorites/stations").await;
    assert_eq!(after["count"].as_u64().unwrap(), count + 1);

    let uri = format!("/api/v1/favorites/stations/{}", id);
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, route) = send(
        &app,
        Method::POST,
        "/api/v1/favorites/routes",
        Some(json!({ "label": "Casa - Trabajo", "line": "Línea 1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(route["label"], "Casa - Trabajo");
    let (_, all) = get(&app, "/api/v1/favorites").await;
    assert!(all["routes"]
        .as_array()
        .unwrap()
        .iter()
        .any(|favorite| favorite["label"] == "Casa - Trabajo"));
}

#[tokio::test]
async fn updates_preferences() {
    let app = seeded_app().await;
    let (_, defaults) = get(&app, "/api/v1/preferences").await;
    assert_eq!(defaults, json!({ "language": "spanish", "theme": "system" }));

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/api/v1/preferences",
        Some(json!({ "theme": "dark" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, json!({ "language": "spanish", "theme": "dark" }));
}

#[tokio::test]
async fn reset_restores_seed_network() {
    let app = seeded_app().await;
    let (status, body) = send(&app, Method::POST, "/api/v1/admin/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "outcome": "seeded", "lines": 6, "stations": 20 }));

    let (_, lines) = get(&app, "/api/v1/lines").await;
    assert_eq!(lines["count"], 6);
}

#[tokio::test]
async fn line_schema() {
    let app = seeded_app().await;
    let (status, schema) = get(&app, "/api/v1/lines/schema").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(schema["title"], "Line");

    let (_, example) = get(&app, "/api/v1/lines/schema?exampleData=true").await;
    assert!(example.to_string().contains("Línea 1"));
}
