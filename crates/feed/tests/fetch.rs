use std::net::SocketAddr;

use axum::{http::StatusCode, routing::get, Router};
use feed::{FeedClient, FeedError, DEFAULT_FEED_URL};
use tokio::net::TcpListener;
use transit::feed::StationFeed;

const STATIONS: &str = r#"[
    {
        "id": 1,
        "nombre": "Estación Villa El Salvador",
        "linea": "Línea 1",
        "distrito": "Villa El Salvador",
        "horarioApertura": "05:30 AM",
        "horarioCierre": "10:00 PM",
        "alerta": "Mantenimiento el domingo",
        "latitud": -12.204444,
        "longitud": -76.940694
    },
    {
        "id": 2,
        "nombre": "Estación Ate",
        "linea": "Línea 2",
        "distrito": "Ate",
        "horarioApertura": "06:00 AM",
        "horarioCierre": "09:30 PM"
    }
]"#;

/// Serves `router` on an ephemeral local port.
async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn fetches_remote_stations() {
    let addr = serve(Router::new().route(
        "/stations.json",
        get(|| async { ([("content-type", "application/json")], STATIONS) }),
    ))
    .await;
    let client = FeedClient::new(format!("http://{}/stations.json", addr));

    let stations = client.fetch_remote_stations().await.unwrap();
    assert_eq!(stations.len(), 2);
    assert_eq!(stations[0].name, "Estación Villa El Salvador");
    assert_eq!(stations[0].alert.as_deref(), Some("Mantenimiento el domingo"));
    assert_eq!(stations[0].latitude, Some(-12.204444));
    // Should accept records without alert and coordinates.
    assert_eq!(stations[1].alert, None);
    assert_eq!(stations[1].longitude, None);
}

#[tokio::test]
async fn error_status_is_reported() {
    let addr = serve(Router::new().route(
        "/stations.json",
        get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    ))
    .await;
    let client = FeedClient::new(format!("http://{}/stations.json", addr));

    let result = client.fetch_remote_stations().await;
    assert!(matches!(
        result,
        Err(FeedError::Status(StatusCode::SERVICE_UNAVAILABLE))
    ));
}

#[tokio::test]
async fn malformed_document_is_a_decode_error() {
    let addr = serve(Router::new().route(
        "/stations.json",
        get(|| async { ([("content-type", "application/json")], r#"{"estaciones": []}"#) }),
    ))
    .await;
    let client = FeedClient::new(format!("http://{}/stations.json", addr));

    let result = client.fetch_remote_stations().await;
    assert!(matches!(result, Err(FeedError::Decode(_))));
}

#[tokio::test]
async fn unreachable_feed_is_a_request_error() {
    // bind and drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = FeedClient::new(format!("http://{}/stations.json", addr));

    let result = StationFeed::fetch_remote_stations(&client).await;
    assert!(matches!(result, Err(transit::RequestError::Other(_))));
}

#[test]
fn defaults_to_hosted_feed() {
    assert_eq!(FeedClient::default().url(), DEFAULT_FEED_URL);
}
