pub use crate::common::RouteResult;

use std::{net::SocketAddr, sync::Arc};

use axum::{extract::FromRef, Router};
use database::SqliteDatabase;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use transit::{
    client::Client,
    feed::StationFeed,
    route::RouteEstimator,
    state::{Favorites, InformationState, Preferences, RouteSelectionState},
};

pub mod api;
pub mod common;
pub mod config;
pub mod hateoas;
pub mod middleware;

#[derive(Clone, FromRef)]
pub struct WebState {
    pub transit_client: Client<SqliteDatabase>,
    pub route_estimator: Arc<dyn RouteEstimator>,
    pub route_selection: Arc<RouteSelectionState>,
    pub information: Arc<InformationState>,
    pub favorites: Arc<Favorites>,
    pub preferences: Arc<Preferences>,
}

impl WebState {
    /// Reference information, favorites and preferences start from their
    /// defaults. `station_feed` backs the route selection.
    pub fn new(
        transit_client: Client<SqliteDatabase>,
        route_estimator: Arc<dyn RouteEstimator>,
        station_feed: Arc<dyn StationFeed>,
    ) -> Self {
        Self {
            route_selection: Arc::new(RouteSelectionState::new(
                station_feed,
                route_estimator.clone(),
            )),
            transit_client,
            route_estimator,
            information: Arc::new(InformationState::default()),
            favorites: Arc::new(Favorites::default()),
            preferences: Arc::new(Preferences::default()),
        }
    }
}

pub fn app(state: WebState) -> Router {
    Router::new()
        .nest_service("/api", api::routes(state))
        .layer(TraceLayer::new_for_http())
}

pub async fn start_web_server(state: WebState, address: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(address).await?;
    log::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state).into_make_service()).await?;

    Ok(())
}
