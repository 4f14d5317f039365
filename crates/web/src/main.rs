use std::{process::ExitCode, sync::Arc};

use database::SqliteDatabase;
use feed::FeedClient;
use tracing_subscriber::EnvFilter;
use transit::{route::RandomRouteEstimator, server::Server};
use web::{config::Config, start_web_server, WebState};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    // http request traces
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    if let Err(why) = tracing::subscriber::set_global_default(subscriber) {
        log::warn!("request tracing disabled: {}", why);
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(why) => {
            log::error!("{}", why);
            return ExitCode::FAILURE;
        }
    };

    // database
    let database = match SqliteDatabase::connect(config.database_connection_info()).await {
        Ok(database) => database,
        Err(why) => {
            log::error!("could not connect to {}: {}", config.database_url, why);
            return ExitCode::FAILURE;
        }
    };

    // server
    let server = Server::new(database);
    match server.bootstrap(config.reset_on_start).await {
        Ok(outcome) => log::info!("bootstrap: {:?}", outcome),
        Err(why) => {
            log::error!("could not prepare the store: {}", why);
            return ExitCode::FAILURE;
        }
    }

    // web server
    let state = WebState::new(
        server.client("REST API"),
        Arc::new(RandomRouteEstimator::default()),
        Arc::new(FeedClient::new(config.feed_url.clone())),
    );
    if let Err(why) = start_web_server(state, config.bind_address).await {
        log::error!("web server stopped: {}", why);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
