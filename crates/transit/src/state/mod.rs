//! Observable state behind each screen of the app. Every holder publishes
//! snapshots through a `tokio::sync::watch` channel.

use tokio::task::JoinHandle;

mod favorites;
mod information;
mod lines;
mod preferences;
mod route_selection;
mod stations;

pub use favorites::{Favorites, FavoritesSnapshot};
pub use information::{InformationSnapshot, InformationState};
pub use lines::{LinesSnapshot, LinesState};
pub use preferences::Preferences;
pub use route_selection::{RouteSelectionSnapshot, RouteSelectionState};
pub use stations::{StationsSnapshot, StationsState};

/// Background task that keeps a holder in sync with the store. Aborted when
/// the holder is dropped.
#[derive(Debug)]
struct Follower(JoinHandle<()>);

impl Drop for Follower {
    fn drop(&mut self) {
        self.0.abort();
    }
}
