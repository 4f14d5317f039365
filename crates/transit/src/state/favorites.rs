use model::favorite::{FavoriteRoute, FavoriteStation, NewFavoriteRoute, NewFavoriteStation};
use serde::Serialize;
use tokio::sync::watch;
use utility::id::{HasId, Id};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesSnapshot {
    pub routes: Vec<FavoriteRoute>,
    pub stations: Vec<FavoriteStation>,
}

/// Bookmarked routes and stations, kept in memory for the session.
pub struct Favorites {
    state: watch::Sender<FavoritesSnapshot>,
}

fn next_id<T, F>(elements: &[T], id: F) -> Id<T>
where
    T: HasId<IdType = u32>,
    F: Fn(&T) -> u32,
{
    Id::new(elements.iter().map(id).max().unwrap_or(0) + 1)
}

impl Favorites {
    pub fn new(initial: FavoritesSnapshot) -> Self {
        let (state, _) = watch::channel(initial);
        Self { state }
    }

    /// No bookmarks at all.
    pub fn empty() -> Self {
        Self::new(FavoritesSnapshot::default())
    }

    pub fn subscribe(&self) -> watch::Receiver<FavoritesSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> FavoritesSnapshot {
        self.state.borrow().clone()
    }

    pub fn add_route(&self, route: NewFavoriteRoute) -> FavoriteRoute {
        let mut favorite = FavoriteRoute {
            id: Id::new(0),
            label: route.label,
            line: route.line,
        };
        self.state.send_modify(|state| {
            favorite.id = next_id(&state.routes, |route| route.id.raw());
            state.routes.push(favorite.clone());
        });
        favorite
    }

    pub fn add_station(&self, station: NewFavoriteStation) -> FavoriteStation {
        let mut favorite = FavoriteStation {
            id: Id::new(0),
            name: station.name,
            line: station.line,
            district: station.district,
        };
        self.state.send_modify(|state| {
            favorite.id = next_id(&state.stations, |station| station.id.raw());
            state.stations.push(favorite.clone());
        });
        favorite
    }

    /// Returns false if there is no such bookmark.
    pub fn remove_route(&self, id: Id<FavoriteRoute>) -> bool {
        self.state.send_if_modified(|state| {
            let before = state.routes.len();
            state.routes.retain(|route| route.id != id);
            state.routes.len() != before
        })
    }

    /// Returns false if there is no such bookmark.
    pub fn remove_station(&self, id: Id<FavoriteStation>) -> bool {
        self.state.send_if_modified(|state| {
            let before = state.stations.len();
            state.stations.retain(|station| station.id != id);
            state.stations.len() != before
        })
    }
}

/// Starts with a few sample bookmarks.
impl Default for Favorites {
    fn default() -> Self {
        let routes = [
            ("Villa El Salvador → San Juan", "Línea 1"),
            ("28 de Julio → Cabitos", "Línea 2"),
            ("Gamarra → Atocongo", "Línea 1"),
            ("San Juan → Villa El Salvador", "Línea 2"),
        ]
        .into_iter()
        .zip(1..)
        .map(|((label, line), id)| FavoriteRoute {
            id: Id::new(id),
            label: label.to_owned(),
            line: line.to_owned(),
        })
        .collect();
        let stations = [
            ("Estación Villa El Salvador", "Línea 1", "Villa El Salvador"),
            ("Estación 28 de Julio", "Línea 2", "La Victoria"),
            ("Estación Cabitos", "Línea 1", "San Juan de Miraflores"),
            ("Estación San Juan", "Línea 2", "San Juan de Miraflores"),
        ]
        .into_iter()
        .zip(1..)
        .map(|((name, line, district), id)| FavoriteStation {
            id: Id::new(id),
            name: name.to_owned(),
            line: line.to_owned(),
            district: district.to_owned(),
        })
        .collect();
        Self::new(FavoritesSnapshot { routes, stations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_samples() {
        let snapshot = Favorites::default().snapshot();
        assert_eq!(snapshot.routes.len(), 4);
        assert_eq!(snapshot.stations.len(), 4);
        assert_eq!(snapshot.routes[1].label, "28 de Julio → Cabitos");
    }

    #[test]
    fn new_ids_follow_the_largest() {
        let favorites = Favorites::default();
        assert!(favorites.remove_route(Id::new(2)));
        let added = favorites.add_route(NewFavoriteRoute {
            label: "Ate → Bayóvar".to_owned(),
            line: "Línea 2".to_owned(),
        });
        assert_eq!(added.id, Id::new(5));
    }

    #[test]
    fn first_bookmark_gets_id_one() {
        let favorites = Favorites::empty();
        let added = favorites.add_station(NewFavoriteStation {
            name: "Estación Comas".to_owned(),
            line: "Línea 3".to_owned(),
            district: "Comas".to_owned(),
        });
        assert_eq!(added.id, Id::new(1));
        assert_eq!(favorites.snapshot().stations, vec![added]);
    }

    #[test]
    fn removing_unknown_bookmark_changes_nothing() {
        let favorites = Favorites::default();
        let mut receiver = favorites.subscribe();
        assert!(!favorites.remove_station(Id::new(42)));
        assert!(!receiver.has_changed().unwrap());
        assert_eq!(favorites.snapshot().stations.len(), 4);
    }
}
