use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

/// A bookmarked trip between two stations. Held in memory only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRoute {
    pub id: Id<FavoriteRoute>,
    pub label: String,
    pub line: String,
}

impl HasId for FavoriteRoute {
    type IdType = u32;
}

/// A bookmarked station. Held in memory only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStation {
    pub id: Id<FavoriteStation>,
    pub name: String,
    pub line: String,
    pub district: String,
}

impl HasId for FavoriteStation {
    type IdType = u32;
}

/// Body of a request to bookmark a route.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewFavoriteRoute {
    pub label: String,
    pub line: String,
}

/// Body of a request to bookmark a station.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewFavoriteStation {
    pub name: String,
    pub line: String,
    pub district: String,
}
