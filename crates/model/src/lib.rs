use std::fmt::Debug;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use serde_with;
use utility::id::{HasId, Id};

pub mod favorite;
pub mod information;
pub mod line;
pub mod map;
pub mod preferences;
pub mod remote_station;
pub mod route;
pub mod station;

/// Representative values, used for documentation and json schema examples.
pub trait ExampleData {
    fn example_data() -> Self;
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WithDistance<T> {
    pub distance_km: f64,
    #[serde(flatten)]
    pub content: T,
}

impl<T> WithDistance<T> {
    pub fn new(distance_km: f64, content: T) -> Self {
        Self {
            distance_km,
            content,
        }
    }
}

/// A stored value together with the surrogate id the store assigned to it.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct WithId<V>
where
    V: HasId,
    V::IdType: Serialize + Debug + Clone,
{
    pub id: Id<V>,
    #[serde(flatten)]
    pub content: V,
}

impl<V> WithId<V>
where
    V: HasId,
    V::IdType: Serialize + Debug + Clone,
{
    pub fn new(id: Id<V>, content: V) -> Self {
        Self { id, content }
    }

    pub fn map<F>(self, f: F) -> Self
    where
        F: FnOnce(V) -> V,
    {
        Self::new(self.id, f(self.content))
    }
}
