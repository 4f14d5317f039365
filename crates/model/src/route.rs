use std::ops::RangeInclusive;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ExampleData;

/// Travel time range, in minutes, of an estimated route.
pub const ESTIMATED_MINUTES: RangeInclusive<u32> = 15..=45;

/// Range of stations passed between origin and destination.
pub const ESTIMATED_INTERMEDIATE_STATIONS: RangeInclusive<u32> = 5..=20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteEstimate {
    pub origin: String,
    pub destination: String,
    pub minutes: u32,
    pub intermediate_stations: u32,
}

impl RouteEstimate {
    pub fn is_within_bounds(&self) -> bool {
        ESTIMATED_MINUTES.contains(&self.minutes)
            && ESTIMATED_INTERMEDIATE_STATIONS.contains(&self.intermediate_stations)
    }
}

impl ExampleData for RouteEstimate {
    fn example_data() -> Self {
        Self {
            origin: "Estación Villa El Salvador".to_owned(),
            destination: "Estación Bayóvar".to_owned(),
            minutes: 32,
            intermediate_stations: 12,
        }
    }
}
