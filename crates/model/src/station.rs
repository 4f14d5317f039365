use chrono::NaiveTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::{
    geo::haversine_distance,
    id::{HasId, Id},
    serde::clock_time,
};

use crate::{line::Line, map::MapPoint, ExampleData};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn distance_km(&self, other: &Location) -> f64 {
        haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub name: String,
    pub line_id: Id<Line>,
    pub district: String,
    #[serde(with = "clock_time", default = "Station::default_opening_time")]
    #[schemars(with = "String")]
    pub opening_time: NaiveTime,
    #[serde(with = "clock_time", default = "Station::default_closing_time")]
    #[schemars(with = "String")]
    pub closing_time: NaiveTime,
    pub location: Location,
    pub image: Option<String>,
}

impl Station {
    /// A station with the default service hours, 05:00 AM to 10:00 PM.
    pub fn new<N, D>(name: N, line_id: Id<Line>, district: D, location: Location) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        Self {
            name: name.into(),
            line_id,
            district: district.into(),
            opening_time: Self::default_opening_time(),
            closing_time: Self::default_closing_time(),
            location,
            image: None,
        }
    }

    pub fn default_opening_time() -> NaiveTime {
        NaiveTime::from_hms_opt(5, 0, 0).unwrap_or_default()
    }

    pub fn default_closing_time() -> NaiveTime {
        NaiveTime::from_hms_opt(22, 0, 0).unwrap_or_default()
    }

    pub fn with_hours(mut self, opening_time: NaiveTime, closing_time: NaiveTime) -> Self {
        self.opening_time = opening_time;
        self.closing_time = closing_time;
        self
    }

    pub fn with_image<S: Into<String>>(mut self, image: S) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Whether trains serve the station at `time`. Service hours that pass
    /// midnight are supported.
    pub fn is_open_at(&self, time: NaiveTime) -> bool {
        if self.opening_time <= self.closing_time {
            self.opening_time <= time && time < self.closing_time
        } else {
            time >= self.opening_time || time < self.closing_time
        }
    }

    pub fn map_point(&self) -> MapPoint {
        MapPoint::new(self.location.latitude, self.location.longitude, &self.name)
    }
}

impl HasId for Station {
    type IdType = i64;
}

impl ExampleData for Station {
    fn example_data() -> Self {
        Station::new(
            "Estación La Cultura",
            Id::new(1),
            "San Borja",
            Location::new(-12.082167, -76.995367),
        )
        .with_hours(
            NaiveTime::from_hms_opt(5, 30, 0).unwrap_or_default(),
            NaiveTime::from_hms_opt(22, 0, 0).unwrap_or_default(),
        )
        .with_image("estacion1")
    }
}
