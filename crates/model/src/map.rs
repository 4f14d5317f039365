use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const WEB_MAPS_SEARCH: &str = "https://www.google.com/maps/search/?api=1&query=";

/// A geographic point handed to an external map application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

impl MapPoint {
    pub fn new<S: Into<String>>(latitude: f64, longitude: f64, label: S) -> Self {
        Self {
            latitude,
            longitude,
            label: label.into(),
        }
    }

    /// Center of the Lima metro network.
    pub fn metro_de_lima() -> Self {
        Self::new(-12.0464, -77.0428, "Metro de Lima")
    }

    /// `geo:` URI understood by installed map applications.
    pub fn geo_uri(&self) -> String {
        format!(
            "geo:{},{}?q={}",
            self.latitude,
            self.longitude,
            encode_query(&self.label)
        )
    }

    /// Browser fallback when no map application is installed.
    pub fn web_url(&self) -> String {
        format!("{}{},{}", WEB_MAPS_SEARCH, self.latitude, self.longitude)
    }
}

fn encode_query(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}
