use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::HasId;

/// A station as published by the remote feed. Field names follow the feed
/// document; nothing is validated and the record never enters the store.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RemoteStation {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "linea")]
    pub line: String,
    #[serde(rename = "distrito")]
    pub district: String,
    #[serde(rename = "horarioApertura")]
    pub opening_time: String,
    #[serde(rename = "horarioCierre")]
    pub closing_time: String,
    #[serde(rename = "alerta", default)]
    pub alert: Option<String>,
    #[serde(rename = "latitud", default)]
    pub latitude: Option<f64>,
    #[serde(rename = "longitud", default)]
    pub longitude: Option<f64>,
}

impl HasId for RemoteStation {
    type IdType = i64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_feed_record_without_optionals() {
        let station: RemoteStation = serde_json::from_str(
            r#"{
                "id": 7,
                "nombre": "Estación Angamos",
                "linea": "Línea 1",
                "distrito": "Surquillo",
                "horarioApertura": "06:00 AM",
                "horarioCierre": "10:00 PM"
            }"#,
        )
        .unwrap();
        assert_eq!(station.name, "Estación Angamos");
        assert_eq!(station.alert, None);
        assert_eq!(station.latitude, None);
    }

    #[test]
    fn decodes_alert_and_coordinates() {
        let station: RemoteStation = serde_json::from_str(
            r#"{
                "id": 1,
                "nombre": "Estación Bayóvar",
                "linea": "Línea 1",
                "distrito": "San Juan de Lurigancho",
                "horarioApertura": "05:30 AM",
                "horarioCierre": "10:00 PM",
                "alerta": "Escaleras en mantenimiento",
                "latitud": -11.955833,
                "longitud": -76.9725
            }"#,
        )
        .unwrap();
        assert_eq!(station.alert.as_deref(), Some("Escaleras en mantenimiento"));
        assert_eq!(station.latitude.zip(station.longitude), Some((-11.955833, -76.9725)));
    }
}
