//! The fixed initial network: six lines and twenty stations.

use std::collections::HashMap;

use chrono::NaiveTime;
use model::{
    line::{Line, LineStatus},
    station::{Location, Station},
};
use serde::Serialize;

use crate::{
    client::Client,
    database::{Database, DatabaseOperations, DatabaseTransaction, Repo},
    RequestError, RequestResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum SeedOutcome {
    Seeded { lines: usize, stations: usize },
    AlreadyPopulated,
}

struct SeedLine {
    name: &'static str,
    number: u32,
    color_hex: &'static str,
    status: LineStatus,
    description: &'static str,
    start_station: &'static str,
    end_station: &'static str,
}

struct SeedStation {
    name: &'static str,
    line: &'static str,
    district: &'static str,
    hours: ((u32, u32), (u32, u32)),
    latitude: f64,
    longitude: f64,
    image: &'static str,
}

const LINES: [SeedLine; 6] = [
    SeedLine {
        name: "Línea 1",
        number: 1,
        color_hex: "#4CAF50",
        status: LineStatus::Operational,
        description: "Villa El Salvador - San Juan de Lurigancho",
        start_station: "Villa El Salvador",
        end_station: "Bayóvar",
    },
    SeedLine {
        name: "Línea 2",
        number: 2,
        color_hex: "#FFC107",
        status: LineStatus::UnderConstruction,
        description: "Ate - Callao",
        start_station: "Ate",
        end_station: "Guardia Chalaca",
    },
    SeedLine {
        name: "Línea 3",
        number: 3,
        color_hex: "#00BCD4",
        status: LineStatus::Planned,
        description: "Comas - San Juan de Miraflores",
        start_station: "Comas",
        end_station: "Angamos",
    },
    SeedLine {
        name: "Línea 4",
        number: 4,
        color_hex: "#F44336",
        status: LineStatus::Planned,
        description: "Aeropuerto - San Miguel",
        start_station: "Aeropuerto Jorge Chávez",
        end_station: "La Marina",
    },
    SeedLine {
        name: "Línea 5",
        number: 5,
        color_hex: "#E91E63",
        status: LineStatus::Planned,
        description: "Miraflores - Chorrillos",
        start_station: "Benavides",
        end_station: "Miguel Grau",
    },
    SeedLine {
        name: "Línea 6",
        number: 6,
        color_hex: "#9C27B0",
        status: LineStatus::Planned,
        description: "Independencia - San Borja",
        start_station: "Túpac Amaru",
        end_station: "Primavera",
    },
];

const LINE_1_HOURS: ((u32, u32), (u32, u32)) = ((5, 30), (22, 0));
const LINE_2_HOURS: ((u32, u32), (u32, u32)) = ((6, 0), (21, 30));
const LINE_3_HOURS: ((u32, u32), (u32, u32)) = ((6, 0), (22, 0));
const LINE_4_HOURS: ((u32, u32), (u32, u32)) = ((5, 0), (23, 0));
const LINE_5_HOURS: ((u32, u32), (u32, u32)) = ((6, 0), (22, 30));
const LINE_6_HOURS: ((u32, u32), (u32, u32)) = ((6, 0), (22, 0));

const STATIONS: [SeedStation; 20] = [
    SeedStation {
        name: "Estación Villa El Salvador",
        line: "Línea 1",
        district: "Villa El Salvador",
        hours: LINE_1_HOURS,
        latitude: -12.204444,
        longitude: -76.940694,
        image: "estacion3",
    },
    SeedStation {
        name: "Estación La Cultura",
        line: "Línea 1",
        district: "San Borja",
        hours: LINE_1_HOURS,
        latitude: -12.082167,
        longitude: -76.995367,
        image: "estacion1",
    },
    SeedStation {
        name: "Estación San Carlos",
        line: "Línea 1",
        district: "San Juan de Lurigancho",
        hours: LINE_1_HOURS,
        latitude: -11.9875,
        longitude: -76.9950,
        image: "estacion5",
    },
    SeedStation {
        name: "Estación Los Jardines",
        line: "Línea 1",
        district: "San Juan de Lurigancho",
        hours: LINE_1_HOURS,
        latitude: -11.981944,
        longitude: -76.990833,
        image: "estacion4",
    },
    SeedStation {
        name: "Estación Bayóvar",
        line: "Línea 1",
        district: "San Juan de Lurigancho",
        hours: LINE_1_HOURS,
        latitude: -11.955833,
        longitude: -76.972500,
        image: "estacion2",
    },
    SeedStation {
        name: "Estación Ate",
        line: "Línea 2",
        district: "Ate",
        hours: LINE_2_HOURS,
        latitude: -12.0430,
        longitude: -76.9340,
        image: "estacion6",
    },
    SeedStation {
        name: "Estación Santa Anita",
        line: "Línea 2",
        district: "Santa Anita",
        hours: LINE_2_HOURS,
        latitude: -12.0525,
        longitude: -76.9719,
        image: "estacion7",
    },
    SeedStation {
        name: "Estación Nicolás Ayllón",
        line: "Línea 2",
        district: "El Agustino",
        hours: LINE_2_HOURS,
        latitude: -12.0594,
        longitude: -77.0015,
        image: "estacion8",
    },
    SeedStation {
        name: "Estación 28 de Julio",
        line: "Línea 2",
        district: "Cercado de Lima",
        hours: LINE_2_HOURS,
        latitude: -12.0589,
        longitude: -77.0311,
        image: "estacion9",
    },
    SeedStation {
        name: "Estación Guardia Chalaca",
        line: "Línea 2",
        district: "Callao",
        hours: LINE_2_HOURS,
        latitude: -12.0521,
        longitude: -77.1163,
        image: "estacion10",
    },
    SeedStation {
        name: "Estación Comas",
        line: "Línea 3",
        district: "Comas",
        hours: LINE_3_HOURS,
        latitude: -11.9469,
        longitude: -77.0625,
        image: "estacion11",
    },
    SeedStation {
        name: "Estación Pizarro",
        line: "Línea 3",
        district: "Cercado de Lima",
        hours: LINE_3_HOURS,
        latitude: -12.0463,
        longitude: -77.0382,
        image: "estacion10",
    },
    SeedStation {
        name: "Estación Angamos",
        line: "Línea 3",
        district: "Surquillo",
        hours: LINE_3_HOURS,
        latitude: -12.1123,
        longitude: -77.0102,
        image: "estacion13",
    },
    SeedStation {
        name: "Estación Aeropuerto Jorge Chávez",
        line: "Línea 4",
        district: "Callao",
        hours: LINE_4_HOURS,
        latitude: -12.0247,
        longitude: -77.1128,
        image: "estacion14",
    },
    SeedStation {
        name: "Estación Elmer Faucett",
        line: "Línea 4",
        district: "Callao",
        hours: LINE_4_HOURS,
        latitude: -12.0350,
        longitude: -77.0990,
        image: "estacion10",
    },
    SeedStation {
        name: "Estación La Marina",
        line: "Línea 4",
        district: "San Miguel",
        hours: LINE_4_HOURS,
        latitude: -12.0763,
        longitude: -77.0857,
        image: "estacion10",
    },
    SeedStation {
        name: "Estación Benavides",
        line: "Línea 5",
        district: "Miraflores",
        hours: LINE_5_HOURS,
        latitude: -12.1232,
        longitude: -77.0155,
        image: "estacion17",
    },
    SeedStation {
        name: "Estación Miguel Grau",
        line: "Línea 5",
        district: "Chorrillos",
        hours: LINE_5_HOURS,
        latitude: -12.1833,
        longitude: -77.0178,
        image: "estacion18",
    },
    SeedStation {
        name: "Estación Túpac Amaru",
        line: "Línea 6",
        district: "Independencia",
        hours: LINE_6_HOURS,
        latitude: -11.9890,
        longitude: -77.0595,
        image: "estacion10",
    },
    SeedStation {
        name: "Estación Primavera",
        line: "Línea 6",
        district: "San Borja",
        hours: LINE_6_HOURS,
        latitude: -12.1054,
        longitude: -76.9905,
        image: "estacion10",
    },
];

fn time((hour, minute): (u32, u32)) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

pub fn seed_lines() -> Vec<Line> {
    LINES
        .iter()
        .map(|line| Line {
            name: line.name.to_owned(),
            number: line.number,
            color_hex: line.color_hex.to_owned(),
            status: line.status,
            description: line.description.to_owned(),
            start_station: line.start_station.to_owned(),
            end_station: line.end_station.to_owned(),
        })
        .collect()
}

pub fn seed_station_count() -> usize {
    STATIONS.len()
}

/// Inserts the seed network. Stations name their line by display name, which
/// is resolved against the lines inserted here.
async fn insert_seed<T>(tx: &mut T) -> RequestResult<SeedOutcome>
where
    T: DatabaseOperations + Send,
{
    let mut line_ids = HashMap::new();
    for line in seed_lines() {
        let inserted = tx.insert(line).await?;
        line_ids.insert(inserted.content.name.clone(), inserted.id);
    }
    for seed in STATIONS.iter() {
        let line_id = line_ids
            .get(seed.line)
            .cloned()
            .ok_or_else(|| RequestError::UnknownLine(seed.line.to_owned()))?;
        let (opening, closing) = seed.hours;
        let station = Station::new(
            seed.name,
            line_id,
            seed.district,
            Location::new(seed.latitude, seed.longitude),
        )
        .with_hours(time(opening), time(closing))
        .with_image(seed.image);
        tx.insert(station).await?;
    }
    Ok(SeedOutcome::Seeded {
        lines: line_ids.len(),
        stations: STATIONS.len(),
    })
}

impl<D> Client<D>
where
    D: Database,
{
    /// Seeds the store if it holds neither lines nor stations. A partially
    /// filled store is left untouched.
    pub async fn seed_if_empty(&self) -> RequestResult<SeedOutcome> {
        let mut tx = self.database.transaction().await?;
        let lines = Repo::<Line>::count(&mut tx).await?;
        let stations = Repo::<Station>::count(&mut tx).await?;
        if lines > 0 || stations > 0 {
            log::info!(
                "store already holds {} lines and {} stations, skipping seed",
                lines,
                stations
            );
            return Ok(SeedOutcome::AlreadyPopulated);
        }
        let outcome = insert_seed(&mut tx).await?;
        tx.commit().await?;
        log::info!("seeded store: {:?}", outcome);
        Ok(outcome)
    }

    /// Replaces all lines and stations by the seed network.
    pub async fn reset_to_seed(&self) -> RequestResult<SeedOutcome> {
        let mut tx = self.database.transaction().await?;
        let stations = Repo::<Station>::delete_all(&mut tx).await?;
        let lines = Repo::<Line>::delete_all(&mut tx).await?;
        let outcome = insert_seed(&mut tx).await?;
        tx.commit().await?;
        log::info!(
            "reset store, removed {} lines and {} stations: {:?}",
            lines,
            stations,
            outcome
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use utility::color::Color;

    use super::*;

    #[test]
    fn lines_are_numbered_one_to_six() {
        let numbers = seed_lines().iter().map(|line| line.number).collect::<Vec<_>>();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn line_colors_parse() {
        for line in seed_lines() {
            assert!(Color::parse(&line.color_hex).is_ok(), "{}", line.color_hex);
        }
    }

    #[test]
    fn every_station_names_a_seed_line() {
        let names = seed_lines()
            .into_iter()
            .map(|line| line.name)
            .collect::<HashSet<_>>();
        assert!(STATIONS.iter().all(|station| names.contains(station.line)));
        assert_eq!(seed_station_count(), 20);
    }

    #[test]
    fn stations_open_before_they_close() {
        for station in STATIONS.iter() {
            let (opening, closing) = station.hours;
            assert!(time(opening) < time(closing), "{}", station.name);
        }
    }
}
