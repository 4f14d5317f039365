use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utility::{color::Color, id::HasId};

use crate::{preferences::Language, ExampleData};

/// Operational state of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum LineStatus {
    Operational,
    UnderConstruction,
    Planned,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown line status: {0:?}")]
pub struct ParseStatusError(pub String);

impl LineStatus {
    pub const ALL: [LineStatus; 3] = [
        LineStatus::Operational,
        LineStatus::UnderConstruction,
        LineStatus::Planned,
    ];

    pub fn color(&self) -> Color {
        match self {
            Self::Operational => Color::rgb(0x4C, 0xAF, 0x50),
            Self::UnderConstruction => Color::rgb(0xFF, 0xC1, 0x07),
            Self::Planned => Color::rgb(0x21, 0x96, 0xF3),
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Operational, Language::Spanish) => "Operativa",
            (Self::UnderConstruction, Language::Spanish) => "En construcción",
            (Self::Planned, Language::Spanish) => "Planificada",
            (Self::Operational, Language::English) => "Operational",
            (Self::UnderConstruction, Language::English) => "Under construction",
            (Self::Planned, Language::English) => "Planned",
        }
    }
}

impl fmt::Display for LineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(Language::English))
    }
}

/// Accepts the Spanish and English labels, case insensitive.
impl FromStr for LineStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| {
                [Language::Spanish, Language::English]
                    .into_iter()
                    .any(|language| status.label(language).to_lowercase() == normalized)
            })
            .ok_or_else(|| ParseStatusError(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub name: String,
    pub number: u32,
    pub color_hex: String,
    pub status: LineStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start_station: String,
    #[serde(default)]
    pub end_station: String,
}

impl Line {
    /// The line color, or `Color::DEFAULT` if `color_hex` is malformed.
    pub fn color(&self) -> Color {
        Color::parse_or_default(&self.color_hex)
    }
}

impl HasId for Line {
    type IdType = i64;
}

impl ExampleData for Line {
    fn example_data() -> Self {
        Self {
            name: "Línea 1".to_owned(),
            number: 1,
            color_hex: "#4CAF50".to_owned(),
            status: LineStatus::Operational,
            description: "Villa El Salvador - San Juan de Lurigancho".to_owned(),
            start_station: "Villa El Salvador".to_owned(),
            end_station: "Bayóvar".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_spanish_and_english_labels() {
        assert_eq!("Operativa".parse(), Ok(LineStatus::Operational));
        assert_eq!("en construcción".parse(), Ok(LineStatus::UnderConstruction));
        assert_eq!("Planned".parse(), Ok(LineStatus::Planned));
        assert_eq!(" under construction ".parse(), Ok(LineStatus::UnderConstruction));
    }

    #[test]
    fn unknown_status_is_an_error() {
        let result: Result<LineStatus, _> = "Operatva".parse();
        assert_eq!(result, Err(ParseStatusError("Operatva".to_owned())));
    }

    #[test]
    fn every_status_has_a_distinct_color() {
        let colors = LineStatus::ALL.map(|status| status.color());
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert!(colors.iter().all(|color| *color != Color::DEFAULT));
    }

    #[test]
    fn malformed_line_color_falls_back() {
        let mut line = Line::example_data();
        assert_eq!(line.color(), Color::rgb(0x4C, 0xAF, 0x50));
        line.color_hex = "green".to_owned();
        assert_eq!(line.color(), Color::DEFAULT);
    }

    #[test]
    fn status_serializes_camel_case() {
        let json = serde_json::to_string(&LineStatus::UnderConstruction).unwrap();
        assert_eq!(json, r#""underConstruction""#);
    }
}
