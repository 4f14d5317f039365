use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::{
    color::Color,
    id::{HasId, Id},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tariff {
    pub kind: String,
    pub price_soles: f64,
    pub description: String,
}

impl Tariff {
    pub fn is_free(&self) -> bool {
        self.price_soles <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum NoticeKind {
    Maintenance,
    Interruption,
}

impl NoticeKind {
    pub fn color(&self) -> Color {
        match self {
            Self::Maintenance => Color::rgb(0xFF, 0xC1, 0x07),
            Self::Interruption => Color::rgb(0xF4, 0x43, 0x36),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceNotice {
    pub id: Id<MaintenanceNotice>,
    pub title: String,
    pub description: String,
    pub date: String,
    pub affected_lines: Vec<String>,
    pub kind: NoticeKind,
}

impl MaintenanceNotice {
    pub fn affects(&self, line_name: &str) -> bool {
        self.affected_lines.iter().any(|line| line == line_name)
    }
}

impl HasId for MaintenanceNotice {
    type IdType = u32;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SafetyTip {
    pub id: Id<SafetyTip>,
    pub title: String,
    pub description: String,
    pub icon: String,
}

impl HasId for SafetyTip {
    type IdType = u32;
}
