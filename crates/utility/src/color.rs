use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An sRGB color with alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub alpha: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    MissingHash,
    InvalidLength(usize),
    InvalidDigit,
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHash => write!(f, "color must start with '#'"),
            Self::InvalidLength(len) => {
                write!(f, "expected 6 or 8 hex digits, got {}", len)
            }
            Self::InvalidDigit => write!(f, "color contains a non hex digit"),
        }
    }
}

impl std::error::Error for ColorParseError {}

impl Color {
    /// Used whenever a stored color can not be parsed.
    pub const DEFAULT: Color = Color::rgb(0x88, 0x88, 0x88);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            alpha: 0xFF,
            red,
            green,
            blue,
        }
    }

    /// Parses `#RRGGBB` or `#AARRGGBB`.
    pub fn parse(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex
            .trim()
            .strip_prefix('#')
            .ok_or(ColorParseError::MissingHash)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit);
        }
        let value = match digits.len() {
            6 => u32::from_str_radix(digits, 16)
                .map_err(|_| ColorParseError::InvalidDigit)?
                | 0xFF00_0000,
            8 => u32::from_str_radix(digits, 16)
                .map_err(|_| ColorParseError::InvalidDigit)?,
            len => return Err(ColorParseError::InvalidLength(len)),
        };
        let [alpha, red, green, blue] = value.to_be_bytes();
        Ok(Self {
            alpha,
            red,
            green,
            blue,
        })
    }

    pub fn parse_or_default(hex: &str) -> Self {
        Self::parse(hex).unwrap_or(Self::DEFAULT)
    }

    /// `#RRGGBB` for opaque colors, `#AARRGGBB` otherwise.
    pub fn to_hex(&self) -> String {
        if self.alpha == 0xFF {
            format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
        } else {
            format!(
                "#{:02X}{:02X}{:02X}{:02X}",
                self.alpha, self.red, self.green, self.blue
            )
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl JsonSchema for Color {
    fn schema_name() -> String {
        "Color".to_owned()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(gen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb() {
        let color = Color::parse("#4CAF50").unwrap();
        assert_eq!(color, Color::rgb(0x4C, 0xAF, 0x50));
    }

    #[test]
    fn parses_lowercase_and_argb() {
        let color = Color::parse("#80ffc107").unwrap();
        assert_eq!(color.alpha, 0x80);
        assert_eq!(color.red, 0xFF);
        assert_eq!(color.green, 0xC1);
        assert_eq!(color.blue, 0x07);
        assert_eq!(color.to_hex(), "#80FFC107");
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(Color::parse("4CAF50"), Err(ColorParseError::MissingHash));
        assert_eq!(Color::parse("#4CAF5"), Err(ColorParseError::InvalidLength(5)));
        assert_eq!(Color::parse("#4CAZ50"), Err(ColorParseError::InvalidDigit));
        assert_eq!(Color::parse("#+CAF50"), Err(ColorParseError::InvalidDigit));
    }

    #[test]
    fn malformed_falls_back_to_default() {
        assert_eq!(Color::parse_or_default("verde"), Color::DEFAULT);
        assert_eq!(Color::parse_or_default(""), Color::DEFAULT);
        assert_eq!(Color::DEFAULT.to_hex(), "#888888");
    }
}
