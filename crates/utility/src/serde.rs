/// Serializes times of day the way they are shown to riders, `05:30 AM`.
///
/// Deserialization also accepts 24 hour `HH:MM` and `HH:MM:SS`.
pub mod clock_time {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize as _, Deserializer, Serializer};

    pub const FORMAT: &str = "%I:%M %p";

    pub fn format(time: &NaiveTime) -> String {
        time.format(FORMAT).to_string()
    }

    pub fn parse(s: &str) -> Option<NaiveTime> {
        let s = s.trim();
        NaiveTime::parse_from_str(s, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
            .ok()
    }

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).ok_or_else(|| Error::custom(format!("invalid time of day: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use serde::{Deserialize, Serialize};

    use super::clock_time;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Hours {
        #[serde(with = "clock_time")]
        opening: NaiveTime,
    }

    #[test]
    fn serializes_twelve_hour_clock() {
        let hours = Hours {
            opening: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
        };
        assert_eq!(
            serde_json::to_string(&hours).unwrap(),
            r#"{"opening":"10:00 PM"}"#
        );
    }

    #[test]
    fn parses_both_clock_styles() {
        let expected = NaiveTime::from_hms_opt(5, 30, 0).unwrap();
        assert_eq!(clock_time::parse("05:30 AM"), Some(expected));
        assert_eq!(clock_time::parse("05:30"), Some(expected));
        assert_eq!(clock_time::parse("05:30:00"), Some(expected));
        assert_eq!(clock_time::parse("half past five"), None);
    }

    #[test]
    fn rejects_invalid_time() {
        let result = serde_json::from_str::<Hours>(r#"{"opening":"25:99"}"#);
        assert!(result.is_err());
    }
}
