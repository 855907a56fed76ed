//! Scheduled event records.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Wire/parse format for event dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Wire/parse format for event times.
pub const TIME_FORMAT: &str = "%H:%M";

/// A stored event. Ids are assigned by the store and never reused;
/// records are append-only — the only in-place mutation is `notified`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    pub id: i64,
    pub subject: String,
    #[serde(with = "date_fmt")]
    pub date: NaiveDate,
    #[serde(with = "time_fmt")]
    pub time: NaiveTime,
    #[serde(default)]
    pub description: String,
    /// Delivery state: set once the reminder for this event went out.
    #[serde(default)]
    pub notified: bool,
}

impl Event {
    pub fn date_str(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn time_str(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }
}

/// A validated event waiting to be inserted. Construction only happens
/// after date/time parsed against [`DATE_FORMAT`]/[`TIME_FORMAT`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventDraft {
    pub subject: String,
    #[serde(with = "date_fmt")]
    pub date: NaiveDate,
    #[serde(with = "time_fmt")]
    pub time: NaiveTime,
    #[serde(default)]
    pub description: String,
}

impl EventDraft {
    pub fn new(
        subject: impl Into<String>,
        date: NaiveDate,
        time: NaiveTime,
        description: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            date,
            time,
            description: description.into(),
        }
    }
}

mod date_fmt {
    use super::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(date: &NaiveDate, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(de)?;
        NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(D::Error::custom)
    }
}

mod time_fmt {
    use super::TIME_FORMAT;
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(time: &NaiveTime, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&time.format(TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(de)?;
        NaiveTime::parse_from_str(&s, TIME_FORMAT).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Event {
        Event {
            id: 1,
            subject: "Math".into(),
            date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
            time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            description: "Polynomials test".into(),
            notified: false,
        }
    }

    #[test]
    fn test_format_helpers() {
        let event = sample();
        assert_eq!(event.date_str(), "2025-03-20");
        assert_eq!(event.time_str(), "09:30");
    }

    #[test]
    fn test_event_json_roundtrip() {
        let event = sample();
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"2025-03-20\""));
        assert!(json.contains("\"09:30\""));
        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_draft_rejects_bad_date() {
        let json = r#"{"subject":"Math","date":"notadate","time":"09:30"}"#;
        assert!(serde_json::from_str::<EventDraft>(json).is_err());
    }

    #[test]
    fn test_draft_rejects_bad_time() {
        let json = r#"{"subject":"Math","date":"2025-03-20","time":"9 o'clock"}"#;
        assert!(serde_json::from_str::<EventDraft>(json).is_err());
    }
}
