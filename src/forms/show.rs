use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::{ValidationErrors, REQUIRED};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    #[serde(deserialize_with = "text_or_number")]
    pub artist_id: String,
    #[serde(deserialize_with = "text_or_number")]
    pub venue_id: String,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowData {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: DateTime<FixedOffset>,
}

impl ShowForm {
    pub fn validate(&self) -> Result<ShowData, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let artist_id = id(&mut errors, "artist_id", &self.artist_id);
        let venue_id = id(&mut errors, "venue_id", &self.venue_id);
        let start_time = start_time(&mut errors, &self.start_time);

        match (artist_id, venue_id, start_time) {
            (Some(artist_id), Some(venue_id), Some(start_time)) if errors.is_empty() => {
                Ok(ShowData {
                    artist_id,
                    venue_id,
                    start_time,
                })
            }
            _ => Err(errors),
        }
    }
}

fn id(errors: &mut ValidationErrors, field: &'static str, value: &str) -> Option<i32> {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
        return None;
    }
    match value.parse::<i32>() {
        Ok(id) if id > 0 => Some(id),
        _ => {
            errors.add(field, "Must be a positive whole number.");
            None
        }
    }
}

fn start_time(errors: &mut ValidationErrors, value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if value.is_empty() {
        errors.add("start_time", REQUIRED);
        return None;
    }
    let parsed = parse_start_time(value);
    if parsed.is_none() {
        errors.add("start_time", "Not a valid datetime value.");
    }
    parsed
}

/// RFC 3339, or a naive `YYYY-MM-DD HH:MM[:SS]` read as UTC. Always returned
/// in UTC.
pub fn parse_start_time(value: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Some(time.with_timezone(&Utc).fixed_offset());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Field {
        Number(i64),
        Text(String),
    }

    Ok(match Field::deserialize(deserializer)? {
        Field::Number(n) => n.to_string(),
        Field::Text(text) => text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn accepts_form_and_json_shapes() {
        let form = ShowForm {
            artist_id: "4".into(),
            venue_id: "1".into(),
            start_time: "2019-05-21 21:30:00".into(),
        };
        let data = form.validate().unwrap();
        assert_eq!(data.artist_id, 4);
        assert_eq!(
            data.start_time,
            Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap().fixed_offset()
        );

        let form: ShowForm = serde_json::from_str(
            r#"{"artist_id": 5, "venue_id": "3", "start_time": "2035-04-01T20:00:00-07:00"}"#,
        )
        .unwrap();
        let data = form.validate().unwrap();
        assert_eq!((data.artist_id, data.venue_id), (5, 3));
        assert_eq!(
            data.start_time,
            Utc.with_ymd_and_hms(2035, 4, 2, 3, 0, 0).unwrap().fixed_offset()
        );
        assert_eq!(data.start_time.offset().local_minus_utc(), 0);
    }

    #[test]
    fn datetime_local_input_is_accepted() {
        assert!(parse_start_time("2035-04-01T20:00").is_some());
        assert!(parse_start_time("2035-04-01 20:00").is_some());
        assert!(parse_start_time("April 1st").is_none());
    }

    #[test]
    fn all_missing_fields_are_reported() {
        let errors = ShowForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn ids_must_be_positive_numbers() {
        let form = ShowForm {
            artist_id: "abc".into(),
            venue_id: "-2".into(),
            start_time: "2035-04-01 20:00".into(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field("artist_id").is_some());
        assert!(errors.field("venue_id").is_some());
        assert!(errors.field("start_time").is_none());
    }
}
