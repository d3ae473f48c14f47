// models/src/events.rs

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{RecordError, RecordResult};
use crate::identifiers::VertexId;

/// Timestamp layout of the `created_time` field: UTC, second resolution,
/// literal `Z`, no fractional seconds, no offsets.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// The wire shape of one input line. All three fields default to the empty
/// string when absent so that a missing field and an empty field fail
/// validation through the same path.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RawEvent {
    #[serde(default)]
    pub actor: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub created_time: String,
}

/// A validated interaction event: two vertex identifiers and the event time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InteractionEvent {
    pub actor: VertexId,
    pub target: VertexId,
    pub created_time: DateTime<Utc>,
}

impl InteractionEvent {
    /// Parses one line of the input stream.
    ///
    /// # Errors
    /// `RecordError::Malformed` if the line is not JSON, and the
    /// `TryFrom<RawEvent>` validation errors otherwise.
    pub fn from_json(line: &str) -> RecordResult<Self> {
        let raw: RawEvent = serde_json::from_str(line)?;
        Self::try_from(raw)
    }
}

impl TryFrom<RawEvent> for InteractionEvent {
    type Error = RecordError;

    fn try_from(raw: RawEvent) -> RecordResult<Self> {
        let actor =
            VertexId::new(raw.actor).map_err(|_| RecordError::MissingField("actor"))?;
        let target =
            VertexId::new(raw.target).map_err(|_| RecordError::MissingField("target"))?;
        if raw.created_time.is_empty() {
            return Err(RecordError::MissingField("created_time"));
        }
        let created_time = parse_timestamp(&raw.created_time)?;

        Ok(Self {
            actor,
            target,
            created_time,
        })
    }
}

/// Parses a `created_time` value into a UTC datetime. The format is strict;
/// anything but `YYYY-MM-DDTHH:MM:SSZ` is a discard-this-record condition.
pub fn parse_timestamp(raw: &str) -> RecordResult<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)?;
    Ok(naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::{InteractionEvent, parse_timestamp};
    use crate::errors::RecordError;
    use chrono::{TimeZone, Utc};

    #[test]
    fn should_parse_valid_record() {
        let line = r#"{"actor":"amy-raccoon","target":"bill-otter","created_time":"2016-04-07T03:33:19Z"}"#;
        let event = InteractionEvent::from_json(line).unwrap();
        assert_eq!(event.actor.as_ref(), "amy-raccoon");
        assert_eq!(event.target.as_ref(), "bill-otter");
        assert_eq!(
            event.created_time,
            Utc.with_ymd_and_hms(2016, 4, 7, 3, 33, 19).unwrap()
        );
    }

    #[test]
    fn should_reject_empty_actor() {
        let line = r#"{"actor":"","target":"bill-otter","created_time":"2016-04-07T03:33:19Z"}"#;
        let err = InteractionEvent::from_json(line).unwrap_err();
        assert!(matches!(err, RecordError::MissingField("actor")));
    }

    #[test]
    fn should_reject_missing_target() {
        let line = r#"{"actor":"amy-raccoon","created_time":"2016-04-07T03:33:19Z"}"#;
        let err = InteractionEvent::from_json(line).unwrap_err();
        assert!(matches!(err, RecordError::MissingField("target")));
    }

    #[test]
    fn should_reject_bad_timestamp() {
        let line = r#"{"actor":"amy-raccoon","target":"bill-otter","created_time":"2016-04-07 03:33:19"}"#;
        let err = InteractionEvent::from_json(line).unwrap_err();
        assert!(matches!(err, RecordError::Timestamp(_)));
    }

    #[test]
    fn should_reject_non_json_line() {
        let err = InteractionEvent::from_json("not a record").unwrap_err();
        assert!(matches!(err, RecordError::Malformed(_)));
    }

    #[test]
    fn should_reject_fractional_seconds() {
        assert!(parse_timestamp("2016-04-07T03:33:19.123Z").is_err());
    }

    #[test]
    fn should_parse_strict_timestamp() {
        let parsed = parse_timestamp("2016-04-07T03:33:19Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2016, 4, 7, 3, 33, 19).unwrap());
    }
}
