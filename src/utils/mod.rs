//! Serde and identifier helpers shared by the domain modules.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use gametracker_db::{parse_object_id, ObjectId};
use gametracker_http::error::AppError;

/// Parse a path identifier, reporting malformed values as a validation error
/// so callers can tell them apart from ids that simply do not exist.
pub fn parse_id(raw: &str, entity: &str) -> Result<ObjectId, AppError> {
    parse_object_id(raw)
        .map_err(|_| AppError::invalid_field("id", format!("Invalid {} id '{}'", entity, raw)))
}

/// Render an [`ObjectId`] as its 24 character hex string.
pub fn serialize_object_id<S>(id: &ObjectId, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&id.to_hex())
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
/// Use together with `#[serde(default)]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Calendar date supplied by clients, either `YYYY-MM-DD` or RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseDate(pub DateTime<Utc>);

impl ReleaseDate {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self(timestamp.with_timezone(&Utc)));
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|midnight| Self(midnight.and_utc()))
    }

    pub fn into_inner(self) -> DateTime<Utc> {
        self.0
    }
}

impl<'de> Deserialize<'de> for ReleaseDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| {
            de::Error::custom(format!(
                "invalid date '{}', expected YYYY-MM-DD or RFC 3339",
                raw
            ))
        })
    }
}

impl Serialize for ReleaseDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}
