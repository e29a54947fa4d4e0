//! Wire-format date handling. The store speaks RFC3339, but documents written
//! through its admin UI may carry bare `YYYY-MM-DD` dates, so parsing accepts
//! both.

pub mod option;

use serde::{Deserialize, Deserializer, Serializer};
use time::{
	Date, OffsetDateTime, format_description::well_known::Rfc3339, macros::format_description,
};

pub fn parse_date(raw: &str) -> Result<OffsetDateTime, time::error::Parse> {
	match OffsetDateTime::parse(raw, &Rfc3339) {
		Ok(value) => Ok(value),
		Err(err) => {
			let day_only = format_description!("[year]-[month]-[day]");

			Date::parse(raw, &day_only).map(|date| date.midnight().assume_utc()).map_err(|_| err)
		},
	}
}

pub fn serialize<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	let formatted = value.format(&Rfc3339).map_err(serde::ser::Error::custom)?;

	serializer.serialize_str(&formatted)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;

	parse_date(&raw).map_err(serde::de::Error::custom)
}

/// Serializer for derived date slots: `Some(None)` becomes an explicit null,
/// which is what clears a previously stored value.
pub fn serialize_derived<S>(
	value: &Option<Option<OffsetDateTime>>,
	serializer: S,
) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	match value {
		Some(Some(value)) => serialize(value, serializer),
		_ => serializer.serialize_none(),
	}
}
