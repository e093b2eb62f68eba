// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! RFC 3339 text form for optional timestamps.
//!
//! Used with `#[serde(with = "crate::timestamp")]` on `Option<OffsetDateTime>`
//! fields so stored documents stay readable.

use serde::{Deserialize, Deserializer, Serializer};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Formats a timestamp as RFC 3339.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be represented in RFC 3339.
pub fn format(value: OffsetDateTime) -> Result<String, time::error::Format> {
    value.format(&Rfc3339)
}

/// Parses an RFC 3339 timestamp.
///
/// # Errors
///
/// Returns an error if the text is not a valid RFC 3339 timestamp.
pub fn parse(text: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(text, &Rfc3339)
}

/// Serializes an optional timestamp.
///
/// # Errors
///
/// Returns a serializer error if formatting fails.
#[allow(clippy::ref_option)]
pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(ts) => {
            let text: String = format(*ts).map_err(serde::ser::Error::custom)?;
            serializer.serialize_some(&text)
        }
        None => serializer.serialize_none(),
    }
}

/// Deserializes an optional timestamp.
///
/// # Errors
///
/// Returns a deserializer error if the text is not RFC 3339.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let text: Option<String> = Option::deserialize(deserializer)?;
    text.map(|t| parse(&t).map_err(serde::de::Error::custom))
        .transpose()
}
