//! Wire types shared by all resources.

/// Serde adapter for Exact Online's `/Date(milliseconds)/` timestamps.
///
/// Use with `#[serde(default, with = "crate::types::exact_date")]` on
/// `Option<DateTime<Utc>>` fields. `null` maps to `None`. A trailing
/// offset such as `/Date(1700000000000+0100)/` is ignored because the
/// milliseconds are already UTC.
pub mod exact_date {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Write `/Date(ms)/`, or `null` for `None`.
    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&format_date(date)),
            None => serializer.serialize_none(),
        }
    }

    /// Read `/Date(ms)/`; `null` and `""` become `None`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.is_empty() => Ok(None),
            Some(raw) => parse_date(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid Exact Online date: {raw}"))),
        }
    }

    /// Render a timestamp as `/Date(ms)/`.
    pub fn format_date(date: &DateTime<Utc>) -> String {
        format!("/Date({})/", date.timestamp_millis())
    }

    /// Parse `/Date(ms)/`, falling back to RFC 3339.
    pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
        if let Some(inner) = raw
            .strip_prefix("/Date(")
            .and_then(|rest| rest.strip_suffix(")/"))
        {
            let digits_end = inner
                .char_indices()
                .skip(1)
                .find(|(_, c)| !c.is_ascii_digit())
                .map_or(inner.len(), |(i, _)| i);
            let millis: i64 = inner[..digits_end].parse().ok()?;
            return Utc.timestamp_millis_opt(millis).single();
        }

        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|date| date.with_timezone(&Utc))
    }
}

/// Decode JSON `null` as the type's default.
///
/// Exact Online sends `null` for empty scalar properties. Pair with
/// `default` so a missing key decodes the same way:
/// `#[serde(default, deserialize_with = "crate::types::null_as_default")]`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de> + Default,
{
    Ok(<Option<T> as serde::Deserialize>::deserialize(deserializer)?.unwrap_or_default())
}
