//! Generic response record
//!
//! Every field of the payload is kept as-is, except the two well-known
//! timestamps (`createdAt`, `updatedAt`) which are parsed into date-times.

use crate::error::ItemError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields that are parsed into date-times on population
pub const DATE_FIELDS: [&str; 2] = ["createdAt", "updatedAt"];

const ZONED_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a timestamp leniently.
///
/// Accepts RFC 3339, the same layout with a `+hhmm` offset or a space
/// separator, zone-less timestamps and bare dates. Zone-less input is UTC.
pub fn parse_date(input: &str) -> Option<DateTime<FixedOffset>> {
    let input = input.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed);
    }

    if let Some(parsed) = ZONED_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(input, format).ok())
    {
        return Some(parsed);
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| Utc.from_utc_datetime(&naive).into())
}

/// Canonical export form: RFC 3339, `Z` for UTC, fraction only when present
pub fn format_date(date: &DateTime<FixedOffset>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn is_date_field(key: &str) -> bool {
    DATE_FIELDS.contains(&key)
}

/// A stored field value
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    DateTime(DateTime<FixedOffset>),
    Value(Value),
}

impl Field {
    pub fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Field::DateTime(date) => Some(date),
            Field::Value(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Field::Value(value) => value.as_str(),
            Field::DateTime(_) => None,
        }
    }

    /// Serializable form of the field
    pub fn to_json(&self) -> Value {
        match self {
            Field::DateTime(date) => Value::String(format_date(date)),
            Field::Value(value) => value.clone(),
        }
    }
}

/// A dynamically populated result record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Item {
    fields: IndexMap<String, Field>,
}

impl Item {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store every pair of `data`, parsing the date fields.
    ///
    /// Existing keys are overwritten; an unparseable date aborts population.
    /// A `null` date is stored as-is.
    pub fn populate<I>(mut self, data: I) -> Result<Self, ItemError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        for (key, value) in data {
            let field = if is_date_field(&key) && !value.is_null() {
                Field::DateTime(parse_date_value(&key, &value)?)
            } else {
                Field::Value(value)
            };
            self.fields.insert(key, field);
        }
        Ok(self)
    }

    /// Build an item from a JSON object
    pub fn from_json(value: Value) -> Result<Self, ItemError> {
        match value {
            Value::Object(map) => Item::new().populate(map),
            other => Err(ItemError::NotAnObject {
                found: json_type_name(&other).to_string(),
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Field::as_str)
    }

    pub fn created_at(&self) -> Option<&DateTime<FixedOffset>> {
        self.get("createdAt").and_then(Field::as_datetime)
    }

    pub fn updated_at(&self) -> Option<&DateTime<FixedOffset>> {
        self.get("updatedAt").and_then(Field::as_datetime)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(key, field)| (key.as_str(), field))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Plain mapping of every stored field, dates as RFC 3339 strings
    pub fn to_mapping(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|(key, field)| (key.clone(), field.to_json()))
            .collect()
    }
}

fn parse_date_value(key: &str, value: &Value) -> Result<DateTime<FixedOffset>, ItemError> {
    value
        .as_str()
        .and_then(parse_date)
        .ok_or_else(|| ItemError::InvalidDate {
            field: key.to_string(),
            value: value.to_string(),
        })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, field) in &self.fields {
            map.serialize_entry(key, &field.to_json())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Item::new().populate(map).map_err(de::Error::custom)
    }
}
