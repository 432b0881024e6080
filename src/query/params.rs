//! Filter values and the rendered query map handed to a [`Queryable`](super::Queryable).

use chrono::{DateTime, NaiveDateTime, TimeZone};
use indexmap::IndexMap;
use serde::Serialize;

/// Rendering for date-time filter values: no zone, no fractional seconds.
pub const FILTER_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Separator used when a list value is flattened into a single HTTP parameter.
pub const LIST_SEPARATOR: &str = ",";

/// A value attached to a filter key
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl FilterValue {
    /// Render the value the way the API expects it on the query string
    pub fn render(&self) -> String {
        match self {
            FilterValue::Bool(true) => "true".to_string(),
            FilterValue::Bool(false) => "false".to_string(),
            FilterValue::Integer(n) => n.to_string(),
            FilterValue::Float(f) => f.to_string(),
            FilterValue::Text(s) => s.clone(),
            FilterValue::DateTime(dt) => dt.format(FILTER_DATE_FORMAT).to_string(),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

macro_rules! impl_integer_filter_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FilterValue {
                fn from(value: $ty) -> Self {
                    FilterValue::Integer(i64::from(value))
                }
            }
        )*
    };
}

impl_integer_filter_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for FilterValue {
    fn from(value: f32) -> Self {
        FilterValue::Float(f64::from(value))
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Float(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<NaiveDateTime> for FilterValue {
    fn from(value: NaiveDateTime) -> Self {
        FilterValue::DateTime(value)
    }
}

// The zone is dropped on render, so keep the wall-clock time the caller wrote.
impl<Tz: TimeZone> From<DateTime<Tz>> for FilterValue {
    fn from(value: DateTime<Tz>) -> Self {
        FilterValue::DateTime(value.naive_local())
    }
}

/// A rendered parameter: either a single string or an ordered list of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    Single(String),
    List(Vec<String>),
}

impl QueryValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::Single(value) => Some(value.as_str()),
            QueryValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            QueryValue::Single(_) => None,
            QueryValue::List(values) => Some(values.as_slice()),
        }
    }

    /// Flatten into one parameter value, joining lists with [`LIST_SEPARATOR`]
    pub fn flatten(&self) -> String {
        match self {
            QueryValue::Single(value) => value.clone(),
            QueryValue::List(values) => values.join(LIST_SEPARATOR),
        }
    }
}

/// The flat, insertion-ordered parameter map produced by `Builder::build`.
///
/// A key that is absent means "not applied"; no empty sentinel is ever stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Query {
    params: IndexMap<String, QueryValue>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: QueryValue) {
        self.params.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.params.get(key)
    }

    /// Shortcut for single-valued parameters
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(QueryValue::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.params.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Key/value pairs ready for `reqwest::RequestBuilder::query`
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(key, value)| (key.clone(), value.flatten()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn sample_datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_milli_opt(7, 5, 30, 250))
            .expect("valid date")
    }

    #[test]
    fn test_bool_renders_as_literal_string() {
        assert_eq!(FilterValue::from(true).render(), "true");
        assert_eq!(FilterValue::from(false).render(), "false");
    }

    #[test]
    fn test_datetime_renders_without_zone_or_fraction() {
        let value = FilterValue::from(sample_datetime());
        assert_eq!(value.render(), "2024-03-09T07:05:30");
    }

    #[test]
    fn test_zoned_datetime_keeps_wall_clock_time() {
        let zoned = Utc.from_utc_datetime(&sample_datetime());
        assert_eq!(FilterValue::from(zoned).render(), "2024-03-09T07:05:30");
    }

    #[test]
    fn test_scalars_render_as_is() {
        assert_eq!(FilterValue::from(42u32).render(), "42");
        assert_eq!(FilterValue::from(-7i64).render(), "-7");
        assert_eq!(FilterValue::from(4.5).render(), "4.5");
        assert_eq!(FilterValue::from("en").render(), "en");
    }

    #[test]
    fn test_query_preserves_insertion_order() {
        let mut query = Query::new();
        query.insert("stars", QueryValue::Single("5".to_string()));
        query.insert("language", QueryValue::Single("en".to_string()));
        query.insert("perPage", QueryValue::Single("10".to_string()));

        let keys: Vec<&str> = query.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["stars", "language", "perPage"]);
    }

    #[test]
    fn test_to_pairs_joins_list_values() {
        let mut query = Query::new();
        query.insert(
            "orderBy",
            QueryValue::List(vec!["stars.desc".to_string(), "createdat.asc".to_string()]),
        );
        query.insert("page", QueryValue::Single("2".to_string()));

        assert_eq!(
            query.to_pairs(),
            vec![
                ("orderBy".to_string(), "stars.desc,createdat.asc".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_serializes_as_plain_map() {
        let mut query = Query::new();
        query.insert("isVerified", QueryValue::Single("true".to_string()));
        query.insert("orderBy", QueryValue::List(vec!["stars.desc".to_string()]));

        let json = serde_json::to_string(&query).unwrap();
        assert_eq!(json, r#"{"isVerified":"true","orderBy":["stars.desc"]}"#);
    }
}
