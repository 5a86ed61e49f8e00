//! The replay record type
//!
//! A record is a flat, ordered mapping from field name to string value.
//! The parser produces the conventional field set (`id`, `sentinel`,
//! `scourge`, `version`, `event`, `rating`, `dl_count`, `date`, `link`),
//! but the index stores and round-trips any field set.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name of the required identifier field.
pub const FIELD_ID: &str = "id";

/// One replay record: named string fields in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    /// Creates an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, appending it if the name is new
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Gets a field value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The record's stable identifier, if present
    pub fn id(&self) -> Option<&str> {
        self.get(FIELD_ID)
    }

    /// Iterates over `(name, value)` pairs in insertion order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut record = Record::new();
        record.insert("id", "4242");
        record.insert("sentinel", "EHOME");

        assert_eq!(record.get("id"), Some("4242"));
        assert_eq!(record.get("sentinel"), Some("EHOME"));
        assert_eq!(record.get("scourge"), None);
        assert_eq!(record.id(), Some("4242"));
    }

    #[test]
    fn test_fields_keep_insertion_order() {
        let record = Record::from_iter([("id", "1"), ("sentinel", "LGD"), ("date", "2010-07-02")]);

        let names: Vec<&str> = record.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["id", "sentinel", "date"]);
    }

    #[test]
    fn test_reinsert_overwrites_without_reordering() {
        let mut record = Record::from_iter([("id", "1"), ("event", "ESWC")]);
        record.insert("id", "2");

        assert_eq!(record.id(), Some("2"));
        let names: Vec<&str> = record.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["id", "event"]);
    }

    #[test]
    fn test_json_round_trip_preserves_field_order() {
        let record = Record::from_iter([("id", "77"), ("scourge", "Nirvana.cn"), ("rating", "9")]);

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":"77","scourge":"Nirvana.cn","rating":"9"}"#);

        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
