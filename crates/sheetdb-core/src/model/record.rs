//! Record and header key types.
//!
//! A [`Record`] keeps its fields in header column order. That order is part of
//! the record's serialized form and therefore of its content hash.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Normalized identifier derived from a header cell.
///
/// One layer of surrounding quote characters stripped, then trimmed,
/// lower-cased, and internal whitespace runs collapsed into a single underscore.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderKey(String);

impl HeaderKey {
    /// Normalize a raw header cell. Returns `None` when nothing is left, which
    /// means the column is ignored.
    pub fn normalize(cell: &str) -> Option<Self> {
        let unquoted = strip_one_quote_layer(cell);
        let lowered = unquoted.trim().to_lowercase();

        let mut out = String::with_capacity(lowered.len());
        let mut in_ws = false;
        for ch in lowered.chars() {
            if ch.is_whitespace() {
                if !in_ws {
                    out.push('_');
                    in_ws = true;
                }
            } else {
                out.push(ch);
                in_ws = false;
            }
        }

        if out.is_empty() {
            None
        } else {
            Some(Self(out))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for HeaderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strip one leading and one trailing straight quote (`"` or `'`), each
/// independently.
pub(crate) fn strip_one_quote_layer(s: &str) -> &str {
    let s = s
        .strip_prefix('"')
        .or_else(|| s.strip_prefix('\''))
        .unwrap_or(s);
    s.strip_suffix('"')
        .or_else(|| s.strip_suffix('\''))
        .unwrap_or(s)
}

/// One projected row: header key to field value, in header column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field. A replaced field keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First candidate field that is present with a non-empty value.
    pub fn first_non_empty<'a, I, S>(&'a self, candidates: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        candidates
            .into_iter()
            .filter_map(|c| self.get(c.as_ref()))
            .find(|v| !v.is_empty())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Canonical serialized content: a JSON object in column order.
    pub fn to_canonical_json(&self) -> String {
        // Serializing string pairs into a String buffer cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of field name to string value")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
        let mut record = Record::new();
        while let Some((k, v)) = access.next_entry::<String, String>()? {
            record.insert(k, v);
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Record, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_normalization() {
        let cases = [
            ("Title EN", Some("title_en")),
            ("\"Name\"", Some("name")),
            ("  Name  ", Some("name")),
            // quotes are stripped before trimming, so padded quotes survive
            ("  \"Name\"  ", Some("\"name\"")),
            ("'Company'", Some("company")),
            ("Start   Date\tLocal", Some("start_date_local")),
            ("", None),
            ("   ", None),
            ("\"\"", None),
        ];
        for (raw, expected) in cases {
            assert_eq!(
                HeaderKey::normalize(raw).as_ref().map(HeaderKey::as_str),
                expected,
                "header {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_insert_keeps_position_on_replace() {
        let mut r = Record::new();
        r.insert("id", "1");
        r.insert("name", "A");
        r.insert("id", "2");
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["id", "name"]);
        assert_eq!(r.get("id"), Some("2"));
    }

    #[test]
    fn test_canonical_json_preserves_column_order() {
        let r: Record = [("name", "A"), ("id", "1")].into_iter().collect();
        assert_eq!(r.to_canonical_json(), r#"{"name":"A","id":"1"}"#);
    }

    #[test]
    fn test_serde_round_trip_keeps_order() {
        let r: Record = [("zeta", "z"), ("alpha", "a")].into_iter().collect();
        let json = serde_json::to_string(&r).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
        assert_eq!(back.keys().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_first_non_empty_skips_blank_values() {
        let r: Record = [("id", ""), ("name", "Ada")].into_iter().collect();
        assert_eq!(r.first_non_empty(["id", "name"]), Some("Ada"));
        assert_eq!(r.first_non_empty(["code"]), None);
    }
}
