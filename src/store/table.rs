//! Table Module
//!
//! Record storage for a single table together with its presence indexes.

use std::collections::{HashMap, HashSet};

use serde_json::Value;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::store::query::Query;
use crate::store::value::{Record, Schema, ID_FIELD};

// == Table ==
/// One named collection of records.
///
/// `indexes` maps a field name to the ids of records that carried that
/// field when inserted. The sets are write-only: queries scan `records`
/// and never read them, and deletes do not prune them.
#[derive(Debug, Default)]
pub struct Table {
    schema: Schema,
    records: HashMap<String, Record>,
    indexes: HashMap<String, HashSet<String>>,
}

impl Table {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            records: HashMap::new(),
            indexes: HashMap::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    // == Create Index ==
    /// Starts tracking `field`. An existing index on the field is reset.
    pub fn create_index(&mut self, field: &str) {
        self.indexes.insert(field.to_string(), HashSet::new());
    }

    /// Number of ids tracked for `field`, or `None` without an index.
    pub fn index_size(&self, field: &str) -> Option<usize> {
        self.indexes.get(field).map(HashSet::len)
    }

    #[cfg(test)]
    pub(crate) fn index_contains(&self, field: &str, id: &str) -> bool {
        self.indexes
            .get(field)
            .is_some_and(|ids| ids.contains(id))
    }

    // == Insert ==
    /// Stores `record`, minting an id when it has none.
    ///
    /// An existing record with the same id is replaced.
    pub fn insert(&mut self, mut record: Record) -> Result<Record> {
        let id = match record_id(&record)? {
            Some(id) => id,
            None => self.mint_id(),
        };
        record.insert(ID_FIELD.to_string(), Value::String(id.clone()));

        for (field, ids) in self.indexes.iter_mut() {
            if record.contains_key(field) {
                ids.insert(id.clone());
            }
        }

        self.records.insert(id, record.clone());
        Ok(record)
    }

    fn mint_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.records.contains_key(&id) {
                return id;
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }

    pub fn find_one(&self, query: &Query) -> Option<&Record> {
        self.records.values().find(|record| query.matches(record))
    }

    pub fn find_many(&self, query: &Query) -> Vec<&Record> {
        self.records
            .values()
            .filter(|record| query.matches(record))
            .collect()
    }

    pub fn count(&self, query: &Query) -> usize {
        if query.is_empty() {
            return self.records.len();
        }
        self.records
            .values()
            .filter(|record| query.matches(record))
            .count()
    }

    // == Update ==
    /// Merges `partial` into the record with `id`.
    ///
    /// Fields not named in `partial` are kept. The `id` field is skipped so
    /// the stored identifier keeps matching its key.
    pub fn update(&mut self, id: &str, partial: Record) -> bool {
        let Some(record) = self.records.get_mut(id) else {
            return false;
        };
        for (field, value) in partial {
            if field != ID_FIELD {
                record.insert(field, value);
            }
        }
        true
    }

    pub fn delete(&mut self, id: &str) -> bool {
        self.records.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Reads the caller-supplied id. Null and empty strings count as absent.
fn record_id(record: &Record) -> Result<Option<String>> {
    match record.get(ID_FIELD) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(id)) if id.is_empty() => Ok(None),
        Some(Value::String(id)) => Ok(Some(id.clone())),
        Some(other) => Err(StoreError::InvalidRecord(format!(
            "'{}' must be a string, got {}",
            ID_FIELD, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn test_insert_keeps_supplied_id() {
        let mut table = Table::default();
        let stored = table.insert(record(json!({"id": "u1", "name": "a"}))).unwrap();
        assert_eq!(stored["id"], "u1");
        assert_eq!(table.get("u1"), Some(&stored));
    }

    #[test]
    fn test_insert_mints_id_for_null_or_empty() {
        let mut table = Table::default();
        let a = table.insert(record(json!({"id": null}))).unwrap();
        let b = table.insert(record(json!({"id": ""}))).unwrap();
        let a_id = a["id"].as_str().unwrap();
        let b_id = b["id"].as_str().unwrap();
        assert!(!a_id.is_empty());
        assert_ne!(a_id, b_id);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_insert_rejects_non_string_id() {
        let mut table = Table::default();
        let err = table.insert(record(json!({"id": 7}))).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRecord(_)));
        assert!(table.is_empty());
    }

    #[test]
    fn test_minted_id_is_appended_last() {
        let mut table = Table::default();
        let stored = table.insert(record(json!({"b": 1, "a": 2}))).unwrap();
        let keys: Vec<&str> = stored.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "id"]);
    }

    #[test]
    fn test_colliding_id_overwrites() {
        let mut table = Table::default();
        table.insert(record(json!({"id": "x", "v": 1, "old": true}))).unwrap();
        table.insert(record(json!({"id": "x", "v": 2}))).unwrap();
        assert_eq!(table.len(), 1);
        let stored = table.get("x").unwrap();
        assert_eq!(stored["v"], 2);
        assert!(!stored.contains_key("old"));
    }

    #[test]
    fn test_index_tracks_records_with_field() {
        let mut table = Table::default();
        table.create_index("email");
        table.insert(record(json!({"id": "a", "email": "a@x"}))).unwrap();
        table.insert(record(json!({"id": "b"}))).unwrap();

        assert_eq!(table.index_size("email"), Some(1));
        assert!(table.index_contains("email", "a"));
        assert!(!table.index_contains("email", "b"));
        assert_eq!(table.index_size("name"), None);
    }

    #[test]
    fn test_index_only_sees_inserts_after_creation() {
        let mut table = Table::default();
        table.insert(record(json!({"id": "early", "email": "e@x"}))).unwrap();
        table.create_index("email");
        table.insert(record(json!({"id": "late", "email": "l@x"}))).unwrap();

        assert!(!table.index_contains("email", "early"));
        assert!(table.index_contains("email", "late"));
    }

    #[test]
    fn test_index_not_pruned_on_delete() {
        let mut table = Table::default();
        table.create_index("email");
        table.insert(record(json!({"id": "a", "email": "a@x"}))).unwrap();
        assert!(table.delete("a"));

        assert!(table.get("a").is_none());
        assert!(table.index_contains("email", "a"));
    }

    #[test]
    fn test_recreating_index_resets_it() {
        let mut table = Table::default();
        table.create_index("email");
        table.insert(record(json!({"id": "a", "email": "a@x"}))).unwrap();
        table.create_index("email");
        assert_eq!(table.index_size("email"), Some(0));
    }

    #[test]
    fn test_update_merges_and_ignores_id() {
        let mut table = Table::default();
        table.insert(record(json!({"id": "a", "x": 1, "y": 2}))).unwrap();

        assert!(table.update("a", record(json!({"y": 3, "z": 4, "id": "b"}))));
        let stored = table.get("a").unwrap();
        assert_eq!(stored["id"], "a");
        assert_eq!(stored["x"], 1);
        assert_eq!(stored["y"], 3);
        assert_eq!(stored["z"], 4);
        assert!(table.get("b").is_none());
    }

    #[test]
    fn test_update_missing_record() {
        let mut table = Table::default();
        assert!(!table.update("nope", record(json!({"x": 1}))));
    }

    #[test]
    fn test_count_with_and_without_query() {
        let mut table = Table::default();
        for n in 0..5 {
            table.insert(record(json!({"n": n}))).unwrap();
        }
        assert_eq!(table.count(&Query::new()), 5);
        assert_eq!(table.count(&Query::new().lt("n", 2)), 2);
        assert_eq!(table.find_many(&Query::new().gte("n", 3)).len(), 2);
    }
}
