//! Document Store Module
//!
//! Registry of named tables. Every table-scoped operation fails with
//! `StoreError::NotFound` when the table is missing; a missing record is
//! reported as `None` or `false` instead.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::store::query::Query;
use crate::store::table::Table;
use crate::store::value::{Record, Schema, ID_FIELD};

// == Document Store ==
/// In-memory document store.
#[derive(Debug, Default)]
pub struct DocumentStore {
    tables: HashMap<String, Table>,
}

impl DocumentStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    // == Table Management ==
    /// Registers an empty table. The schema is kept as metadata only.
    pub fn create_table(&mut self, name: &str, schema: Schema) -> Result<()> {
        if self.tables.contains_key(name) {
            return Err(StoreError::AlreadyExists(name.to_string()));
        }
        self.tables.insert(name.to_string(), Table::new(schema));
        info!(table = name, "table created");
        Ok(())
    }

    /// Removes a table along with its records and indexes.
    pub fn drop_table(&mut self, name: &str) -> Result<()> {
        self.tables
            .remove(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        info!(table = name, "table dropped");
        Ok(())
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Names of all tables, sorted.
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn schema(&self, table: &str) -> Result<&Schema> {
        Ok(self.table(table)?.schema())
    }

    // == Indexes ==
    /// Starts a presence index on `field`, resetting any existing one.
    ///
    /// Indexes record which ids carried the field at insert time. Queries
    /// never consult them.
    pub fn create_index(&mut self, table: &str, field: &str) -> Result<()> {
        self.table_mut(table)?.create_index(field);
        info!(table, field, "index created");
        Ok(())
    }

    /// Number of ids tracked by the index on `field`, if one exists.
    pub fn index_size(&self, table: &str, field: &str) -> Result<Option<usize>> {
        Ok(self.table(table)?.index_size(field))
    }

    // == Records ==
    /// Stores `record` and returns it with its id filled in.
    pub fn insert(&mut self, table: &str, record: Record) -> Result<Record> {
        let stored = self.table_mut(table)?.insert(record)?;
        debug!(table, id = ?stored.get(ID_FIELD), "record inserted");
        Ok(stored)
    }

    pub fn find_by_id(&self, table: &str, id: &str) -> Result<Option<&Record>> {
        Ok(self.table(table)?.get(id))
    }

    /// Returns some record matching `query`. Which one is unspecified when
    /// several match.
    pub fn find_one(&self, table: &str, query: &Query) -> Result<Option<&Record>> {
        Ok(self.table(table)?.find_one(query))
    }

    /// Returns every matching record; `None` matches all of them.
    pub fn find_many(&self, table: &str, query: Option<&Query>) -> Result<Vec<&Record>> {
        let table = self.table(table)?;
        Ok(match query {
            Some(query) => table.find_many(query),
            None => table.find_many(&Query::new()),
        })
    }

    /// Merges `partial` into an existing record. Returns whether it existed.
    pub fn update(&mut self, table: &str, id: &str, partial: Record) -> Result<bool> {
        let updated = self.table_mut(table)?.update(id, partial);
        debug!(table, id, updated, "record update");
        Ok(updated)
    }

    /// Removes a record. Returns whether it existed.
    pub fn delete(&mut self, table: &str, id: &str) -> Result<bool> {
        let deleted = self.table_mut(table)?.delete(id);
        debug!(table, id, deleted, "record delete");
        Ok(deleted)
    }

    pub fn count(&self, table: &str, query: Option<&Query>) -> Result<usize> {
        let table = self.table(table)?;
        Ok(match query {
            Some(query) => table.count(query),
            None => table.len(),
        })
    }
}
