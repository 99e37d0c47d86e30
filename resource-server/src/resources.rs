//! Record storage and the validation rules of each verb.
//!
//! # Invariants
//! - Ids are assigned by the server, start at 1 and are never reused.
//! - A create body must not carry an id; update bodies must carry the id of
//!   the path and that record must exist.
//! - Records are stored as received: embedded references are snapshots.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

/// Collections served under `/api`.
pub const COLLECTIONS: [&str; 3] = ["expenses", "groups", "user-profiles"];

/// A request the store refused, rendered as a problem response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub title: String,
    pub error_key: &'static str,
}

impl ApiError {
    fn bad_request(title: &str, error_key: &'static str) -> Self {
        Self {
            status: 400,
            title: title.to_string(),
            error_key,
        }
    }

    fn not_found(title: &str) -> Self {
        Self {
            status: 404,
            title: title.to_string(),
            error_key: "notfound",
        }
    }
}

#[derive(Debug)]
struct Collection {
    records: BTreeMap<i64, Map<String, Value>>,
    next_id: i64,
}

impl Default for Collection {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// All collections, keyed by their path segment.
#[derive(Debug)]
pub struct ResourceStore {
    collections: HashMap<&'static str, Collection>,
}

impl Default for ResourceStore {
    fn default() -> Self {
        Self {
            collections: COLLECTIONS
                .iter()
                .map(|name| (*name, Collection::default()))
                .collect(),
        }
    }
}

impl ResourceStore {
    /// Every record of `collection` in id order.
    pub fn list(&self, collection: &str) -> Result<Vec<Value>, ApiError> {
        let records = &self.collection(collection)?.records;
        Ok(records.values().cloned().map(Value::Object).collect())
    }

    pub fn get(&self, collection: &str, id: i64) -> Result<Value, ApiError> {
        self.collection(collection)?
            .records
            .get(&id)
            .cloned()
            .map(Value::Object)
            .ok_or_else(|| ApiError::not_found("Entity not found"))
    }

    pub fn create(&mut self, collection: &str, body: Value) -> Result<Value, ApiError> {
        let mut record = into_object(body)?;
        if body_id(&record).is_some() {
            return Err(ApiError::bad_request(
                &format!("A new {} cannot already have an ID", entity_name(collection)),
                "idexists",
            ));
        }
        let target = self.collection_mut(collection)?;
        let id = target.next_id;
        target.next_id += 1;
        record.insert("id".to_string(), Value::from(id));
        target.records.insert(id, record.clone());
        Ok(Value::Object(record))
    }

    /// Replace the whole record.
    pub fn replace(&mut self, collection: &str, id: i64, body: Value) -> Result<Value, ApiError> {
        let record = into_object(body)?;
        let target = self.existing_target(collection, id, &record)?;
        target.records.insert(id, record.clone());
        Ok(Value::Object(record))
    }

    /// Overwrite only the non-null attributes present in `body`.
    pub fn merge(&mut self, collection: &str, id: i64, body: Value) -> Result<Value, ApiError> {
        let patch = into_object(body)?;
        let target = self.existing_target(collection, id, &patch)?;
        let existing = target
            .records
            .get_mut(&id)
            .ok_or_else(|| ApiError::not_found("Entity not found"))?;
        for (key, value) in patch {
            if !value.is_null() {
                existing.insert(key, value);
            }
        }
        Ok(Value::Object(existing.clone()))
    }

    /// Remove a record; deleting an unknown id is not an error.
    pub fn delete(&mut self, collection: &str, id: i64) -> Result<(), ApiError> {
        self.collection_mut(collection)?.records.remove(&id);
        Ok(())
    }

    fn existing_target(
        &mut self,
        collection: &str,
        id: i64,
        record: &Map<String, Value>,
    ) -> Result<&mut Collection, ApiError> {
        let body_id = body_id(record).ok_or_else(|| ApiError::bad_request("Invalid id", "idnull"))?;
        if body_id != id {
            return Err(ApiError::bad_request("Invalid ID", "idinvalid"));
        }
        let target = self.collection_mut(collection)?;
        if !target.records.contains_key(&id) {
            return Err(ApiError::bad_request("Entity not found", "idnotfound"));
        }
        Ok(target)
    }

    fn collection(&self, name: &str) -> Result<&Collection, ApiError> {
        self.collections
            .get(name)
            .ok_or_else(|| ApiError::not_found("Unknown collection"))
    }

    fn collection_mut(&mut self, name: &str) -> Result<&mut Collection, ApiError> {
        self.collections
            .get_mut(name)
            .ok_or_else(|| ApiError::not_found("Unknown collection"))
    }
}

fn into_object(body: Value) -> Result<Map<String, Value>, ApiError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::bad_request("Body must be a JSON object", "bodyinvalid")),
    }
}

fn body_id(record: &Map<String, Value>) -> Option<i64> {
    record.get("id").and_then(Value::as_i64)
}

fn entity_name(collection: &str) -> &str {
    match collection {
        "expenses" => "expense",
        "groups" => "group",
        "user-profiles" => "userProfile",
        other => other,
    }
}
