//! Client-side snapshot held for one entity type.

use serde::Serialize;

use crate::core::entity::Entity;

/// Authoritative client state for one entity type.
///
/// Mutated only through [`crate::core::reducer::apply`]. Reads drive
/// `loading`, writes drive `updating`; the two are not mutually exclusive
/// because a dependent refetch may start while a write is settling.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityState<T> {
    /// True while a read operation is in flight.
    pub loading: bool,
    /// True while a write operation is in flight.
    pub updating: bool,
    /// True right after a write settles successfully; cleared by every new operation.
    pub update_success: bool,
    /// Message of the last rejected operation; cleared by every new operation.
    pub error_message: Option<String>,
    /// Last fetched or written single record.
    pub entity: T,
    /// Last fetched collection, ordered per the fetch's sort directive.
    pub entities: Vec<T>,
}

impl<T: Entity> Default for EntityState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            updating: false,
            update_success: false,
            error_message: None,
            entity: T::default(),
            entities: Vec::new(),
        }
    }
}

impl<T> EntityState<T> {
    /// True when neither a read nor a write is in flight.
    pub fn is_idle(&self) -> bool {
        !self.loading && !self.updating
    }
}
