//! Operation identities and the transitions they feed into the reducer.

use std::fmt;

use crate::core::entity::Entity;
use crate::core::ordering::SortDirective;

/// The six operations every entity slice exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    FetchList,
    FetchOne,
    Create,
    Update,
    PartialUpdate,
    Delete,
}

/// Which in-flight flag an operation drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Drives `loading`.
    Read,
    /// Drives `updating`.
    Write,
}

impl OperationKind {
    pub const ALL: [OperationKind; 6] = [
        OperationKind::FetchList,
        OperationKind::FetchOne,
        OperationKind::Create,
        OperationKind::Update,
        OperationKind::PartialUpdate,
        OperationKind::Delete,
    ];

    /// Read and write kinds form two disjoint groups.
    pub fn access(self) -> Access {
        match self {
            OperationKind::FetchList | OperationKind::FetchOne => Access::Read,
            OperationKind::Create
            | OperationKind::Update
            | OperationKind::PartialUpdate
            | OperationKind::Delete => Access::Write,
        }
    }

    pub fn action(self) -> &'static str {
        match self {
            OperationKind::FetchList => "fetch_entity_list",
            OperationKind::FetchOne => "fetch_entity",
            OperationKind::Create => "create_entity",
            OperationKind::Update => "update_entity",
            OperationKind::PartialUpdate => "partial_update_entity",
            OperationKind::Delete => "delete_entity",
        }
    }

    /// Stable identity used to correlate dispatch and settlement,
    /// e.g. `expense/fetch_entity_list`.
    pub fn identity<T: Entity>(self) -> String {
        format!("{}/{}", T::NAME, self.action())
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action())
    }
}

/// A state change produced by dispatching or settling an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition<T> {
    /// Operation dispatched; its gateway call is in flight.
    Pending(OperationKind),
    /// `FetchList` fulfilled with the records as received from the gateway.
    FetchedList {
        records: Vec<T>,
        sort: Option<SortDirective>,
    },
    /// `FetchOne` fulfilled.
    FetchedOne(T),
    /// `Create`, `Update` or `PartialUpdate` fulfilled with the server's record.
    Written { kind: OperationKind, record: T },
    /// `Delete` fulfilled.
    Deleted,
    /// Any operation rejected.
    Rejected { kind: OperationKind, message: String },
    /// Restore the initial state.
    Reset,
}

impl<T> Transition<T> {
    /// Operation this transition belongs to, `None` for `Reset`.
    pub fn kind(&self) -> Option<OperationKind> {
        match self {
            Transition::Pending(kind) => Some(*kind),
            Transition::FetchedList { .. } => Some(OperationKind::FetchList),
            Transition::FetchedOne(_) => Some(OperationKind::FetchOne),
            Transition::Written { kind, .. } => Some(*kind),
            Transition::Deleted => Some(OperationKind::Delete),
            Transition::Rejected { kind, .. } => Some(*kind),
            Transition::Reset => None,
        }
    }
}
