//! Cross-entity refresh rule: writes reconcile by refetching the collection.

use crate::core::operation::OperationKind;

/// Whether settling `kind` dispatches a dependent fetch-list.
///
/// Create and delete refetch only when fulfilled. Update and partial update
/// refetch whatever the outcome; this asymmetry is kept on purpose until
/// product decides whether a failed update should still reconcile.
pub fn requires_refetch(kind: OperationKind, fulfilled: bool) -> bool {
    match kind {
        OperationKind::FetchList | OperationKind::FetchOne => false,
        OperationKind::Create | OperationKind::Delete => fulfilled,
        OperationKind::Update | OperationKind::PartialUpdate => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_never_refetch() {
        for fulfilled in [true, false] {
            assert!(!requires_refetch(OperationKind::FetchList, fulfilled));
            assert!(!requires_refetch(OperationKind::FetchOne, fulfilled));
        }
    }

    #[test]
    fn create_and_delete_refetch_only_on_success() {
        assert!(requires_refetch(OperationKind::Create, true));
        assert!(!requires_refetch(OperationKind::Create, false));
        assert!(requires_refetch(OperationKind::Delete, true));
        assert!(!requires_refetch(OperationKind::Delete, false));
    }

    #[test]
    fn updates_refetch_regardless_of_outcome() {
        for fulfilled in [true, false] {
            assert!(requires_refetch(OperationKind::Update, fulfilled));
            assert!(requires_refetch(OperationKind::PartialUpdate, fulfilled));
        }
    }
}
