//! The entity state machine: applies one transition to a slice's state.

use crate::core::entity::Entity;
use crate::core::operation::{Access, Transition};
use crate::core::ordering::order_collection;
use crate::core::state::EntityState;

/// Apply `transition` to `state`.
///
/// # Contract
/// - `Pending` clears `error_message` and `update_success`, then raises
///   `loading` for reads or `updating` for writes.
/// - Settlement lowers only the flag of the operation's own access group.
/// - `FetchedList` replaces `entities` wholesale, reordered per its directive.
/// - `Rejected` keeps `entity` and `entities` untouched.
pub fn apply<T: Entity>(state: &mut EntityState<T>, transition: Transition<T>) {
    match transition {
        Transition::Pending(kind) => {
            state.error_message = None;
            state.update_success = false;
            match kind.access() {
                Access::Read => state.loading = true,
                Access::Write => state.updating = true,
            }
        }
        Transition::FetchedList { records, sort } => {
            state.loading = false;
            state.entities = order_collection(records, sort.as_ref());
        }
        Transition::FetchedOne(record) => {
            state.loading = false;
            state.entity = record;
        }
        Transition::Written { record, .. } => {
            state.updating = false;
            state.update_success = true;
            state.entity = record;
        }
        Transition::Deleted => {
            state.updating = false;
            state.update_success = true;
            state.entity = T::default();
        }
        Transition::Rejected { kind, message } => {
            match kind.access() {
                Access::Read => state.loading = false,
                Access::Write => state.updating = false,
            }
            state.update_success = false;
            state.error_message = Some(message);
        }
        Transition::Reset => *state = EntityState::default(),
    }
}
