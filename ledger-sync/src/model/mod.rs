//! Record types of the remote resource API.
//!
//! References between records are by-value snapshots taken at fetch time;
//! they go stale until the owning collection is refetched.

mod expense;
mod group;
mod user_profile;

pub use expense::Expense;
pub use group::Group;
pub use user_profile::UserProfile;
