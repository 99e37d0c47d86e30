//! Stable exit codes for the `ledger` CLI.

/// The dispatched operation settled successfully.
pub const OK: i32 = 0;
/// Invalid invocation, record JSON or configuration.
pub const INVALID: i32 = 1;
/// The dispatched operation was rejected by the remote API or transport.
pub const REJECTED: i32 = 2;
