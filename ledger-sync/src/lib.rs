//! Client-side synchronization of remote entity collections.
//!
//! Each entity type (expenses, groups, user profiles) gets one slice of
//! client state that is driven by six asynchronous operations against a
//! remote resource API. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (state transitions, collection
//!   ordering, payload sanitization, refresh rule). No I/O.
//! - **[`io`]**: The gateway seam to the remote API, its HTTP adapter and
//!   configuration loading.
//!
//! [`slice`] wires operations through the gateway into the pure reducer, and
//! [`store`] owns one slice per entity type for the application root.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod model;
pub mod slice;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
