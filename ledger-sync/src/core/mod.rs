//! Deterministic, pure logic of the entity-state-slice engine.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod entity;
pub mod operation;
pub mod ordering;
pub mod reducer;
pub mod refresh;
pub mod sanitize;
pub mod state;
