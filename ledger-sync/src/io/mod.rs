//! I/O adapters: the remote resource gateway and configuration.

pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
