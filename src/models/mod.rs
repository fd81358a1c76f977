//! Database and configuration models backing the client store.

pub mod client;
pub mod config;
