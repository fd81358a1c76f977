//! Domain aggregates persisted by the client store.

pub mod client;
pub mod item;
pub mod types;
