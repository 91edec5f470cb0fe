//! Storage abstractions for service layer
//!
//! Process-local stores. Nothing here survives a restart.

pub mod memory_map_store;
