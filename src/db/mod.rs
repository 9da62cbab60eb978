//! In-memory chat data.
//!
//! This module handles:
//! - Chat and message record types
//! - The immutable snapshot handed to the GraphQL schema
//! - The seed data served by default

pub mod store;
pub mod types;

pub use store::ChatStore;
pub use types::{ChatRecord, MessageRecord};
