//! GraphQL schema over the chat snapshot.
//!
//! This module handles:
//! - The `Date` scalar
//! - `Chat` and `Message` object types
//! - The query root and schema construction

pub mod scalars;
pub mod schema;

pub use scalars::Date;
pub use schema::{build_schema, Chat, ChatSchema, Message, QueryRoot};
