//! Chat backend front door.
//!
//! An HTTP server with a permissive CORS and JSON-parsing middleware chain,
//! routing every request to one of two handlers:
//!
//! ```text
//! /_ping    -> "pong"
//! /graphql  -> GraphQL execution over the in-memory chat snapshot
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`db`]: Chat and message records, the immutable snapshot
//! - [`graphql`]: Schema, scalars and resolvers
//! - [`api`]: Handlers, routes and middleware
//! - [`server`]: Start, stop and route registration
//! - [`metrics`]: Prometheus request metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod metrics;
pub mod server;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::{FrontDoor, RunningServer};
