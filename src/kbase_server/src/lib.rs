//! Kbase REST backend.
//!
//! Serves the folder and article collections from PostgreSQL, plus media
//! uploads written to a local directory. Exposes config, state, error
//! handling and the router so the binary and the integration tests build
//! the exact same application.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repo;
pub mod router;
pub mod state;
