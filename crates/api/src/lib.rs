//! Clubsite page builder API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! page rendering descriptors) so integration tests and the binary
//! entrypoint can both access them.

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod render;
pub mod routes;
pub mod state;
