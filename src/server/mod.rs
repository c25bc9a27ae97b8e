//! HTTP server implementation
//!
//! This module provides the HTTP server, middleware and routing.

pub mod middleware;
pub mod routes;

pub mod builder;
mod handlers;
pub mod server;
pub mod state;


pub use builder::{build_state, run_server, state_from_database};
pub use server::{HttpServer, create_app};
pub use state::AppState;
