//! Configuration data models

pub mod auth;
pub mod logging;
pub mod server;
pub mod storage;

pub use auth::*;
pub use logging::*;
pub use server::*;
pub use storage::*;

/// Default listen address
pub fn default_host() -> String {
    "127.0.0.1".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default maximum database connections
pub fn default_max_connections() -> u32 {
    10
}

/// Default connection timeout in seconds
pub fn default_connection_timeout() -> u64 {
    5
}

/// Default JWT expiration in seconds (24 hours)
pub fn default_jwt_expiration() -> u64 {
    86400
}

pub fn default_issuer() -> String {
    "rbac-admin".to_string()
}

pub fn default_true() -> bool {
    true
}
