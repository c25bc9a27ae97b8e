//! JWT token handling
//!
//! Tokens are HS256 signed and carry the subject plus an optional role.
//! Only verification happens on the request path; `create_access_token`
//! backs the `token` CLI command and the test suites.

mod handler;
pub mod types;


pub use types::{Claims, JwtHandler};
