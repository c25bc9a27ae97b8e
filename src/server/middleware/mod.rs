//! HTTP middleware implementations
//!
//! - [`Authenticate`] resolves the bearer token into an [`Identity`](crate::auth::Identity)
//! - [`Authorize`] checks the identity's role against a named resource

mod auth;
mod authorize;
mod helpers;


pub use auth::{Authenticate, AuthenticateService};
pub use authorize::{Authorize, AuthorizeService};
pub use helpers::{extract_auth_method, is_public_route};
