//! Request identity types

use crate::utils::error::AdminError;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use std::future::{Ready, ready};

/// The authenticated caller of a request
///
/// Users carry a single role by name. The role is a soft reference: nothing
/// guarantees a matching row in `roles` exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Token subject
    pub subject: String,
    /// Role name, if the token carried one
    pub role: Option<String>,
}

impl Identity {
    pub fn new<S: Into<String>>(subject: S, role: Option<String>) -> Self {
        Self {
            subject: subject.into(),
            role,
        }
    }

    /// The role, treating a blank name as absent
    pub fn role(&self) -> Option<&str> {
        self.role
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }
}

impl FromRequest for Identity {
    type Error = AdminError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Identity>()
                .cloned()
                .ok_or_else(|| AdminError::unauthorized("Unauthenticated")),
        )
    }
}

/// How a request attempted to authenticate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// `Authorization: Bearer <token>`
    Jwt(String),
    /// No credentials supplied
    None,
}
