//! RBAC types and data structures

use crate::utils::error::{AdminError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rule kind as stored in the `ptype` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyType {
    /// `p`: subject may perform action on object
    #[serde(rename = "p")]
    Policy,
    /// `g`: user inherits role
    #[serde(rename = "g")]
    Grouping,
}

impl PolicyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyType::Policy => "p",
            PolicyType::Grouping => "g",
        }
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyType {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "p" => Ok(PolicyType::Policy),
            "g" => Ok(PolicyType::Grouping),
            other => Err(AdminError::invalid_rule(format!(
                "Unknown policy type: {}",
                other
            ))),
        }
    }
}

/// A single authorization rule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "ptype")]
pub enum PolicyRule {
    #[serde(rename = "p")]
    Permission {
        subject: String,
        object: String,
        action: String,
    },
    #[serde(rename = "g")]
    Grouping { user: String, role: String },
}

impl PolicyRule {
    pub fn permission<S, O, A>(subject: S, object: O, action: A) -> Self
    where
        S: Into<String>,
        O: Into<String>,
        A: Into<String>,
    {
        PolicyRule::Permission {
            subject: subject.into(),
            object: object.into(),
            action: action.into(),
        }
    }

    pub fn grouping<U: Into<String>, R: Into<String>>(user: U, role: R) -> Self {
        PolicyRule::Grouping {
            user: user.into(),
            role: role.into(),
        }
    }

    pub fn ptype(&self) -> PolicyType {
        match self {
            PolicyRule::Permission { .. } => PolicyType::Policy,
            PolicyRule::Grouping { .. } => PolicyType::Grouping,
        }
    }

    /// Values in `v0..v2` column order
    pub fn values(&self) -> (&str, &str, Option<&str>) {
        match self {
            PolicyRule::Permission {
                subject,
                object,
                action,
            } => (subject, object, Some(action)),
            PolicyRule::Grouping { user, role } => (user, role, None),
        }
    }

    /// Rebuild a rule from its stored columns
    pub fn from_columns(ptype: &str, v0: &str, v1: &str, v2: Option<&str>) -> Result<Self> {
        let rule = match ptype.parse::<PolicyType>()? {
            PolicyType::Policy => PolicyRule::permission(v0, v1, v2.unwrap_or_default()),
            PolicyType::Grouping => PolicyRule::grouping(v0, v1),
        };
        rule.validate()?;
        Ok(rule)
    }

    /// Reject rules with blank fields
    pub fn validate(&self) -> Result<()> {
        let blank = match self {
            PolicyRule::Permission {
                subject,
                object,
                action,
            } => [
                ("subject", subject.as_str()),
                ("object", object.as_str()),
                ("action", action.as_str()),
            ]
            .into_iter()
            .find(|(_, v)| v.trim().is_empty()),
            PolicyRule::Grouping { user, role } => {
                [("user", user.as_str()), ("role", role.as_str())]
                    .into_iter()
                    .find(|(_, v)| v.trim().is_empty())
            }
        };

        match blank {
            Some((field, _)) => Err(AdminError::invalid_rule(format!(
                "{} rule is missing {}",
                self.ptype(),
                field
            ))),
            None => Ok(()),
        }
    }
}

impl fmt::Display for PolicyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyRule::Permission {
                subject,
                object,
                action,
            } => write!(f, "p, {}, {}, {}", subject, object, action),
            PolicyRule::Grouping { user, role } => write!(f, "g, {}, {}", user, role),
        }
    }
}

/// An `(object, action)` pair granted to a subject
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PermissionEntry {
    pub object: String,
    pub action: String,
}

impl PermissionEntry {
    pub fn new<O: Into<String>, A: Into<String>>(object: O, action: A) -> Self {
        Self {
            object: object.into(),
            action: action.into(),
        }
    }
}
