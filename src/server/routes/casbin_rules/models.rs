//! Request models for policy rule endpoints

use crate::auth::rbac::{PolicyRule, PolicyType};
use crate::utils::error::{AdminError, Result};
use crate::utils::validation::{FieldErrors, parse_flag};
use serde::Deserialize;

/// Create/update body.
///
/// For `p` rules `role` is the subject, `route` the object and `action` the
/// action. For `g` rules `user` is placed in `role`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleRequest {
    pub ptype: Option<String>,
    pub role: Option<String>,
    pub route: Option<String>,
    pub action: Option<String>,
    pub user: Option<String>,
}

impl RuleRequest {
    /// Validate a create request into a rule
    pub fn to_rule(&self) -> Result<PolicyRule> {
        let mut errors = FieldErrors::new();
        let raw_ptype =
            errors.require("ptype", self.ptype.as_deref(), "The ptype field is required");
        let ptype = match raw_ptype {
            Some(raw) => parse_ptype(&raw, &mut errors),
            None => None,
        };

        let rule = ptype.and_then(|ptype| {
            build_rule(
                ptype,
                self.role.as_deref(),
                self.route.as_deref(),
                self.action.as_deref(),
                self.user.as_deref(),
                &mut errors,
            )
        });

        errors.into_result()?;
        // a rule is always built once validation passes
        rule.ok_or_else(|| AdminError::invalid_rule("Incomplete rule"))
    }

    /// Validate an update request merged over `current`.
    ///
    /// Omitted fields keep their stored value as long as the rule kind does
    /// not change; switching kind requires every field of the new kind.
    pub fn merge_over(&self, current: &PolicyRule) -> Result<PolicyRule> {
        let mut errors = FieldErrors::new();
        let ptype = match errors.sometimes("ptype", self.ptype.as_deref()) {
            Some(raw) => parse_ptype(&raw, &mut errors),
            None if self.ptype.is_some() => None,
            None => Some(current.ptype()),
        };

        let rule = ptype.and_then(|ptype| {
            let same_kind = ptype == current.ptype();
            let (role, route, action, user) = match current {
                PolicyRule::Permission {
                    subject,
                    object,
                    action,
                } if same_kind => (
                    pick(&self.role, subject),
                    pick(&self.route, object),
                    pick(&self.action, action),
                    None,
                ),
                PolicyRule::Grouping { user, role } if same_kind => (
                    pick(&self.role, role),
                    None,
                    None,
                    pick(&self.user, user),
                ),
                _ => (
                    self.role.as_deref(),
                    self.route.as_deref(),
                    self.action.as_deref(),
                    self.user.as_deref(),
                ),
            };
            build_rule(ptype, role, route, action, user, &mut errors)
        });

        errors.into_result()?;
        rule.ok_or_else(|| AdminError::invalid_rule("Incomplete rule"))
    }
}

/// The request value when present, else the stored one
fn pick<'a>(requested: &'a Option<String>, stored: &'a str) -> Option<&'a str> {
    Some(requested.as_deref().unwrap_or(stored))
}

fn parse_ptype(raw: &str, errors: &mut FieldErrors) -> Option<PolicyType> {
    match raw.parse::<PolicyType>() {
        Ok(ptype) => Some(ptype),
        Err(_) => {
            errors.add("ptype", "The selected ptype is invalid");
            None
        }
    }
}

fn build_rule(
    ptype: PolicyType,
    role: Option<&str>,
    route: Option<&str>,
    action: Option<&str>,
    user: Option<&str>,
    errors: &mut FieldErrors,
) -> Option<PolicyRule> {
    match ptype {
        PolicyType::Policy => {
            let subject = errors.require("role", role, "The role field is required");
            let object =
                errors.require("route", route, "The route field is required when ptype is p");
            let action =
                errors.require("action", action, "The action field is required when ptype is p");
            Some(PolicyRule::permission(subject?, object?, action?))
        }
        PolicyType::Grouping => {
            let user = errors.require("user", user, "The user field is required when ptype is g");
            let role = errors.require("role", role, "The role field is required");
            Some(PolicyRule::grouping(user?, role?))
        }
    }
}

/// Listing filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleListQuery {
    pub ptype: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl RuleListQuery {
    /// The validated `ptype` filter
    pub fn ptype(&self) -> Result<Option<PolicyType>> {
        let Some(raw) = self.ptype.as_deref().filter(|v| !v.trim().is_empty()) else {
            return Ok(None);
        };
        let mut errors = FieldErrors::new();
        let ptype = parse_ptype(raw, &mut errors);
        errors.into_result()?;
        Ok(ptype)
    }
}

/// Options for the subject and user lookups
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupQuery {
    /// Follow role groupings transitively
    pub implicit: Option<String>,
}

impl LookupQuery {
    pub fn implicit(&self) -> Result<bool> {
        match self.implicit.as_deref() {
            None => Ok(false),
            Some(raw) => parse_flag(raw).ok_or_else(|| {
                AdminError::validation(
                    "implicit",
                    "The implicit field must be true or false",
                )
            }),
        }
    }
}
