//! Request models for menu endpoints

use crate::services::menu::{MenuFilter, MenuPatch, NewMenu};
use crate::utils::error::{AdminError, Result};
use crate::utils::validation::{FieldErrors, MAX_STRING_LENGTH, parse_flag};
use serde::{Deserialize, Deserializer};

/// Distinguish an explicit `null` from an omitted field
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Create/update body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub icon: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub url: Option<Option<String>>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub parent_id: Option<Option<i32>>,
    pub roles: Option<Vec<String>>,
}

impl MenuRequest {
    /// Validate a create request
    pub fn to_new_menu(&self) -> Result<(NewMenu, Option<Vec<String>>)> {
        let mut errors = FieldErrors::new();
        let name = errors.require("name", self.name.as_deref(), "The name field is required");
        let slug = errors.require("slug", self.slug.as_deref(), "The slug field is required");
        let icon = optional_text("icon", self.icon.as_ref(), &mut errors).flatten();
        let url = optional_text("url", self.url.as_ref(), &mut errors).flatten();
        self.check_order(&mut errors);
        let roles = self.checked_roles(&mut errors);
        errors.into_result()?;

        let (Some(name), Some(slug)) = (name, slug) else {
            return Err(AdminError::internal("Menu request passed validation incomplete"));
        };
        Ok((
            NewMenu {
                name,
                slug,
                icon,
                url,
                sort_order: self.order.unwrap_or(0),
                is_active: self.is_active.unwrap_or(true),
                parent_id: self.parent_id.flatten(),
            },
            roles,
        ))
    }

    /// Validate an update request; omitted fields stay untouched
    pub fn to_patch(&self) -> Result<(MenuPatch, Option<Vec<String>>)> {
        let mut errors = FieldErrors::new();
        let name = errors.sometimes("name", self.name.as_deref());
        let slug = errors.sometimes("slug", self.slug.as_deref());
        let icon = optional_text("icon", self.icon.as_ref(), &mut errors);
        let url = optional_text("url", self.url.as_ref(), &mut errors);
        self.check_order(&mut errors);
        let roles = self.checked_roles(&mut errors);
        errors.into_result()?;

        Ok((
            MenuPatch {
                name,
                slug,
                icon,
                url,
                sort_order: self.order,
                is_active: self.is_active,
                parent_id: self.parent_id,
            },
            roles,
        ))
    }

    fn check_order(&self, errors: &mut FieldErrors) {
        if self.order.is_some_and(|order| order < 0) {
            errors.add("order", "The order must be at least 0");
        }
    }

    fn checked_roles(&self, errors: &mut FieldErrors) -> Option<Vec<String>> {
        let roles = self.roles.as_ref()?;
        let mut names = Vec::with_capacity(roles.len());
        for (i, role) in roles.iter().enumerate() {
            let field = format!("roles.{}", i);
            let name =
                errors.require(&field, Some(role.as_str()), "The role name must not be empty");
            if let Some(name) = name {
                names.push(name);
            }
        }
        Some(names)
    }
}

/// A nullable text field: blank clears it, overlong is rejected
fn optional_text(
    field: &str,
    value: Option<&Option<String>>,
    errors: &mut FieldErrors,
) -> Option<Option<String>> {
    let value = value?;
    let text = value.as_deref().map(str::trim).filter(|v| !v.is_empty());
    if text.is_some_and(|v| v.chars().count() > MAX_STRING_LENGTH) {
        errors.add(
            field,
            format!(
                "The {} field must not be greater than {} characters",
                field, MAX_STRING_LENGTH
            ),
        );
    }
    Some(text.map(str::to_string))
}

/// Body of the role replacement endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuRolesRequest {
    pub roles: Option<Vec<String>>,
}

impl MenuRolesRequest {
    pub fn roles(&self) -> Result<Vec<String>> {
        let Some(roles) = &self.roles else {
            return Err(AdminError::validation("roles", "The roles field is required"));
        };
        let request = MenuRequest {
            roles: Some(roles.clone()),
            ..Default::default()
        };
        let mut errors = FieldErrors::new();
        let names = request.checked_roles(&mut errors).unwrap_or_default();
        errors.into_result()?;
        Ok(names)
    }
}

/// Listing filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuListQuery {
    pub is_active: Option<String>,
    pub parent_only: Option<String>,
    pub role: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl MenuListQuery {
    pub fn filter(&self) -> Result<MenuFilter> {
        let mut errors = FieldErrors::new();
        let is_active = flag("is_active", self.is_active.as_deref(), &mut errors);
        let parent_only = flag("parent_only", self.parent_only.as_deref(), &mut errors);
        errors.into_result()?;

        Ok(MenuFilter {
            is_active,
            parent_only: parent_only.unwrap_or(false),
            role: role_param(self.role.as_deref()),
        })
    }
}

/// Tree options
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreeQuery {
    pub role: Option<String>,
}

impl TreeQuery {
    pub fn role(&self) -> Option<String> {
        role_param(self.role.as_deref())
    }
}

fn flag(field: &str, value: Option<&str>, errors: &mut FieldErrors) -> Option<bool> {
    let value = value.filter(|v| !v.trim().is_empty())?;
    let parsed = parse_flag(value);
    if parsed.is_none() {
        errors.add(field, format!("The {} field must be true or false", field));
    }
    parsed
}

fn role_param(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
