//! Database entities

pub mod casbin_rule;
pub mod menu;
pub mod menu_role;
pub mod role;

pub use casbin_rule::Entity as CasbinRule;
pub use menu::Entity as Menu;
pub use menu_role::Entity as MenuRole;
pub use role::Entity as Role;
