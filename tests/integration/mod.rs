//! Integration tests for rbac-admin
//!
//! These tests verify the interaction between multiple components
//! and test real system behavior without mocking.

pub mod http_tests;
pub mod menu_tree_tests;
pub mod policy_store_tests;
