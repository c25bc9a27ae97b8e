//! Common test utilities for rbac-admin
//!
//! - In-memory SQLite database with migrations applied
//! - Menu fixtures
//! - Envelope assertions
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{MenuFactory, TestDatabase};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let db = TestDatabase::seeded().await;
//!     let menu = db.menus().create(MenuFactory::top_level("Reports"), None).await;
//! }
//! ```

pub mod fixtures;

// Re-export commonly used items
pub use database::TestDatabase;
pub use fixtures::MenuFactory;

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
