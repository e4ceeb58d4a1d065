//! Orgboard Test Utils
//!
//! Shared testing utilities for the orgboard Discord bridge. This crate offers
//! a builder pattern for creating test contexts with in-memory SQLite
//! databases plus entity factories with sensible defaults.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Entity factories for organizations and guild links
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_link_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_bridge_tables()
//!         .build()
//!         .await?;
//!
//!     let db = test.db.as_ref().unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
