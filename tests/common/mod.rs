//! Common test utilities for journal-batch
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{ScriptedClient, TableFactory};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let mut table = TableFactory::balanced_groups(3);
//!     let client = ScriptedClient::new();
//!     // ...
//! }
//! ```

pub mod assertions;
pub mod fixtures;

// Re-export commonly used items
pub use assertions::RowTableAssertions;
pub use fixtures::{RowFactory, TableFactory};
pub use mock_client::ScriptedClient;
