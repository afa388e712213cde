//! Integration tests for journal-batch
//!
//! These tests drive the public API across module boundaries: the batch
//! submitter over a scripted client, the GraphQL client over HTTP, status
//! synchronization and configuration loading.

pub mod batch_tests;
pub mod config_tests;
pub mod graphql_client_tests;
