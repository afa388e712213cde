//! Submission Client: the two remote operations the engine needs
//!
//! [`GraphqlClient`] talks to the accounting API over signed GraphQL calls
//! and retries transient failures; [`SubmissionClient`] is the seam the
//! batch submitter and status synchronizer are written against.

mod error;
mod graphql;
mod traits;
mod types;


pub use error::{ApiError, GraphqlError};
pub use graphql::{DEFAULT_CREATED_STATUS, GraphqlClient, IDEMPOTENCY_HEADER};
#[cfg(test)]
pub use traits::MockSubmissionClient;
pub use traits::SubmissionClient;
pub use types::{DocumentStatus, SubmissionReceipt};
