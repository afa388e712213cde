//! Authentication utilities
//!
//! This module signs outgoing API calls with the operator's credentials.

pub mod signing;

pub use signing::{AuthHeaders, create_hmac_signature, sign_request};
