//! HMAC request signing

use crate::config::Credentials;
use crate::utils::error::{JournalError, Result};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the application key
pub const HEADER_APP_KEY: &str = "X-App-Key";
/// Header carrying the client id
pub const HEADER_CLIENT_ID: &str = "X-Client-Id";
/// Header carrying the signing timestamp (unix seconds)
pub const HEADER_TIMESTAMP: &str = "X-Timestamp";
/// Header carrying the hex HMAC-SHA256 signature
pub const HEADER_SIGNATURE: &str = "X-Signature";

/// Create HMAC signature
pub fn create_hmac_signature(secret: &str, data: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| JournalError::crypto(format!("Invalid HMAC key: {}", e)))?;

    mac.update(data.as_bytes());
    let result = mac.finalize();
    Ok(hex::encode(result.into_bytes()))
}

/// Authentication headers for one API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    pub app_key: String,
    pub client_id: String,
    pub timestamp: u64,
    pub signature: String,
}

impl AuthHeaders {
    /// Header name/value pairs in the order they are sent
    pub fn pairs(&self) -> [(&'static str, String); 4] {
        [
            (HEADER_APP_KEY, self.app_key.clone()),
            (HEADER_CLIENT_ID, self.client_id.clone()),
            (HEADER_TIMESTAMP, self.timestamp.to_string()),
            (HEADER_SIGNATURE, self.signature.clone()),
        ]
    }
}

/// Sign a call made at `timestamp`
///
/// The signed message is `app_key || client_id || timestamp`, keyed with the
/// API secret.
pub fn sign_request(credentials: &Credentials, timestamp: u64) -> Result<AuthHeaders> {
    let message = format!(
        "{}{}{}",
        credentials.app_key, credentials.client_id, timestamp
    );
    let signature = create_hmac_signature(&credentials.secret, &message)?;

    Ok(AuthHeaders {
        app_key: credentials.app_key.clone(),
        client_id: credentials.client_id.clone(),
        timestamp,
        signature,
    })
}
