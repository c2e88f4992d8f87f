// src/utils/auth.rs

//! OAuth 1.0 PLAINTEXT authorization header.

use chrono::Utc;
use uuid::Uuid;

use crate::models::Credentials;

/// Build a fresh `Authorization` header value with a random nonce and the
/// current Unix timestamp.
pub fn authorization_header(credentials: &Credentials) -> String {
    let timestamp = Utc::now().timestamp();
    let nonce = Uuid::new_v4().to_string();
    authorization_header_with(credentials, &nonce, timestamp)
}

/// Build the header from an explicit nonce and timestamp.
pub fn authorization_header_with(credentials: &Credentials, nonce: &str, timestamp: i64) -> String {
    let signature = format!("{}&", quote(&credentials.consumer_secret));
    format!(
        "OAuth oauth_consumer_key=\"{}\",oauth_nonce=\"{}\", oauth_signature=\"{}\",oauth_signature_method=\"PLAINTEXT\",oauth_timestamp=\"{}\"",
        credentials.consumer_key, nonce, signature, timestamp
    )
}

/// Percent-encode everything except unreserved characters and `/`.
fn quote(s: &str) -> String {
    urlencoding::encode(s).replace("%2F", "/")
}
