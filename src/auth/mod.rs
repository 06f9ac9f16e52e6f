use argon2::Argon2;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Admin tokens are short-lived; logout is client-side discard.
pub const TOKEN_TTL_HOURS: i64 = 2;

/// Length of the raw password digest before base64 encoding.
const DIGEST_LEN: usize = 64;

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Derive the stored form of a password.
///
/// The salt is a fixed process-wide secret, so equal (password, salt) pairs
/// always produce the same digest and authentication is an exact-match
/// comparison against the stored value. Argon2 is CPU-heavy; call this from
/// a blocking task, not directly on the runtime.
pub fn derive_password_hash(password: &str, salt: &str) -> Result<String, argon2::Error> {
    let mut digest = [0u8; DIGEST_LEN];
    Argon2::default().hash_password_into(password.as_bytes(), salt.as_bytes(), &mut digest)?;
    Ok(BASE64.encode(digest))
}

/// Issue a signed bearer token asserting the admin role for `username`.
pub fn issue_token(username: &str, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        user: username.to_string(),
        role: ADMIN_ROLE.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validate signature and expiry, returning the embedded claims.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}
