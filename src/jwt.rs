use crate::keys::{KeyError, PrivateKey};

use chrono::prelude::*;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;

/// Seconds between `iat` and `exp` in the login token.
const TOKEN_LIFETIME_SECS: i64 = 60;

#[derive(Debug, Serialize)]
struct Claims {
    iss: String,
    sub: String,
    iat: i64,
    exp: i64,
}

/// Upper-cased account locator without region or cloud suffix.
pub(crate) fn account_identifier(account: &str) -> String {
    let (name, _) = account.split_once('.').unwrap_or((account, ""));
    name.to_uppercase()
}

/// Mints the RS256 token presented to `login-request` with the
/// `SNOWFLAKE_JWT` authenticator.
pub(crate) fn generate_token(account: &str, user: &str, key: &PrivateKey) -> Result<String, KeyError> {
    let fingerprint = key.public_key_fingerprint()?;
    let sub = format!("{}.{}", account_identifier(account), user.to_uppercase());
    let iss = format!("{sub}.{fingerprint}");

    let now = Utc::now().timestamp();
    let claims = Claims {
        iss,
        sub,
        iat: now,
        exp: now + TOKEN_LIFETIME_SECS,
    };

    let pkcs1 = key.to_pkcs1_der()?;
    let encoding_key = EncodingKey::from_rsa_der(pkcs1.as_bytes());

    jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
        .map_err(|e| KeyError::Encode(format!("Could not sign JWT: {e}")))
}
