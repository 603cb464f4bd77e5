//! Data structures for request authentication.
//!
//! Header names and the JWT pieces MoySklad sends with vendor API calls.

use serde::Deserialize;

/// Header carrying the hex HMAC-SHA256 of a webhook body.
pub const SIGNATURE_HEADER: &str = "x-lognex-signature";

/// Largest body buffered for signature checks.
pub const MAX_SIGNED_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    #[serde(default)]
    pub typ: Option<String>,
}

/// Claims of a vendor API token. Unknown claims are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VendorClaims {
    /// Application uid the token was issued for.
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub jti: Option<String>,
}
