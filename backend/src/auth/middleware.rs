//! Middleware guarding the MoySklad-facing routes.
//!
//! `require_signature` buffers the body to check its HMAC and hands the same
//! bytes on to the handler. `require_vendor_token` checks the bearer JWT.

use axum::body::{self, Body};
use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use super::errors::AuthError;
use super::models::{MAX_SIGNED_BODY_BYTES, SIGNATURE_HEADER};
use super::service::SignatureVerifier;

pub async fn require_signature(
    State(verifier): State<SignatureVerifier>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let (parts, body) = request.into_parts();
    let bytes = body::to_bytes(body, MAX_SIGNED_BODY_BYTES)
        .await
        .map_err(|_| AuthError::BodyTooLarge)?;

    let signature = parts
        .headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    if let Err(e) = verifier.verify_body(&bytes, signature) {
        warn!(path = %parts.uri.path(), "rejected webhook with invalid signature");
        return Err(e);
    }

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

pub async fn require_vendor_token(
    State(verifier): State<SignatureVerifier>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    if let Err(e) = verifier.verify_bearer(authorization, chrono::Utc::now().timestamp()) {
        warn!(path = %request.uri().path(), error = %e, "rejected vendor API call");
        return Err(e);
    }

    Ok(next.run(request).await)
}
