//! Inbound interaction webhook endpoint.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::config::SignaturePolicy;
use crate::error::AppError;
use crate::model::interaction::{InteractionPayload, InteractionResponse, INTERACTION_TYPE_PING};
use crate::state::AppState;
use crate::util::signature;

/// Header carrying the hex-encoded detached Ed25519 signature.
const SIGNATURE_HEADER: &str = "X-Signature-Ed25519";
/// Header carrying the timestamp the signature covers.
const TIMESTAMP_HEADER: &str = "X-Signature-Timestamp";

/// Handles `POST /api/discord/interactions`.
///
/// The signature gate runs before any parsing or business logic; a request
/// failing it never reaches the command router. Validation pings are
/// answered with a pong, everything else is dispatched and answered with
/// exactly one interaction response.
pub async fn post_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    verify_signature(&state.signature_policy, &headers, &body)?;

    let payload: InteractionPayload = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Malformed interaction payload: {}", e)))?;

    if payload.kind == INTERACTION_TYPE_PING {
        return Ok(Json(InteractionResponse::pong()).into_response());
    }

    let response = state.command_router.handle(payload).await;
    Ok(Json(response).into_response())
}

/// Fails closed: a missing header or a bad signature rejects the request
/// before verification of anything else. The development bypass is only
/// constructible outside production configurations.
fn verify_signature(
    policy: &SignaturePolicy,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<(), AppError> {
    let public_key_hex = match policy {
        SignaturePolicy::Verify { public_key_hex } => public_key_hex,
        SignaturePolicy::DevBypass => {
            tracing::warn!("signature verification bypassed (development mode)");
            return Ok(());
        }
    };

    let Some(signature) = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
    else {
        return Err(AppError::SignatureInvalid);
    };
    let Some(timestamp) = headers
        .get(TIMESTAMP_HEADER)
        .and_then(|value| value.to_str().ok())
    else {
        return Err(AppError::SignatureInvalid);
    };

    if !signature::verify(public_key_hex, timestamp, body, signature) {
        return Err(AppError::SignatureInvalid);
    }

    Ok(())
}
