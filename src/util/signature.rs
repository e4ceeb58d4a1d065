use ed25519_dalek::{Signature, Verifier, VerifyingKey};

/// Verifies a Discord interaction signature.
///
/// Discord signs `timestamp || body` with Ed25519 and sends the detached
/// signature hex-encoded in the `X-Signature-Ed25519` header. This function
/// validates that signature against the application's configured public key.
/// Malformed input (bad hex, wrong key or signature length) fails
/// verification rather than erroring.
pub fn verify(public_key_hex: &str, timestamp: &str, body: &[u8], signature_hex: &str) -> bool {
    let Ok(key_bytes) = hex::decode(public_key_hex) else {
        return false;
    };
    let Ok(key_bytes) = <[u8; 32]>::try_from(key_bytes.as_slice()) else {
        return false;
    };
    let Ok(key) = VerifyingKey::from_bytes(&key_bytes) else {
        return false;
    };

    let Ok(signature_bytes) = hex::decode(signature_hex) else {
        return false;
    };
    let Ok(signature_bytes) = <[u8; 64]>::try_from(signature_bytes.as_slice()) else {
        return false;
    };
    let signature = Signature::from_bytes(&signature_bytes);

    let mut message = Vec::with_capacity(timestamp.len() + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(body);

    key.verify(&message, &signature).is_ok()
}
