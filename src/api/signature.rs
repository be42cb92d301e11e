use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::error;

type HmacSha256 = Hmac<Sha256>;

/// Hex HMAC-SHA256 of `request_body`, as ClickUp puts it in `X-Signature`.
#[must_use]
pub fn compute_signature(request_body: &[u8], secret: &str) -> String {
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(e) => {
            error!("Failed to create HMAC: {}", e);
            return String::new();
        }
    };
    mac.update(request_body);
    hex::encode(mac.finalize().into_bytes())
}

/// Check a ClickUp webhook signature over the raw body.
///
/// The comparison runs in constant time via `Mac::verify_slice`.
#[must_use]
pub fn verify_clickup_signature(request_body: &[u8], signature: &str, secret: &str) -> bool {
    let Ok(received) = hex::decode(signature.trim()) else {
        error!("Signature header is not valid hex");
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        error!("Failed to create HMAC");
        return false;
    };
    mac.update(request_body);

    if mac.verify_slice(&received).is_ok() {
        true
    } else {
        error!("ClickUp signature verification failed");
        false
    }
}

/// Constant-time equality for the Telegram webhook secret token.
///
/// Both sides go through HMAC keyed by the expected secret and the tags are
/// compared with `verify_slice`, so timing does not depend on where they differ.
#[must_use]
pub fn verify_secret_token(presented: &str, expected: &str) -> bool {
    let tag = |input: &str| -> Option<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(expected.as_bytes()).ok()?;
        mac.update(input.as_bytes());
        Some(mac)
    };

    let (Some(expected_mac), Some(presented_mac)) = (tag(expected), tag(presented)) else {
        return false;
    };
    let expected_tag = expected_mac.finalize().into_bytes();
    presented_mac.verify_slice(&expected_tag).is_ok()
}
