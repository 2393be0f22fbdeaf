//! Response cleanup.

use tracing::debug;

use super::types::RESPONSE_CODES;

/// Strip acknowledgment and completion codes from a hex response.
///
/// Each code is removed in a single left-to-right pass; fragments that join
/// into a new code after a removal are left in place.
pub fn clean(response_hex: &str) -> String {
    if response_hex.is_empty() {
        return String::new();
    }

    let cleaned = RESPONSE_CODES
        .iter()
        .fold(response_hex.to_string(), |acc, code| acc.replace(code, ""));

    if cleaned != response_hex {
        debug!("Original response: {response_hex}");
        debug!("Processed response: {cleaned}");
    }

    cleaned
}

/// Render raw response bytes as uppercase hex and clean them.
pub fn clean_bytes(response: &[u8]) -> String {
    clean(&hex::encode_upper(response))
}
