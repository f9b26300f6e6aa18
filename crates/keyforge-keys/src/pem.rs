//! Minimal PEM handling: armor stripping, base64, and the exact public
//! key text the service publishes.
//!
//! This deliberately does not validate the armor label. A block labelled
//! `RSA PRIVATE KEY` decodes to PKCS#1 bytes, and the PKCS#8 decoder in
//! [`KeyPair`](crate::KeyPair) rejects those as malformed.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::{KeyError, KeyKind};
use crate::keypair::{PUBLIC_KEY_BEGIN, PUBLIC_KEY_END};

/// Marker that opens and closes an armor label (`-----BEGIN X-----`).
const DASHES: &str = "-----";

/// Decodes a PEM block into its DER bytes.
///
/// Every `-----…-----` armor label is dropped, all whitespace is removed,
/// and what remains is decoded as standard padded base64.
///
/// # Errors
/// [`KeyError::Malformed`] if there is no body or it isn't valid base64.
pub fn decode_pem(kind: KeyKind, text: &str) -> Result<Vec<u8>, KeyError> {
    let body = strip_armor(text);
    if body.is_empty() {
        return Err(KeyError::malformed(kind, "PEM block has no body"));
    }
    STANDARD
        .decode(body.as_bytes())
        .map_err(|e| KeyError::malformed(kind, format!("invalid base64: {e}")))
}

/// Renders SPKI DER bytes as the published public key text.
///
/// The base64 body is a single unwrapped line between the armor lines,
/// with no trailing newline. Clients compare this text byte for byte.
pub fn encode_public_key_pem(spki_der: &[u8]) -> String {
    format!(
        "{PUBLIC_KEY_BEGIN}\n{}\n{PUBLIC_KEY_END}",
        STANDARD.encode(spki_der)
    )
}

/// Removes armor labels and whitespace, leaving only the base64 body.
///
/// An unterminated label (`-----BEGIN` with no closing dashes) is kept
/// as-is so the base64 decoder reports it.
fn strip_armor(text: &str) -> String {
    let mut body = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find(DASHES) {
        body.push_str(&rest[..open]);
        let label = &rest[open + DASHES.len()..];
        match label.find(DASHES) {
            Some(close) => rest = &label[close + DASHES.len()..],
            None => {
                body.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    body.push_str(rest);

    body.retain(|c| !c.is_whitespace());
    body
}
