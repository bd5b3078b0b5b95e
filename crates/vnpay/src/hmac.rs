use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::constants::SIGNATURE_BYTES;
use crate::error::SignatureError;

type HmacSha512 = Hmac<Sha512>;

fn keyed_mac(key: &[u8]) -> Result<HmacSha512, SignatureError> {
    if key.is_empty() {
        return Err(SignatureError::EmptyKey);
    }
    HmacSha512::new_from_slice(key).map_err(|e| SignatureError::InvalidKey(e.to_string()))
}

/// Compute HMAC-SHA512 over `data` and return it as lowercase hex.
///
/// A fresh MAC context is created for every call. Empty keys are refused.
pub fn try_hmac_sha512(key: &[u8], data: &[u8]) -> Result<String, SignatureError> {
    let mut mac = keyed_mac(key)?;
    mac.update(data);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Sign `data` with `key` for the gateway.
///
/// Never fails loudly: a missing input or any signing error yields `""`.
/// Callers must treat an empty result as "do not send this request".
pub fn hmac_sha512(key: Option<&str>, data: Option<&str>) -> String {
    let (Some(key), Some(data)) = (key, data) else {
        tracing::debug!(
            key_present = key.is_some(),
            data_present = data.is_some(),
            "hmac input missing, returning empty signature"
        );
        return String::new();
    };

    match try_hmac_sha512(key.as_bytes(), data.as_bytes()) {
        Ok(sig) => sig,
        Err(e) => {
            tracing::warn!(error = %e, "hmac signing failed, returning empty signature");
            String::new()
        }
    }
}

/// Check a hex signature (either case) against `data`.
///
/// The comparison is constant-time. Malformed hex is compared as a zero
/// buffer so it goes through the same MAC check as a well-formed value.
pub fn verify_hmac_sha512(key: &[u8], data: &[u8], signature: &str) -> bool {
    let mut mac = match keyed_mac(key) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(data);

    let expected = hex::decode(signature).unwrap_or_else(|_| vec![0u8; SIGNATURE_BYTES]);

    mac.verify_slice(&expected).is_ok()
}

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().fold(String::new(), |mut s, b| {
            use std::fmt::Write;
            let _ = write!(s, "{b:02x}");
            s
        })
    }

    pub fn decode(s: &str) -> Result<Vec<u8>, ()> {
        if s.len() % 2 != 0 || !s.is_ascii() {
            return Err(());
        }
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| ()))
            .collect()
    }
}
