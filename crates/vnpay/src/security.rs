//! Constant-time comparison for secrets handled outside the MAC path
//! (bearer tokens and the like).

use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;

/// Constant-time byte comparison that does not leak input lengths or content.
///
/// Both inputs are hashed to fixed-length SHA-512 digests first, so timing
/// depends on neither length nor content. The digest comparison itself uses
/// `subtle::ConstantTimeEq`.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let ha = Sha512::digest(a);
    let hb = Sha512::digest(b);
    ha.ct_eq(&hb).into()
}
