use sha2::{Digest, Sha256};

use crate::constants::identity::SHORT_DIGEST_LEN;

/// Lowercase hex digest of `input`, truncated to the short identity length.
pub fn short_digest(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(SHORT_DIGEST_LEN);
    for byte in digest.iter() {
        hex.push_str(&format!("{byte:02x}"));
        if hex.len() >= SHORT_DIGEST_LEN {
            break;
        }
    }
    hex.truncate(SHORT_DIGEST_LEN);
    hex
}
