//! One-way digests for the master secret and stored passwords.

use sha2::{Digest, Sha256};

/// Length of a rendered digest in hex characters.
pub const DIGEST_HEX_LEN: usize = 64;

/// SHA-256 of the raw secret bytes as lowercase hex.
pub fn digest(secret: &str) -> String {
    let hash = Sha256::digest(secret.as_bytes());
    format!("{:064x}", hash)
}
