//! Script digests for `EVALSHA`.
//!
//! Redis caches Lua scripts under the SHA-1 of their body. Sending the digest
//! instead of the body saves bandwidth once the server knows the script.

use sha1::{Digest, Sha1};

/// Length of a hex-encoded script digest.
pub const DIGEST_LEN: usize = 40;

/// Returns the lowercase hex SHA-1 of a script body.
///
/// The result is always [`DIGEST_LEN`] characters long and never fails,
/// including for an empty script.
///
/// # Example
///
/// ```
/// use vredis_core::digest;
///
/// assert_eq!(digest("abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
/// ```
pub fn digest(script: impl AsRef<[u8]>) -> String {
    let mut hasher = Sha1::new();
    hasher.update(script.as_ref());
    hex::encode(hasher.finalize())
}
