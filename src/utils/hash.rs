//! Deterministic content hashing using FxHash.
//!
//! ```ignore
//! use crate::utils::hash;
//!
//! let id = hash::fingerprint("slug\n0\nprint(1)"); // -> "a1b2c3d4"
//! ```

use rustc_hash::FxHasher;
use std::hash::Hasher;

/// 64-bit hash of byte data. Stable across runs and platforms.
#[inline]
pub fn compute<T: AsRef<[u8]> + ?Sized>(data: &T) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(data.as_ref());
    hasher.finish()
}

/// Hash as an 8-char hex fingerprint, used for element ids.
#[inline]
pub fn fingerprint<T: AsRef<[u8]> + ?Sized>(value: &T) -> String {
    format!("{:016x}", compute(value))[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_stable() {
        assert_eq!(fingerprint("abc"), fingerprint("abc"));
        assert_ne!(fingerprint("abc"), fingerprint("abd"));
        assert_eq!(fingerprint("").len(), 8);
        assert!(fingerprint("x").chars().all(|c| c.is_ascii_hexdigit()));
    }
}
