use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::error::Result;

type HmacSha256 = Hmac<Sha256>;

pub const SHA256_OUTPUT_LEN: usize = 32;

/// Hash primitives the signer is built on.
///
/// Implementations must be pure: the same input always yields the same
/// output. An error from `hmac_sha256` means the primitive itself is
/// unusable, which callers treat as a fatal configuration problem.
pub trait Crypto: Send + Sync {
    fn sha256(&self, data: &[u8]) -> [u8; SHA256_OUTPUT_LEN];

    fn hmac_sha256(&self, key: &[u8], msg: &[u8]) -> Result<[u8; SHA256_OUTPUT_LEN]>;

    #[inline]
    fn sha256_hex(&self, data: &[u8]) -> String {
        hex::encode(self.sha256(data))
    }
}

/// RustCrypto backend (`sha2` + `hmac`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha2Crypto;

impl Crypto for Sha2Crypto {
    #[inline]
    fn sha256(&self, data: &[u8]) -> [u8; SHA256_OUTPUT_LEN] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().into()
    }

    #[inline]
    fn hmac_sha256(&self, key: &[u8], msg: &[u8]) -> Result<[u8; SHA256_OUTPUT_LEN]> {
        let mut h = HmacSha256::new_from_slice(key)?;
        h.update(msg);
        Ok(h.finalize().into_bytes().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_of_empty_input() {
        assert_eq!(
            Sha2Crypto.sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn hmac_matches_rfc4231_case_2() {
        let mac = Sha2Crypto
            .hmac_sha256(b"Jefe", b"what do ya want for nothing?")
            .unwrap();
        assert_eq!(
            hex::encode(mac),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }
}
