use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of a password.
///
/// Single-round and unsalted: the same password always yields the same
/// digest, and credential lookups compare digests directly. See
/// DESIGN.md before changing the function — a salted KDF breaks that
/// equality for every stored account.
pub fn hash_password(plain: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plain.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        let a = hash_password("secret1");
        let b = hash_password("secret1");
        assert_eq!(a, b);
    }

    #[test]
    fn digest_is_fixed_length_lowercase_hex() {
        let digest = hash_password("secret1");
        assert_eq!(digest.len(), 64);
        assert!(digest
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn digest_never_equals_the_plaintext() {
        let long = "a".repeat(64);
        for plain in ["", "secret1", long.as_str()] {
            assert_ne!(hash_password(plain), plain);
        }
    }

    #[test]
    fn digest_matches_known_vectors() {
        assert_eq!(
            hash_password(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn different_passwords_yield_different_digests() {
        assert_ne!(hash_password("secret1"), hash_password("secret2"));
    }
}
