//! OTP code and session-token generation
//!
//! Codes are uniformly random numeric strings of configurable length,
//! zero-padded to fixed width, and persisted only as bcrypt hashes.
//! Session tokens are 256-bit random identifiers, handed to the client in
//! place of the code.

use rand::{rngs::OsRng, RngCore};

use crate::errors::DomainError;

/// Bytes of entropy in a session token (hex-encoded on the wire)
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Shortest code length accepted by verification
pub const MIN_CODE_LENGTH: usize = 4;

/// Longest code length accepted by verification
pub const MAX_CODE_LENGTH: usize = 10;

/// bcrypt cost factor for OTP code hashes
///
/// Lower than the password cost: codes live for minutes and carry only
/// `10^length` possibilities, so verification latency matters more here.
const CODE_HASH_COST: u32 = 8;

/// Generate a uniformly random numeric code, zero-padded to `length` digits
///
/// Uses the OS CSPRNG. A 6-digit length admits codes 000000-999999.
/// Lengths outside `MIN_CODE_LENGTH..=MAX_CODE_LENGTH` are clamped, so a
/// misconfigured length cannot overflow the modulus.
pub fn generate_code(length: usize) -> String {
    let length = length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH);
    let modulus = 10u64.pow(length as u32);
    let mut bytes = [0u8; 8];
    OsRng.fill_bytes(&mut bytes);
    let num = u64::from_le_bytes(bytes) % modulus;
    format!("{:0width$}", num, width = length)
}

/// Generate an opaque session token with 256 bits of entropy
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Hash a code for persistence; the plaintext is never stored
pub fn hash_code(code: &str) -> Result<String, DomainError> {
    bcrypt::hash(code, CODE_HASH_COST).map_err(|e| DomainError::Internal {
        message: format!("Failed to hash verification code: {}", e),
    })
}

/// Verify a submitted code against a stored hash
///
/// A malformed hash counts as a mismatch rather than an error.
pub fn verify_code(code: &str, code_hash: &str) -> bool {
    bcrypt::verify(code, code_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_code_format() {
        for _ in 0..50 {
            let code = generate_code(6);
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            let num: u32 = code.parse().unwrap();
            assert!(num < 1_000_000);
        }
    }

    #[test]
    fn test_code_respects_configured_length() {
        assert_eq!(generate_code(4).len(), 4);
        assert_eq!(generate_code(8).len(), 8);
    }

    #[test]
    fn test_out_of_range_lengths_are_clamped() {
        assert_eq!(generate_code(0).len(), MIN_CODE_LENGTH);
        assert_eq!(generate_code(1).len(), MIN_CODE_LENGTH);
        // Beyond 19 digits the modulus would no longer fit in a u64.
        assert_eq!(generate_code(30).len(), MAX_CODE_LENGTH);
        assert_eq!(generate_code(usize::MAX).len(), MAX_CODE_LENGTH);
    }

    #[test]
    fn test_session_token_shape_and_uniqueness() {
        let tokens: HashSet<String> = (0..100).map(|_| generate_session_token()).collect();
        assert_eq!(tokens.len(), 100);
        for token in &tokens {
            assert_eq!(token.len(), SESSION_TOKEN_BYTES * 2);
            assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_hash_round_trip() {
        let code = generate_code(6);
        let hash = hash_code(&code).unwrap();
        assert_ne!(hash, code);
        assert!(verify_code(&code, &hash));
    }

    #[test]
    fn test_wrong_code_fails_verification() {
        let hash = hash_code("123456").unwrap();
        assert!(!verify_code("654321", &hash));
        assert!(!verify_code("", &hash));
    }

    #[test]
    fn test_malformed_hash_is_a_mismatch() {
        assert!(!verify_code("123456", "not-a-bcrypt-hash"));
    }
}
