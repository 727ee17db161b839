//! PKCE (Proof Key for Code Exchange) helpers for the installed-app flow.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Generate a random code_verifier.
///
/// 32 random bytes, base64url encoded, gives the 43 characters RFC 7636
/// requires at minimum.
pub fn generate_code_verifier() -> String {
    random_token::<32>()
}

/// code_challenge = BASE64URL(SHA256(code_verifier))
pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Opaque value echoed back by the authorization server on redirect.
pub fn generate_state() -> String {
    random_token::<24>()
}

fn random_token<const N: usize>() -> String {
    let mut bytes = [0u8; N];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_verifier_is_43_chars_and_unique() {
        let v1 = generate_code_verifier();
        let v2 = generate_code_verifier();

        assert_eq!(v1.len(), 43);
        assert_ne!(v1, v2);
    }

    #[test]
    fn code_challenge_matches_rfc_7636_example() {
        let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");

        assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
    }

    #[test]
    fn state_is_url_safe() {
        let state = generate_state();

        assert_eq!(state.len(), 32);
        assert!(state
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
