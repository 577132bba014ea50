//! Invite code generation.

use rand::Rng;

/// Crockford base32 alphabet: no I, L, O, U to avoid transcription mistakes.
const ALPHABET: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

pub const INVITE_CODE_LEN: usize = 6;

/// Generate a random invite code. Uniqueness is enforced by the database;
/// callers retry on collision.
pub fn generate_invite_code() -> String {
    let mut rng = rand::rng();
    (0..INVITE_CODE_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_have_expected_length_and_alphabet() {
        for _ in 0..100 {
            let code = generate_invite_code();
            assert_eq!(code.len(), INVITE_CODE_LEN);
            assert!(code.bytes().all(|b| ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn codes_avoid_ambiguous_characters() {
        for _ in 0..100 {
            let code = generate_invite_code();
            assert!(!code.contains(['I', 'L', 'O', 'U']));
        }
    }

    #[test]
    fn codes_vary() {
        let a = generate_invite_code();
        let b = generate_invite_code();
        let c = generate_invite_code();
        // Three identical draws from a 32^6 space means a broken generator.
        assert!(!(a == b && b == c));
    }
}
