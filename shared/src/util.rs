//! Id and timestamp utilities shared by all crates.

use rand::Rng;

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms, collision-free at shop scale)
pub fn snowflake_id() -> i64 {
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// Alphabet for public order codes. Ambiguous glyphs (0/O, 1/I/L) are
/// excluded so the code survives being read over the phone.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Number of random characters in a public order code.
const CODE_LEN: usize = 8;

/// Generate a public order lookup code, e.g. `ORD-7GQK2MXD`.
///
/// The code is pure randomness over a 31-character alphabet (31^8 ≈ 8.5e11
/// values), carrying no sequential structure an unauthenticated caller
/// could enumerate. A UNIQUE constraint on the column backs it up.
pub fn order_code() -> String {
    let mut rng = rand::thread_rng();
    let mut code = String::with_capacity(4 + CODE_LEN);
    code.push_str("ORD-");
    for _ in 0..CODE_LEN {
        let idx = rng.gen_range(0..CODE_ALPHABET.len());
        code.push(CODE_ALPHABET[idx] as char);
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snowflake_ids_are_positive_and_distinct() {
        let a = snowflake_id();
        let b = snowflake_id();
        assert!(a > 0);
        assert!(b > 0);
        // Same millisecond is possible; the random tail makes a collision
        // vanishingly unlikely across two calls.
        assert_ne!(a, b);
    }

    #[test]
    fn order_code_shape() {
        let code = order_code();
        assert!(code.starts_with("ORD-"));
        assert_eq!(code.len(), 4 + CODE_LEN);
        for c in code[4..].bytes() {
            assert!(CODE_ALPHABET.contains(&c), "unexpected char {}", c as char);
        }
    }

    #[test]
    fn order_codes_do_not_repeat_trivially() {
        let codes: std::collections::HashSet<String> = (0..100).map(|_| order_code()).collect();
        assert_eq!(codes.len(), 100);
    }
}
