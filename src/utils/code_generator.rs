//! Short code generation and shape checks.
//!
//! Codes are drawn uniformly from a base62 alphabet. At the default length of
//! seven characters that is 62^7 (about 3.5e12) possible codes; collisions are
//! rare but possible, so callers must still handle a uniqueness conflict on
//! insert.

use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

/// URL-safe base62 alphabet used for generated codes.
pub const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of generated codes unless configured otherwise.
pub const DEFAULT_CODE_LENGTH: usize = 7;

/// Upper bound on the length of any code accepted for lookup.
pub const MAX_CODE_LENGTH: usize = 64;

/// Codes that would shadow fixed routes and are never issued.
const RESERVED_CODES: &[&str] = &["api", "health"];

static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z]{1,64}$").expect("valid code regex"));

/// Generates a random short code of `length` characters.
///
/// Reserved route names are skipped.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(7);
/// assert_eq!(code.len(), 7);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    loop {
        let code: String = (0..length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();

        if !is_reserved(&code) {
            return code;
        }
    }
}

/// Returns true if `code` could have been issued by this service.
///
/// Used to answer lookups for garbage paths without touching the store.
pub fn is_well_formed(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}
