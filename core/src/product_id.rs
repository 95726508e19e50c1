//! Product identifier validation.

use std::fmt;
use std::str::FromStr;

use crate::error::InvalidProductId;

/// Exact length of a catalog identifier.
pub const PRODUCT_ID_LEN: usize = 10;

/// Returns true iff `raw` is exactly ten characters of `[A-Z0-9]`.
pub fn is_valid_product_id(raw: &str) -> bool {
    raw.len() == PRODUCT_ID_LEN
        && raw
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

/// A catalog identifier that has passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductId(String);

impl ProductId {
    pub fn parse(raw: &str) -> Result<Self, InvalidProductId> {
        if is_valid_product_id(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidProductId)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ProductId {
    type Err = InvalidProductId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    #[test]
    fn accepts_ten_uppercase_alphanumerics() {
        for id in ["B07XJ8C8F5", "0000000000", "ZZZZZZZZZZ", "A1B2C3D4E5"] {
            assert!(is_valid_product_id(id), "{id} should be valid");
        }
    }

    #[test]
    fn accepts_every_alphabet_character_in_every_position() {
        for pos in 0..PRODUCT_ID_LEN {
            for &c in ALPHABET {
                let mut bytes = vec![b'A'; PRODUCT_ID_LEN];
                bytes[pos] = c;
                let id = String::from_utf8(bytes).unwrap();
                assert!(is_valid_product_id(&id), "{id} should be valid");
            }
        }
    }

    #[test]
    fn rejects_wrong_lengths() {
        for len in [0, 1, 9, 11, 20] {
            let id = "A".repeat(len);
            assert!(!is_valid_product_id(&id), "length {len} should be rejected");
        }
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        for id in [
            "short",
            "lowercase1",
            "12345678901",
            "b07xj8c8f5",
            "B07XJ8C8F-",
            "B07XJ8C8F ",
            "B07XJ8C8F_",
            "B07XJ8C8F/",
        ] {
            assert!(!is_valid_product_id(id), "{id:?} should be rejected");
        }
    }

    #[test]
    fn rejects_every_byte_outside_alphabet() {
        for b in 0u8..=127 {
            if ALPHABET.contains(&b) {
                continue;
            }
            let mut bytes = vec![b'A'; PRODUCT_ID_LEN];
            bytes[4] = b;
            let id = String::from_utf8(bytes).unwrap();
            assert!(!is_valid_product_id(&id), "byte {b} should be rejected");
        }
    }

    #[test]
    fn rejects_non_ascii_of_same_char_count() {
        // Ten chars in one case, ten bytes in the other; neither is the alphabet.
        assert!(!is_valid_product_id("ÄBCDEFGHIJ"));
        assert!(!is_valid_product_id("ABCDEFGHÍ"));
    }

    #[test]
    fn parse_round_trips_through_display() {
        let id: ProductId = "B07XJ8C8F5".parse().unwrap();
        assert_eq!(id.as_str(), "B07XJ8C8F5");
        assert_eq!(id.to_string(), "B07XJ8C8F5");
    }

    #[test]
    fn parse_rejects_invalid() {
        assert_eq!(ProductId::parse("lowercase1"), Err(InvalidProductId));
    }
}
