//! Concurrency tokens identifying registered baseline sessions

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier binding a working collection to its registered
/// baseline. Two tokens are equal iff their underlying ids are equal; the
/// registry uses tokens as map keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConcurrencyToken(String);

impl ConcurrencyToken {
    /// Mint a fresh token with a random v4 UUID id
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The underlying token id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConcurrencyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_unique() {
        let a = ConcurrencyToken::generate();
        let b = ConcurrencyToken::generate();

        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_display_is_token_id() {
        let token = ConcurrencyToken::generate();
        assert_eq!(token.to_string(), token.as_str());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let token = ConcurrencyToken::generate();
        let json = serde_json::to_string(&token).unwrap();

        assert_eq!(json, format!("\"{}\"", token.as_str()));

        let back: ConcurrencyToken = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token);
    }
}
