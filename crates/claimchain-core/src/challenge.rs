//! Challenge messages for proving control of an address.
//!
//! A challenge is self-describing: `"{address}:{issued_at}:{tag}"`. Nothing
//! about issued challenges is remembered, so a submission is judged only by
//! what the message itself says.

use std::fmt;

use crate::crypto::Address;
use crate::error::CoreError;

/// Tag appended to every challenge unless configured otherwise.
pub const DEFAULT_CHALLENGE_TAG: &str = "starRegistry";

/// How long a challenge stays valid, in seconds.
pub const DEFAULT_VALIDATION_WINDOW_SECS: i64 = 300;

const SEPARATOR: char = ':';

/// A parsed challenge message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub address: Address,
    /// Issue time, seconds since the Unix epoch.
    pub issued_at: i64,
    pub tag: String,
}

impl Challenge {
    pub fn new(address: Address, issued_at: i64, tag: impl Into<String>) -> Self {
        Self {
            address,
            issued_at,
            tag: tag.into(),
        }
    }

    /// The exact text a client must sign.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Parse a message into exactly three `:`-separated fields.
    pub fn parse(message: &str) -> Result<Self, CoreError> {
        let fields: Vec<&str> = message.split(SEPARATOR).collect();
        let [address, issued_at, tag] = fields.as_slice() else {
            return Err(CoreError::MalformedChallenge(format!(
                "expected 3 fields, found {}",
                fields.len()
            )));
        };

        if address.is_empty() || tag.is_empty() {
            return Err(CoreError::MalformedChallenge("empty field".into()));
        }

        let digits = issued_at.strip_prefix('-').unwrap_or(*issued_at);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::MalformedChallenge(format!(
                "timestamp {issued_at:?} is not an integer"
            )));
        }

        let issued_at = issued_at.parse::<i64>().map_err(|_| {
            CoreError::MalformedChallenge(format!("timestamp {issued_at:?} is not an integer"))
        })?;

        Ok(Self::new(Address::new(*address), issued_at, *tag))
    }

    /// Seconds between issuance and `now`. Negative if issued in the future.
    pub fn elapsed(&self, now: i64) -> i64 {
        now.saturating_sub(self.issued_at)
    }

    /// A challenge expires once `window` seconds have elapsed.
    pub fn is_expired(&self, now: i64, window: i64) -> bool {
        self.elapsed(now) >= window
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            self.address, self.issued_at, self.tag
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_format() {
        let challenge = Challenge::new(Address::new("A"), 1_736_870_400, DEFAULT_CHALLENGE_TAG);
        assert_eq!(challenge.message(), "A:1736870400:starRegistry");
    }

    #[test]
    fn test_parse_roundtrip() {
        let challenge = Challenge::new(Address::new("abc123"), 42, "starRegistry");
        let parsed = Challenge::parse(&challenge.message()).unwrap();
        assert_eq!(parsed, challenge);
    }

    #[test]
    fn test_parse_wrong_field_count() {
        for message in ["", "a", "a:1", "a:1:tag:extra", "a:b:c:d:e"] {
            let result = Challenge::parse(message);
            assert!(
                matches!(result, Err(CoreError::MalformedChallenge(_))),
                "{message:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_non_numeric_timestamp() {
        let result = Challenge::parse("a:yesterday:starRegistry");
        assert!(matches!(result, Err(CoreError::MalformedChallenge(_))));
    }

    #[test]
    fn test_parse_rejects_signed_or_padded_timestamp() {
        for message in ["A:+5:tag", "A: 5:tag", "A:5 :tag", "A:-:tag", "A:--5:tag"] {
            let result = Challenge::parse(message);
            assert!(
                matches!(result, Err(CoreError::MalformedChallenge(_))),
                "{message:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_negative_timestamp() {
        let parsed = Challenge::parse("A:-5:tag").unwrap();
        assert_eq!(parsed.issued_at, -5);
    }

    #[test]
    fn test_parse_timestamp_overflow() {
        let result = Challenge::parse("A:99999999999999999999:tag");
        assert!(matches!(result, Err(CoreError::MalformedChallenge(_))));
    }

    #[test]
    fn test_parse_empty_fields() {
        assert!(Challenge::parse(":1:starRegistry").is_err());
        assert!(Challenge::parse("a:1:").is_err());
        assert!(Challenge::parse("a::starRegistry").is_err());
    }

    #[test]
    fn test_expiry_boundary() {
        let challenge = Challenge::new(Address::new("a"), 1000, "t");

        assert!(!challenge.is_expired(1000, 300));
        assert!(!challenge.is_expired(1299, 300));
        assert!(challenge.is_expired(1300, 300));
        assert!(challenge.is_expired(1301, 300));
    }

    #[test]
    fn test_future_timestamp_not_expired() {
        let challenge = Challenge::new(Address::new("a"), 2000, "t");
        assert_eq!(challenge.elapsed(1000), -1000);
        assert!(!challenge.is_expired(1000, 300));
    }

    #[test]
    fn test_extreme_timestamp_does_not_overflow() {
        let challenge = Challenge::new(Address::new("a"), i64::MIN, "t");
        assert!(challenge.is_expired(i64::MAX, 300));
    }
}
