use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JWT payload.
///
/// `iat`/`exp` are epoch seconds. Anything beyond the registered claims rides
/// in `extra`; a missing extra claim is never a verification failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the principal's username.
    pub sub: String,

    /// Issued-at, epoch seconds.
    pub iat: i64,

    /// Expires-at, epoch seconds.
    pub exp: i64,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    pub fn subject(&self) -> &str {
        &self.sub
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Whether the token is past its lifetime at `now`. Expiry is strict:
    /// a token whose `exp` equals `now` is already expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn claims_expiring_at(exp: i64) -> Claims {
        Claims {
            sub: "admin".to_string(),
            iat: exp - 3600,
            exp,
            extra: HashMap::new(),
        }
    }

    #[test]
    fn expiry_is_strict() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert!(claims_expiring_at(now.timestamp()).is_expired_at(now));
        assert!(claims_expiring_at(now.timestamp() - 1).is_expired_at(now));
        assert!(!claims_expiring_at(now.timestamp() + 1).is_expired_at(now));
    }

    #[test]
    fn extra_claims_flatten_into_payload() {
        let mut extra = HashMap::new();
        extra.insert("dept".to_string(), serde_json::json!("warehouse"));
        let claims = Claims {
            sub: "usuario".to_string(),
            iat: 1,
            exp: 2,
            extra,
        };

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["sub"], "usuario");
        assert_eq!(value["dept"], "warehouse");

        let back: Claims = serde_json::from_value(value).unwrap();
        assert_eq!(back, claims);
    }
}
