//! Lock record codec.
//!
//! A lock record is the whole payload of a lock object. It is stored as a
//! small JSON document:
//!
//! ```json
//! {"transaction_id":123,"created_at":"2024-05-01T10:00:00Z"}
//! ```
//!
//! Decoding ignores fields it does not know about, so newer writers can add
//! fields without breaking older readers.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The payload stored at a resource key while the resource is locked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRecord {
    /// Identity of the transaction/run holding the lock.
    #[serde(rename = "transaction_id")]
    pub holder: i64,

    /// When the lock was acquired. Informational only, never used for expiry.
    pub created_at: DateTime<Utc>,
}

impl LockRecord {
    /// Create a record for `holder` stamped with the current time.
    pub fn new(holder: i64) -> Self {
        Self {
            holder,
            created_at: Utc::now(),
        }
    }

    /// Encode the record to bytes.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decode a record from bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// How long ago the lock was acquired.
    pub fn age(&self) -> Duration {
        Utc::now().signed_duration_since(self.created_at)
    }

    /// Format the age as a human-readable string.
    pub fn age_string(&self) -> String {
        let age = self.age();
        let minutes = age.num_minutes();
        let hours = age.num_hours();
        let days = age.num_days();

        if days > 0 {
            format!("{}d {}h", days, hours % 24)
        } else if hours > 0 {
            format!("{}h {}m", hours, minutes % 60)
        } else {
            format!("{}m", minutes.max(0))
        }
    }

    /// Whether the lock is older than `stale_minutes`. Display only.
    pub fn is_stale(&self, stale_minutes: u32) -> bool {
        self.age().num_minutes() > i64::from(stale_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn encode_then_decode_preserves_record() {
        let record = LockRecord {
            holder: 123,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
        };
        let decoded = LockRecord::decode(&record.encode().unwrap()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn subsecond_timestamps_survive() {
        let record = LockRecord::new(-7);
        let decoded = LockRecord::decode(&record.encode().unwrap()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn encoding_uses_transaction_id_field() {
        let record = LockRecord::new(42);
        let json = String::from_utf8(record.encode().unwrap()).unwrap();
        assert!(json.contains("\"transaction_id\":42"));
        assert!(json.contains("created_at"));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let bytes = br#"{"transaction_id":9,"created_at":"2024-05-01T10:00:00Z","owner":"ci@runner","ttl":30}"#;
        let record = LockRecord::decode(bytes).unwrap();
        assert_eq!(record.holder, 9);
    }

    #[test]
    fn malformed_payload_fails_to_decode() {
        assert!(LockRecord::decode(b"not json").is_err());
        assert!(LockRecord::decode(b"").is_err());
        assert!(LockRecord::decode(br#"{"created_at":"2024-05-01T10:00:00Z"}"#).is_err());
        assert!(LockRecord::decode(br#"{"transaction_id":"abc","created_at":"2024-05-01T10:00:00Z"}"#).is_err());
    }

    #[test]
    fn age_string_picks_largest_unit() {
        let mut record = LockRecord::new(1);
        assert!(record.age_string().ends_with('m'));

        record.created_at = Utc::now() - Duration::hours(2);
        assert!(record.age_string().contains('h'));

        record.created_at = Utc::now() - Duration::days(3);
        assert!(record.age_string().contains('d'));
    }

    #[test]
    fn staleness_uses_threshold() {
        let mut record = LockRecord::new(1);
        assert!(!record.is_stale(120));

        record.created_at = Utc::now() - Duration::minutes(150);
        assert!(record.is_stale(120));
    }
}
