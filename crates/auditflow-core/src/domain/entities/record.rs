//! Audit record and log entry entities.
//!
//! An [`AuditRecord`] is the synthetic row the producer writes into the
//! transactional row store and the poller reads back from the analytical
//! changelog. A [`LogEntry`] is the append-only audit line the logging sink
//! receives for every successful write/poll event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A flat audit row. No cross-record referential integrity; uniqueness is
/// carried entirely by the application-generated `puid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Application-generated unique identifier (UUID v4 string).
    pub puid: String,
    pub action: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub service_name: String,
    /// Opaque JSON payload. Stored as a string; consumers parse it
    /// best-effort via [`parse_details`].
    pub metadata: String,
    pub retry_count: i64,
    pub error_details: Option<String>,
}

impl AuditRecord {
    /// Generate a synthetic record with a fresh identifier and the current
    /// wall-clock timestamp.
    pub fn synthetic(service_name: impl Into<String>) -> Self {
        Self {
            puid: Uuid::new_v4().to_string(),
            action: "CREATE_PAYMENT".into(),
            status: "SUCCESS".into(),
            timestamp: Utc::now(),
            service_name: service_name.into(),
            metadata: r#"{"amount": 100.50, "currency": "USD"}"#.into(),
            retry_count: 0,
            error_details: None,
        }
    }

    /// Best-effort view of the metadata payload as JSON.
    pub fn metadata_json(&self) -> serde_json::Value {
        parse_details(&self.metadata)
    }
}

/// An audit line destined for the append-only logging sink table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub log_time: DateTime<Utc>,
    pub source: String,
    pub details: String,
}

impl LogEntry {
    /// Create an entry stamped with the current wall-clock time.
    pub fn now(source: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            log_time: Utc::now(),
            source: source.into(),
            details: details.into(),
        }
    }
}

/// Parse a details string as JSON, falling back to the raw string when it
/// is not valid JSON. Parse failures are not errors here: logged payloads
/// are frequently plain prose.
pub fn parse_details(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_records_have_distinct_puids() {
        let a = AuditRecord::synthetic("payment-service");
        let b = AuditRecord::synthetic("payment-service");

        assert!(!a.puid.is_empty());
        assert!(!b.puid.is_empty());
        assert_ne!(a.puid, b.puid);
    }

    #[test]
    fn synthetic_record_carries_json_metadata() {
        let record = AuditRecord::synthetic("payment-service");
        let value = record.metadata_json();

        assert_eq!(value["currency"], "USD");
    }

    #[test]
    fn parse_details_returns_raw_string_on_invalid_json() {
        let value = parse_details("not json at all");
        assert_eq!(value, serde_json::Value::String("not json at all".into()));
    }

    #[test]
    fn parse_details_parses_valid_json() {
        let value = parse_details(r#"{"amount": 1}"#);
        assert_eq!(value["amount"], 1);
    }

    #[test]
    fn record_round_trips_through_serde() {
        let record = AuditRecord::synthetic("transaction-service");
        let json = serde_json::to_string(&record).unwrap();
        let back: AuditRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, back);
    }
}
