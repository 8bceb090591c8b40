//! Watermark-based polling cursor.
//!
//! The watermark is the highest timestamp observed in any previously
//! successful poll batch. It is the exclusive lower bound for the next
//! query (strictly-greater-than), so rows whose timestamps collide with
//! the boundary may be re-observed on a later poll. That duplicate
//! delivery is accepted at-least-once behaviour, not a bug.
//!
//! Invariants:
//! - the watermark never moves backward,
//! - an empty batch leaves it unchanged (never advanced to "now", which
//!   would silently skip rows delayed by insert-to-visible latency).

use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::record::AuditRecord;

/// In-memory polling cursor. Resets on every process restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Watermark {
    current: DateTime<Utc>,
}

impl Watermark {
    /// Start the cursor at an explicit timestamp.
    pub fn starting_at(at: DateTime<Utc>) -> Self {
        Self { current: at }
    }

    /// Start the cursor at `now - lookback`, the standard cold-start
    /// position.
    pub fn with_lookback(lookback: StdDuration) -> Self {
        let lookback = Duration::from_std(lookback).unwrap_or_else(|_| Duration::zero());
        Self {
            current: Utc::now() - lookback,
        }
    }

    /// Exclusive lower bound for the next poll query.
    pub fn value(&self) -> DateTime<Utc> {
        self.current
    }

    /// Advance to the maximum timestamp in a successful poll batch.
    ///
    /// An empty batch is a no-op. A batch whose maximum is below the
    /// current cursor (late, already-covered rows) is also a no-op.
    /// Returns whether the cursor moved.
    pub fn observe_batch(&mut self, batch: &[AuditRecord]) -> bool {
        let Some(max) = batch.iter().map(|row| row.timestamp).max() else {
            return false;
        };
        if max > self.current {
            self.current = max;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row_at(ts: DateTime<Utc>) -> AuditRecord {
        let mut row = AuditRecord::synthetic("test-service");
        row.timestamp = ts;
        row
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_batch_leaves_watermark_unchanged() {
        let mut wm = Watermark::starting_at(t0());
        assert!(!wm.observe_batch(&[]));
        assert_eq!(wm.value(), t0());
    }

    #[test]
    fn batch_advances_watermark_to_maximum_timestamp() {
        let mut wm = Watermark::starting_at(t0());
        let batch = vec![
            row_at(t0() + Duration::seconds(1)),
            row_at(t0() + Duration::seconds(2)),
            row_at(t0() + Duration::seconds(2)), // timestamp collision
        ];

        assert!(wm.observe_batch(&batch));
        assert_eq!(wm.value(), t0() + Duration::seconds(2));
    }

    #[test]
    fn watermark_never_moves_backward() {
        let mut wm = Watermark::starting_at(t0());
        let late = vec![row_at(t0() - Duration::seconds(30))];

        assert!(!wm.observe_batch(&late));
        assert_eq!(wm.value(), t0());
    }

    #[test]
    fn repeated_batches_are_monotonic() {
        let mut wm = Watermark::starting_at(t0());
        let previous = wm.value();

        wm.observe_batch(&[row_at(t0() + Duration::seconds(5))]);
        assert!(wm.value() >= previous);

        let previous = wm.value();
        wm.observe_batch(&[row_at(t0() + Duration::seconds(3))]);
        assert!(wm.value() >= previous);
    }

    #[test]
    fn lookback_cursor_starts_in_the_past() {
        let wm = Watermark::with_lookback(StdDuration::from_secs(5));
        assert!(wm.value() < Utc::now());
    }
}
