//! Head-lag accounting for the swap stream.
//!
//! Head lag is the delta between our receive time and the swap's
//! on-chain block timestamp, i.e. how far behind the chain head the
//! cable's indexer runs.

use chrono::{DateTime, Utc};

/// Running lag numbers for one chain.
#[derive(Debug, Clone)]
pub struct HeadLagStats {
    pub count: u64,
    pub total_ms: i64,
    pub min_ms: i64,
    pub max_ms: i64,
    pub last_lag_ms: i64,
    pub last_swap: Option<DateTime<Utc>>,
}

impl HeadLagStats {
    pub fn new() -> Self {
        Self {
            count: 0,
            total_ms: 0,
            min_ms: i64::MAX,
            max_ms: 0,
            last_lag_ms: 0,
            last_swap: None,
        }
    }

    pub fn record(&mut self, lag_ms: i64, at: DateTime<Utc>) {
        self.count += 1;
        self.total_ms += lag_ms;
        self.last_lag_ms = lag_ms;
        self.last_swap = Some(at);
        if lag_ms < self.min_ms {
            self.min_ms = lag_ms;
        }
        if lag_ms > self.max_ms {
            self.max_ms = lag_ms;
        }
    }

    pub fn avg_ms(&self) -> i64 {
        if self.count == 0 {
            0
        } else {
            self.total_ms / self.count as i64
        }
    }
}

impl Default for HeadLagStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Lag of a swap relative to its on-chain timestamp, in milliseconds.
pub fn head_lag_ms(received: DateTime<Utc>, block_timestamp_ms: i64) -> i64 {
    received.timestamp_millis() - block_timestamp_ms
}

/// Short `12s` / `3m` age rendering for the stats table.
pub fn format_age(seconds: i64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else {
        format!("{}m", seconds / 60)
    }
}

/// Shorten a tx hash for log lines.
pub fn short_hash(hash: &str) -> String {
    if hash.len() > 12 {
        format!("{}...", &hash[..10])
    } else {
        hash.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_tracks_min_max_avg() {
        let mut stats = HeadLagStats::new();
        let at = Utc.timestamp_millis_opt(1_754_300_000_000).unwrap();
        stats.record(100, at);
        stats.record(300, at);
        stats.record(200, at);

        assert_eq!(stats.count, 3);
        assert_eq!(stats.min_ms, 100);
        assert_eq!(stats.max_ms, 300);
        assert_eq!(stats.avg_ms(), 200);
        assert_eq!(stats.last_lag_ms, 200);
        assert_eq!(stats.last_swap, Some(at));
    }

    #[test]
    fn test_empty_stats_have_zero_avg() {
        let stats = HeadLagStats::new();
        assert_eq!(stats.avg_ms(), 0);
        assert_eq!(stats.count, 0);
        assert!(stats.last_swap.is_none());
    }

    #[test]
    fn test_head_lag_ms() {
        let received = Utc.timestamp_millis_opt(1_754_300_001_500).unwrap();
        assert_eq!(head_lag_ms(received, 1_754_300_000_000), 1500);
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(0), "0s");
        assert_eq!(format_age(59), "59s");
        assert_eq!(format_age(60), "1m");
        assert_eq!(format_age(150), "2m");
    }

    #[test]
    fn test_short_hash() {
        assert_eq!(
            short_hash("0xdeadbeefdeadbeefdeadbeef"),
            "0xdeadbeef..."
        );
        assert_eq!(short_hash("0xshort"), "0xshort");
    }
}
