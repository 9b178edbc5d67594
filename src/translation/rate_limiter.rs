/*!
 * Sliding-window request accounting.
 *
 * Every completed provider call appends a timestamp to a log kept in the
 * key/value store. Reading the quota prunes entries older than the window
 * and reports how many calls are left. The count is advisory: nothing here
 * blocks a request.
 */

use anyhow::Result;
use chrono::{DateTime, Duration, Local};
use log::{debug, warn};
use std::sync::Arc;

use crate::database::KeyValueStore;

/// Store key holding the newline-delimited request log
pub const REQUEST_LOG_KEY: &str = "jsonbabel.request_log";

/// Default sliding window length in seconds
pub const DEFAULT_WINDOW_SECS: u64 = 3600;

/// Default number of requests allowed per window
pub const DEFAULT_MAX_REQUESTS: u32 = 100;

/// Tracks recent translation calls in a sliding window
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn KeyValueStore>,
    window: Duration,
    max_requests: u32,
}

impl RateLimiter {
    /// Create a limiter with the given window (seconds) and cap
    pub fn new(store: Arc<dyn KeyValueStore>, window_secs: u64, max_requests: u32) -> Self {
        Self {
            store,
            window: Duration::seconds(i64::try_from(window_secs).unwrap_or(i64::MAX).min(i64::MAX / 1000)),
            max_requests,
        }
    }

    /// Create a limiter with the default one hour / 100 requests policy
    pub fn with_defaults(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, DEFAULT_WINDOW_SECS, DEFAULT_MAX_REQUESTS)
    }

    /// Requests still available in the current window
    pub fn available_requests(&self) -> Result<u32> {
        self.available_requests_at(Local::now())
    }

    /// Requests still available in the window ending at `now`
    pub fn available_requests_at(&self, now: DateTime<Local>) -> Result<u32> {
        let recent = self.recent_requests_at(now)?;
        let used = u32::try_from(recent.len()).unwrap_or(u32::MAX);
        Ok(self.max_requests.saturating_sub(used))
    }

    /// Log a completed request at the current time
    pub fn record_request(&self) -> Result<()> {
        self.record_request_at(Local::now())
    }

    /// Log a completed request at `at`
    pub fn record_request_at(&self, at: DateTime<Local>) -> Result<()> {
        let mut log = self.store.get(REQUEST_LOG_KEY)?.unwrap_or_default();
        if !log.is_empty() && !log.ends_with('\n') {
            log.push('\n');
        }
        log.push_str(&at.to_rfc3339());
        log.push('\n');
        self.store.set(REQUEST_LOG_KEY, &log)
    }

    /// Timestamps inside the window ending at `now`, oldest first.
    ///
    /// Entries outside the window and unparseable lines are dropped and the
    /// pruned log is written back.
    pub fn recent_requests_at(&self, now: DateTime<Local>) -> Result<Vec<DateTime<Local>>> {
        let Some(log) = self.store.get(REQUEST_LOG_KEY)? else {
            return Ok(Vec::new());
        };

        let cutoff = now.checked_sub_signed(self.window);
        let mut recent = Vec::new();
        let mut dropped = 0usize;

        for line in log.lines().filter(|l| !l.trim().is_empty()) {
            match DateTime::parse_from_rfc3339(line.trim()) {
                Ok(stamp) => {
                    let stamp = stamp.with_timezone(&Local);
                    if cutoff.is_none_or(|cutoff| stamp > cutoff) {
                        recent.push(stamp);
                    } else {
                        dropped += 1;
                    }
                }
                Err(e) => {
                    warn!("Dropping unreadable request log entry '{}': {}", line, e);
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            debug!("Pruned {} request log entries older than the window", dropped);
            let pruned: String = recent.iter().map(|s| format!("{}\n", s.to_rfc3339())).collect();
            self.store.set(REQUEST_LOG_KEY, &pruned)?;
        }

        Ok(recent)
    }

    /// Configured cap per window
    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }
}
