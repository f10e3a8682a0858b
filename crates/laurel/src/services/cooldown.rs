//! Experience cooldown ledger
//!
//! Rate-limits experience accrual to at most once per interval per user. The
//! ledger is an owned, mutex-guarded component rather than ambient state, and
//! grows with the number of observed users (no eviction).

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};

const DEFAULT_INTERVAL_SECS: i64 = 60;

/// Per-user admission gate for experience accrual.
pub struct CooldownTracker {
    interval: Duration,
    ledger: Mutex<HashMap<u64, DateTime<Utc>>>,
}

impl CooldownTracker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            ledger: Mutex::new(HashMap::new()),
        }
    }

    /// Admit or deny an accrual for `user_id`.
    ///
    /// The first observation of a user admits and records the timestamp.
    /// Afterwards an accrual is admitted, and the timestamp refreshed, only
    /// when the interval has fully elapsed; denial leaves the record intact.
    pub fn admit(&self, user_id: u64) -> bool {
        self.admit_at(user_id, Utc::now())
    }

    fn admit_at(&self, user_id: u64, now: DateTime<Utc>) -> bool {
        let mut ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);

        match ledger.get(&user_id) {
            Some(last) if now.signed_duration_since(*last) < self.interval => false,
            _ => {
                ledger.insert(user_id, now);
                true
            }
        }
    }
}

impl Default for CooldownTracker {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_INTERVAL_SECS))
    }
}
