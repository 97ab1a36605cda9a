//! crates/partner_deck_core/src/quota.rs
//!
//! Daily swipe counter. This is a plain counter: it never refuses an increment.
//! The limit is enforced by the swipe engine checking `has_reached_limit` first.

use serde::Serialize;

pub const DEFAULT_DAILY_SWIPE_LIMIT: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeQuota {
    count: u32,
    limit: u32,
}

/// Snapshot of the quota for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCounters {
    pub count: u32,
    pub limit: u32,
}

impl SwipeQuota {
    pub fn new(limit: u32) -> Self {
        Self { count: 0, limit }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    pub fn has_reached_limit(&self) -> bool {
        self.count >= self.limit
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub fn counters(&self) -> DailyCounters {
        DailyCounters {
            count: self.count,
            limit: self.limit,
        }
    }
}

impl Default for SwipeQuota {
    fn default() -> Self {
        Self::new(DEFAULT_DAILY_SWIPE_LIMIT)
    }
}
