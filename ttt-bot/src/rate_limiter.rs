use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::debug;
use ttt_types::UserId;

/// Token bucket: `max_tokens` burst, one token back every `refill_rate`.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    tokens: u32,
    max_tokens: u32,
    refill_rate: Duration,
    last_refill: Instant,
}

impl RateLimiter {
    pub fn new(max_tokens: u32, refill_rate: Duration) -> Self {
        Self {
            tokens: max_tokens,
            max_tokens,
            refill_rate,
            last_refill: Instant::now(),
        }
    }

    pub fn try_acquire(&mut self) -> bool {
        self.refill_tokens();

        if self.tokens > 0 {
            self.tokens -= 1;
            true
        } else {
            false
        }
    }

    fn refill_tokens(&mut self) {
        if self.refill_rate.is_zero() {
            self.tokens = self.max_tokens;
            return;
        }

        let elapsed = self.last_refill.elapsed();
        let refills = elapsed.as_nanos() / self.refill_rate.as_nanos();
        if refills == 0 {
            return;
        }

        let missing = self.max_tokens - self.tokens;
        if refills >= u128::from(missing) {
            self.tokens = self.max_tokens;
            self.last_refill = Instant::now();
        } else {
            // refills < missing <= u32::MAX here
            let refills = refills as u32;
            self.tokens += refills;
            self.last_refill += self.refill_rate * refills;
        }
    }

    pub fn remaining_tokens(&mut self) -> u32 {
        self.refill_tokens();
        self.tokens
    }
}

/// Checks between two sweeps of idle buckets inside `check`.
const SWEEP_EVERY: u64 = 1024;

/// One bucket per user, created on first use and dropped again once it has
/// refilled completely.
pub struct UserRateLimiter {
    buckets: DashMap<UserId, RateLimiter>,
    max_tokens: u32,
    refill_rate: Duration,
    calls: AtomicU64,
}

impl UserRateLimiter {
    pub fn new(max_tokens: u32, refill_rate: Duration) -> Self {
        Self {
            buckets: DashMap::new(),
            max_tokens,
            refill_rate,
            calls: AtomicU64::new(0),
        }
    }

    pub fn check(&self, user_id: &str) -> bool {
        // Sweep before taking the entry: retain locks every shard.
        if (self.calls.fetch_add(1, Ordering::Relaxed) + 1) % SWEEP_EVERY == 0 {
            self.evict_idle();
        }

        self.buckets
            .entry(user_id.to_string())
            .or_insert_with(|| RateLimiter::new(self.max_tokens, self.refill_rate))
            .try_acquire()
    }

    /// Drops every bucket that is back to a full burst. A fresh bucket is
    /// indistinguishable from a full one, so nothing is forgotten.
    pub fn evict_idle(&self) -> usize {
        let before = self.buckets.len();
        let max_tokens = self.max_tokens;
        self.buckets.retain(|_, bucket| bucket.remaining_tokens() < max_tokens);
        let evicted = before.saturating_sub(self.buckets.len());
        if evicted > 0 {
            debug!("Evicted {} idle rate limit buckets", evicted);
        }
        evicted
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

impl Default for UserRateLimiter {
    fn default() -> Self {
        Self::new(10, Duration::from_secs(1))
    }
}
