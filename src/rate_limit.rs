//! Per-client sliding-window rate limiting.

use std::collections::{HashMap, VecDeque};
use std::net::IpAddr;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Length of the sliding window.
pub const WINDOW: Duration = Duration::from_secs(60);

/// Admits at most `limit` requests per client address within any [`WINDOW`].
///
/// A client's own timestamps are trimmed on each of its calls. Once per window, any call also
/// sweeps out clients that have gone quiet, so the table only holds recently active addresses.
pub struct RateLimiter {
    limit: usize,
    window: Duration,
    state: Mutex<LimiterState>,
}

#[derive(Default)]
struct LimiterState {
    clients: HashMap<IpAddr, VecDeque<Instant>>,
    last_sweep: Option<Instant>,
}

impl LimiterState {
    fn sweep(&mut self, now: Instant, window: Duration) {
        let before = self.clients.len();
        self.clients.retain(|_, timestamps| {
            timestamps
                .back()
                .is_some_and(|&latest| now.saturating_duration_since(latest) < window)
        });
        self.last_sweep = Some(now);
        let removed = before - self.clients.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = self.clients.len(), "Pruned idle rate-limit clients");
        }
    }
}

impl RateLimiter {
    /// Limiter admitting `limit` requests per minute per address.
    pub fn new(limit: usize) -> Self {
        Self::with_window(limit, WINDOW)
    }

    /// Limiter with a custom window length.
    pub fn with_window(limit: usize, window: Duration) -> Self {
        Self {
            limit,
            window,
            state: Mutex::new(LimiterState::default()),
        }
    }

    /// Configured ceiling.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Record a request from `client` at `now`; `false` when it must be rejected.
    ///
    /// Rejected requests are not recorded, so a client that keeps retrying is readmitted as soon
    /// as its oldest admitted request leaves the window.
    pub fn check(&self, client: IpAddr, now: Instant) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let sweep_due = state
            .last_sweep
            .map(|last| now.saturating_duration_since(last) >= self.window);
        match sweep_due {
            Some(true) => state.sweep(now, self.window),
            Some(false) => {}
            None => state.last_sweep = Some(now),
        }
        let timestamps = state.clients.entry(client).or_default();
        while let Some(&oldest) = timestamps.front() {
            if now.saturating_duration_since(oldest) < self.window {
                break;
            }
            timestamps.pop_front();
        }

        if timestamps.len() >= self.limit {
            tracing::warn!(ip = %client, limit = self.limit, "Rate limit exceeded");
            return false;
        }
        timestamps.push_back(now);
        true
    }

    /// Drop clients with no request inside the window.
    pub fn prune(&self, now: Instant) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .sweep(now, self.window);
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clients
            .len()
    }
}
