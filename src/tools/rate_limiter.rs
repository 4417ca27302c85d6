// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-session sliding-window rate limiter for tool executions

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

pub struct ToolRateLimiter {
    sessions: RwLock<HashMap<String, Vec<Instant>>>,
    max_per_window: usize,
    window: Duration,
}

impl ToolRateLimiter {
    /// Rate limiter with a default 60-second window
    pub fn new(max_per_minute: usize) -> Self {
        Self::with_window(max_per_minute, Duration::from_secs(60))
    }

    /// Rate limiter with a custom window duration (for testing)
    pub fn with_window(max_per_window: usize, window: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_per_window,
            window,
        }
    }

    /// Check whether a session is within its limit (does NOT record the
    /// request)
    pub fn check(&self, session_id: &str) -> bool {
        let now = Instant::now();
        let sessions = match self.sessions.read() {
            Ok(s) => s,
            Err(_) => return true,
        };
        match sessions.get(session_id) {
            None => true,
            Some(timestamps) => {
                let recent = timestamps
                    .iter()
                    .filter(|&&t| now.duration_since(t) < self.window)
                    .count();
                recent < self.max_per_window
            }
        }
    }

    /// Record a request for the given session
    pub fn record(&self, session_id: &str) {
        let mut sessions = match self.sessions.write() {
            Ok(s) => s,
            Err(_) => return,
        };
        let timestamps = sessions.entry(session_id.to_string()).or_default();
        let now = Instant::now();
        // Prune expired entries while we hold the lock
        timestamps.retain(|&t| now.duration_since(t) < self.window);
        timestamps.push(now);
    }
}
