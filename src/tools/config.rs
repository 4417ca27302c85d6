// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for tool routing

use std::env;

#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Suggestions returned when the request does not specify a count
    pub default_suggestions: usize,
    /// Hard cap on suggestions per request
    pub max_suggestions: usize,
    /// Tool executions allowed per session per minute
    pub rate_limit_per_minute: usize,
}

impl ToolConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            default_suggestions: env::var("TOOLS_DEFAULT_SUGGESTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            max_suggestions: env::var("TOOLS_MAX_SUGGESTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
            rate_limit_per_minute: env::var("TOOLS_RATE_LIMIT_PER_MINUTE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.default_suggestions == 0 {
            return Err("Default suggestion count must be greater than 0".to_string());
        }
        if self.max_suggestions < self.default_suggestions {
            return Err("Max suggestions must be at least the default count".to_string());
        }
        if self.rate_limit_per_minute == 0 {
            return Err("Rate limit must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            default_suggestions: 5,
            max_suggestions: 20,
            rate_limit_per_minute: 30,
        }
    }
}
