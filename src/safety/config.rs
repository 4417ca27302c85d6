// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the safety gate and audit log

use std::env;

#[derive(Debug, Clone)]
pub struct SafetyConfig {
    /// Whether structural spam heuristics are applied
    pub spam_heuristics_enabled: bool,
    /// Extra blocked terms on top of the static blocklist
    pub custom_blocked_terms: Vec<String>,
    /// Whether classifier outcomes are recorded in the audit log
    pub audit_enabled: bool,
    /// Maximum audit events kept in memory (oldest evicted first)
    pub audit_max_events: usize,
}

impl SafetyConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            spam_heuristics_enabled: env::var("SAFETY_SPAM_HEURISTICS")
                .map(|v| v.to_lowercase() != "false")
                .unwrap_or(true),
            custom_blocked_terms: env::var("SAFETY_CUSTOM_BLOCKED_TERMS")
                .map(|v| {
                    v.split(',')
                        .map(|t| t.trim().to_lowercase())
                        .filter(|t| !t.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            audit_enabled: env::var("SAFETY_AUDIT_ENABLED")
                .map(|v| v.to_lowercase() != "false")
                .unwrap_or(true),
            audit_max_events: env::var("SAFETY_AUDIT_MAX_EVENTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.audit_enabled && self.audit_max_events == 0 {
            return Err("Audit max events must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            spam_heuristics_enabled: true,
            custom_blocked_terms: Vec::new(),
            audit_enabled: true,
            audit_max_events: 10_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SafetyConfig::default();
        assert!(config.spam_heuristics_enabled);
        assert!(config.audit_enabled);
        assert_eq!(config.audit_max_events, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_audit_capacity() {
        let mut config = SafetyConfig::default();
        config.audit_max_events = 0;
        assert!(config.validate().is_err());

        config.audit_enabled = false;
        assert!(config.validate().is_ok());
    }
}
