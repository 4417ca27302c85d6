// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Check evaluator trait definition

use super::protocol::EmergencyProtocol;
use super::types::{PersonaType, SafetyFlag, SessionContext};

/// Input shared by all check evaluators for one classification cycle
#[derive(Debug, Clone)]
pub struct CheckInput {
    /// Raw input text as received from the chat layer
    pub raw: String,
    /// Lowercased, trimmed copy used for phrase matching
    pub normalized: String,
    /// The active advisory persona
    pub persona: PersonaType,
}

impl CheckInput {
    pub fn new(raw: &str, persona: PersonaType) -> Self {
        Self {
            raw: raw.to_string(),
            normalized: raw.trim().to_lowercase(),
            persona,
        }
    }
}

/// Result of running one check evaluator
#[derive(Debug, Clone, Default)]
pub struct CheckOutcome {
    pub flags: Vec<SafetyFlag>,
    pub protocol: Option<EmergencyProtocol>,
}

impl CheckOutcome {
    /// Outcome with no findings
    pub fn none() -> Self {
        Self::default()
    }

    pub fn flag(flag: SafetyFlag) -> Self {
        Self {
            flags: vec![flag],
            protocol: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty() && self.protocol.is_none()
    }
}

/// Trait for check evaluators
///
/// Evaluators are pure functions over their inputs: no shared mutable state,
/// no side effects. Aggregation over their outcomes is order-independent,
/// which keeps them individually testable and safe to run in any order.
pub trait SafetyCheck: Send + Sync {
    /// Evaluator name for logging
    fn name(&self) -> &'static str;

    /// Evaluate one input, returning zero or more flags
    fn evaluate(&self, input: &CheckInput, context: &SessionContext) -> CheckOutcome;
}
