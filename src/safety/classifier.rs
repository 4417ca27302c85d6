// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Safety classifier orchestration
//!
//! Runs every check evaluator over the input, aggregates their flags, and
//! resolves the overall verdict. Evaluators run in a fixed priority order
//! with the emergency check first, so emergency protocols take precedence
//! over later matches; flag aggregation itself is order-independent.

use tracing::{debug, info, warn};

use super::check::{CheckInput, SafetyCheck};
use super::checks::{
    AggressionCheck, AllergenCheck, ContentModerationCheck, EmergencyCheck,
    InappropriateRequestCheck, MedicalAdviceCheck,
};
use super::config::SafetyConfig;
use super::types::{PersonaType, SafetyLevel, SafetyVerdict, SessionContext};

pub struct SafetyClassifier {
    checks: Vec<Box<dyn SafetyCheck>>,
}

impl SafetyClassifier {
    pub fn new(config: &SafetyConfig) -> Self {
        let checks: Vec<Box<dyn SafetyCheck>> = vec![
            Box::new(EmergencyCheck::new()),
            Box::new(MedicalAdviceCheck::new()),
            Box::new(AllergenCheck::new()),
            Box::new(
                ContentModerationCheck::new()
                    .with_custom_terms(config.custom_blocked_terms.clone())
                    .with_spam_heuristics(config.spam_heuristics_enabled),
            ),
            Box::new(AggressionCheck::new()),
            Box::new(InappropriateRequestCheck::new()),
        ];
        Self { checks }
    }

    /// Classifier with a custom evaluator list, for isolated tests
    pub fn with_checks(checks: Vec<Box<dyn SafetyCheck>>) -> Self {
        Self { checks }
    }

    /// Classify one input cycle. Never fails: an input matching no rule
    /// yields an `ok` verdict that allows the response.
    pub fn classify(
        &self,
        input: &str,
        persona: PersonaType,
        context: &SessionContext,
    ) -> SafetyVerdict {
        let check_input = CheckInput::new(input, persona);

        let mut flags = Vec::new();
        let mut protocol = None;

        for check in &self.checks {
            let outcome = check.evaluate(&check_input, context);
            if !outcome.is_empty() {
                debug!(
                    check = check.name(),
                    flags = outcome.flags.len(),
                    "safety check matched"
                );
            }
            if protocol.is_none() {
                protocol = outcome.protocol;
            }
            flags.extend(outcome.flags);
        }

        let level = flags
            .iter()
            .map(|flag| flag.level)
            .max()
            .unwrap_or(SafetyLevel::Ok);
        let allow_response = level != SafetyLevel::Blocked;

        match level {
            SafetyLevel::Ok => {
                debug!(persona = persona.as_str(), "input classified ok");
            }
            SafetyLevel::Warning => {
                info!(
                    persona = persona.as_str(),
                    flags = flags.len(),
                    "input classified with warnings"
                );
            }
            SafetyLevel::Urgent | SafetyLevel::Blocked => {
                warn!(
                    persona = persona.as_str(),
                    flags = flags.len(),
                    allow_response,
                    emergency = protocol.is_some(),
                    "input escalated by safety classifier"
                );
            }
        }

        SafetyVerdict {
            level,
            flags,
            allow_response,
            emergency_protocol: protocol,
        }
    }
}

impl Default for SafetyClassifier {
    fn default() -> Self {
        Self::new(&SafetyConfig::default())
    }
}
