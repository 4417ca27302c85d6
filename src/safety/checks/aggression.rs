// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Aggression and punitive-method check, active for the training persona only

use crate::safety::check::{CheckInput, CheckOutcome, SafetyCheck};
use crate::safety::rules::{AGGRESSION_BEHAVIOR_PATTERNS, PUNITIVE_METHOD_PATTERNS};
use crate::safety::types::{FlagKind, PersonaType, SafetyFlag, SafetyLevel, SessionContext};

pub struct AggressionCheck;

impl AggressionCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AggressionCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SafetyCheck for AggressionCheck {
    fn name(&self) -> &'static str {
        "aggression"
    }

    fn evaluate(&self, input: &CheckInput, _context: &SessionContext) -> CheckOutcome {
        if input.persona != PersonaType::Training {
            return CheckOutcome::none();
        }

        let mut flags = Vec::new();

        let behavior_hit = AGGRESSION_BEHAVIOR_PATTERNS
            .iter()
            .any(|pattern| input.normalized.contains(pattern));
        if behavior_hit {
            flags.push(
                SafetyFlag::new(
                    SafetyLevel::Warning,
                    FlagKind::RedFlag,
                    "I comportamenti aggressivi richiedono la valutazione dal vivo di un \
                     educatore cinofilo qualificato. Posso darti solo indicazioni generali di \
                     gestione in sicurezza.",
                )
                .with_action("Trova un educatore", "/search/trainers"),
            );
        }

        let punitive_hit = PUNITIVE_METHOD_PATTERNS
            .iter()
            .any(|pattern| input.normalized.contains(pattern));
        if punitive_hit {
            flags.push(SafetyFlag::new(
                SafetyLevel::Blocked,
                FlagKind::ContentViolation,
                "Non fornisco indicazioni su metodi punitivi o coercitivi. L'educazione si \
                 basa esclusivamente sul rinforzo positivo: premiare i comportamenti corretti \
                 funziona meglio e non danneggia il benessere dell'animale.",
            ));
        }

        CheckOutcome {
            flags,
            protocol: None,
        }
    }
}
