// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Two-tier emergency keyword check
//!
//! Tier 1 (critical) matches escalate to an emergency protocol; tier 2
//! (urgent but non-critical) matches emit a warning flag only. Tier 1 is
//! checked first and short-circuits tier 2.

use crate::safety::check::{CheckInput, CheckOutcome, SafetyCheck};
use crate::safety::protocol::match_protocol;
use crate::safety::rules::{TIER1_EMERGENCY_TRIGGERS, TIER2_URGENCY_TRIGGERS};
use crate::safety::types::{FlagKind, SafetyFlag, SafetyLevel, SessionContext};

pub struct EmergencyCheck {
    tier1: &'static [&'static str],
    tier2: &'static [&'static str],
}

impl EmergencyCheck {
    pub fn new() -> Self {
        Self {
            tier1: TIER1_EMERGENCY_TRIGGERS,
            tier2: TIER2_URGENCY_TRIGGERS,
        }
    }

    fn matched<'a>(&self, table: &'a [&'static str], normalized: &str) -> Vec<&'a str> {
        table
            .iter()
            .filter(|trigger| normalized.contains(*trigger))
            .copied()
            .collect()
    }
}

impl Default for EmergencyCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SafetyCheck for EmergencyCheck {
    fn name(&self) -> &'static str {
        "emergency"
    }

    fn evaluate(&self, input: &CheckInput, _context: &SessionContext) -> CheckOutcome {
        let tier1_matches = self.matched(self.tier1, &input.normalized);
        if !tier1_matches.is_empty() {
            let protocol = match_protocol(&tier1_matches);
            let flag = SafetyFlag::new(
                SafetyLevel::Urgent,
                FlagKind::RedFlag,
                "I sintomi descritti possono indicare un'emergenza. Contatta immediatamente \
                 un veterinario.",
            )
            .with_action("Trova un pronto soccorso", "/emergency/vet-search");
            return CheckOutcome {
                flags: vec![flag],
                protocol,
            };
        }

        let tier2_matches = self.matched(self.tier2, &input.normalized);
        if !tier2_matches.is_empty() {
            let flag = SafetyFlag::new(
                SafetyLevel::Warning,
                FlagKind::RedFlag,
                "Questi sintomi non vanno sottovalutati: se persistono, fai visitare il tuo \
                 animale da un veterinario entro 24 ore.",
            )
            .with_action("Trova un veterinario", "/emergency/vet-search");
            return CheckOutcome::flag(flag);
        }

        CheckOutcome::none()
    }
}
