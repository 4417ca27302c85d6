// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Medication dosage and diagnosis-phrasing check
//!
//! Dosage requests are blocked for every persona. Diagnosis-style phrasing
//! is redirected to the health persona when another persona is active; the
//! health persona may receive diagnostic questions without the redirect.

use regex::Regex;

use crate::safety::check::{CheckInput, CheckOutcome, SafetyCheck};
use crate::safety::rules::{DIAGNOSIS_PATTERNS, DOSAGE_KEYWORDS};
use crate::safety::types::{FlagKind, PersonaType, SafetyFlag, SafetyLevel, SessionContext};

pub struct MedicalAdviceCheck {
    dosage_units: Regex,
    dosage_phrase: Regex,
}

impl MedicalAdviceCheck {
    pub fn new() -> Self {
        Self {
            // Numeric quantity followed by a pharmaceutical unit
            dosage_units: Regex::new(r"\b\d+([.,]\d+)?\s*(mg|ml|grammi|gocce|compress\w*)\b")
                .unwrap(),
            // "quanto <farmaco> ... dare/somministrare" and close variants
            dosage_phrase: Regex::new(r"quant[oaie]\b.*\b(dare|dargli|darle|somministrar\w*)")
                .unwrap(),
        }
    }

    fn is_dosage_request(&self, normalized: &str) -> bool {
        DOSAGE_KEYWORDS.iter().any(|kw| normalized.contains(kw))
            || self.dosage_units.is_match(normalized)
            || self.dosage_phrase.is_match(normalized)
    }
}

impl Default for MedicalAdviceCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SafetyCheck for MedicalAdviceCheck {
    fn name(&self) -> &'static str {
        "medical_advice"
    }

    fn evaluate(&self, input: &CheckInput, _context: &SessionContext) -> CheckOutcome {
        let mut flags = Vec::new();

        // Absolute rule: no persona is permitted to answer dosage questions
        if self.is_dosage_request(&input.normalized) {
            flags.push(
                SafetyFlag::new(
                    SafetyLevel::Blocked,
                    FlagKind::MedicationBlocked,
                    "Non posso indicare dosaggi o modalità di somministrazione di farmaci. \
                     Il dosaggio corretto dipende da peso, età e condizioni cliniche e deve \
                     essere stabilito dal tuo veterinario.",
                )
                .with_action("Trova un veterinario", "/emergency/vet-search"),
            );
        }

        if input.persona != PersonaType::Health {
            let diagnosis_hit = DIAGNOSIS_PATTERNS
                .iter()
                .any(|pattern| input.normalized.contains(pattern));
            if diagnosis_hit {
                flags.push(
                    SafetyFlag::new(
                        SafetyLevel::Warning,
                        FlagKind::RedFlag,
                        "Per domande su sintomi e possibili malattie, apri una conversazione \
                         con l'assistente salute.",
                    )
                    .with_action("Vai all'assistente salute", "/chat/health"),
                );
            }
        }

        CheckOutcome {
            flags,
            protocol: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate(text: &str, persona: PersonaType) -> CheckOutcome {
        MedicalAdviceCheck::new().evaluate(
            &CheckInput::new(text, persona),
            &SessionContext::anonymous("s1"),
        )
    }

    #[test]
    fn test_dosage_keyword_blocks() {
        let outcome = evaluate("che dose di amoxicillina posso dare", PersonaType::Health);
        assert_eq!(outcome.flags.len(), 1);
        assert_eq!(outcome.flags[0].level, SafetyLevel::Blocked);
        assert_eq!(outcome.flags[0].kind, FlagKind::MedicationBlocked);
    }

    #[test]
    fn test_dosage_blocked_for_every_persona() {
        for persona in [
            PersonaType::Health,
            PersonaType::Training,
            PersonaType::Grooming,
        ] {
            let outcome = evaluate("quanto paracetamolo devo dare al cane?", persona);
            assert!(
                outcome
                    .flags
                    .iter()
                    .any(|f| f.kind == FlagKind::MedicationBlocked && f.level == SafetyLevel::Blocked),
                "dosage not blocked for {:?}",
                persona
            );
        }
    }

    #[test]
    fn test_numeric_unit_blocks() {
        let outcome = evaluate("posso dargli 50 mg di antibiotico?", PersonaType::Health);
        assert_eq!(outcome.flags[0].kind, FlagKind::MedicationBlocked);

        let outcome = evaluate("bastano 2 compresse al giorno?", PersonaType::Grooming);
        assert_eq!(outcome.flags[0].kind, FlagKind::MedicationBlocked);
    }

    #[test]
    fn test_diagnosis_redirect_outside_health_persona() {
        let outcome = evaluate("secondo te cos'ha il mio cane?", PersonaType::Training);
        assert_eq!(outcome.flags.len(), 1);
        assert_eq!(outcome.flags[0].level, SafetyLevel::Warning);
        assert_eq!(
            outcome.flags[0].action.as_ref().unwrap().target,
            "/chat/health"
        );
    }

    #[test]
    fn test_diagnosis_allowed_for_health_persona() {
        let outcome = evaluate("secondo te cos'ha il mio cane?", PersonaType::Health);
        assert!(outcome.is_empty());
    }

    #[test]
    fn test_dosage_still_blocked_for_health_with_diagnosis_phrasing() {
        let outcome = evaluate(
            "cos'ha il mio cane? che dosaggio di antibiotico gli do?",
            PersonaType::Health,
        );
        assert_eq!(outcome.flags.len(), 1);
        assert_eq!(outcome.flags[0].kind, FlagKind::MedicationBlocked);
    }

    #[test]
    fn test_harmless_question_passes() {
        let outcome = evaluate("ogni quanto devo spazzolare il pelo?", PersonaType::Grooming);
        assert!(outcome.is_empty());
    }
}
