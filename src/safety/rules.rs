// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Static trigger tables for the check evaluators
//!
//! Loaded once at process start and injected into the evaluators; never
//! mutated at runtime. Phrases are matched case-insensitively against a
//! lowercased copy of the input.

/// Tier 1 emergency triggers: any match escalates to an emergency protocol
pub const TIER1_EMERGENCY_TRIGGERS: &[&str] = &[
    // Respiratory distress / choking
    "non respira",
    "fatica a respirare",
    "difficoltà a respirare",
    "soffoca",
    "soffocando",
    "corpo estraneo",
    "ha ingoiato",
    // Poisoning
    "avvelenato",
    "avvelenamento",
    "veleno",
    "intossicato",
    "topicida",
    "ha mangiato cioccolato",
    // Seizures / loss of consciousness
    "convulsioni",
    "crisi epilettica",
    "svenuto",
    "privo di sensi",
    "incosciente",
    // Severe bleeding / trauma
    "sanguina molto",
    "emorragia",
    "perde molto sangue",
    "investito",
    "trauma",
    // Collapse, shock, temperature extremes, pale gums
    "non riesce a muoversi",
    "paralizzato",
    "non si alza",
    "shock",
    "gengive bianche",
    "gengive pallide",
    "colpo di calore",
    "temperatura altissima",
    "ipotermia",
];

/// Tier 2 triggers: urgent but non-critical symptoms, no protocol attached
pub const TIER2_URGENCY_TRIGGERS: &[&str] = &[
    "vomito persistente",
    "continua a vomitare",
    "vomita da giorni",
    "diarrea con sangue",
    "diarrea da giorni",
    "non mangia da",
    "rifiuta il cibo da",
    "molto letargico",
    "letargico da",
    "tremori",
    "perde l'equilibrio",
    "barcolla",
];

/// Medication dosage keywords; any match blocks the response outright
pub const DOSAGE_KEYWORDS: &[&str] = &["dose", "dosaggio", "posologia", "quanto dare"];

/// Diagnosis-style phrasing, redirected to the health persona when another
/// persona is active
pub const DIAGNOSIS_PATTERNS: &[&str] = &[
    "cos'ha",
    "cosa ha il mio",
    "che malattia",
    "è malato",
    "e' malato",
    "diagnosi",
];

/// Abusive / cruelty terms; always blocking
pub const MODERATION_BLOCKLIST: &[&str] = &[
    "picchiare il",
    "prendere a calci",
    "maltrattare",
    "far soffrire",
    "far combattere",
    "combattimenti tra cani",
    "combattimenti clandestini",
    "uccidere il mio",
    "annegare",
    "abbandonare il cane",
    "abbandonare il gatto",
    "abbandonarlo in strada",
];

/// Dangerous-behavior descriptions, training persona only; redirect to an
/// in-person trainer
pub const AGGRESSION_BEHAVIOR_PATTERNS: &[&str] = &[
    "ha morso",
    "ha azzannato",
    "ha aggredito",
    "attacca altri cani",
    "attacca le persone",
    "aggressivo con tutti",
    "ringhia ai bambini",
];

/// Punitive-method requests, training persona only; always blocking
pub const PUNITIVE_METHOD_PATTERNS: &[&str] = &[
    "collare elettrico",
    "collare a strozzo",
    "collare con le punte",
    "punire",
    "punizione fisica",
    "dominanza",
    "sottomissione forzata",
    "metodi coercitivi",
];

/// Off-topic domains the personas do not cover
pub const OFF_TOPIC_PATTERNS: &[&str] = &[
    "come cucinare",
    "ricetta per la",
    "riparare la macchina",
    "riparare l'auto",
    "cambiare l'olio",
    "il mio computer",
    "installare windows",
    "scrivere codice",
    "programmare in",
];

/// Explicit or violent content requests
pub const EXPLICIT_CONTENT_PATTERNS: &[&str] = &[
    "pornograf",
    "sessualmente esplicito",
    "contenuto violento",
    "scene violente",
];

/// Prompt-injection phrasing
pub const PROMPT_INJECTION_PATTERNS: &[&str] = &[
    "ignora le istruzioni",
    "ignora le tue istruzioni",
    "dimentica le istruzioni",
    "comportati come",
    "fai finta di essere",
    "fingi di essere",
    "nuove istruzioni:",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_lists_are_disjoint() {
        for t1 in TIER1_EMERGENCY_TRIGGERS {
            assert!(
                !TIER2_URGENCY_TRIGGERS.contains(t1),
                "trigger {} present in both tiers",
                t1
            );
        }
    }

    #[test]
    fn test_trigger_tables_are_lowercase() {
        let tables: &[&[&str]] = &[
            TIER1_EMERGENCY_TRIGGERS,
            TIER2_URGENCY_TRIGGERS,
            DOSAGE_KEYWORDS,
            DIAGNOSIS_PATTERNS,
            MODERATION_BLOCKLIST,
            AGGRESSION_BEHAVIOR_PATTERNS,
            PUNITIVE_METHOD_PATTERNS,
            OFF_TOPIC_PATTERNS,
            EXPLICIT_CONTENT_PATTERNS,
            PROMPT_INJECTION_PATTERNS,
        ];
        for table in tables {
            for phrase in *table {
                assert_eq!(
                    *phrase,
                    phrase.to_lowercase(),
                    "phrase {} is not lowercase",
                    phrase
                );
            }
        }
    }

    #[test]
    fn test_no_empty_phrases() {
        for phrase in TIER1_EMERGENCY_TRIGGERS {
            assert!(!phrase.trim().is_empty());
        }
    }
}
