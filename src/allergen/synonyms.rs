// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Static allergen synonym and derivative tables
//!
//! Declared allergens are expanded into the derivative terms they appear
//! under on ingredient labels. Unknown allergens pass through unexpanded:
//! the literal term is still a valid filter.

use std::collections::BTreeSet;

/// Ingredient derivatives keyed by declared allergen. Shared by the general
/// product and food ingredient filter domains.
const INGREDIENT_SYNONYMS: &[(&str, &[&str])] = &[
    (
        "pollo",
        &[
            "chicken",
            "chicken meal",
            "pollame",
            "farina di pollo",
            "grasso di pollo",
        ],
    ),
    (
        "manzo",
        &["beef", "bovino", "beef meal", "farina di manzo"],
    ),
    (
        "latticini",
        &[
            "latte",
            "milk",
            "dairy",
            "formaggio",
            "cheese",
            "yogurt",
            "burro",
            "butter",
            "siero di latte",
            "whey",
        ],
    ),
    (
        "latte",
        &["milk", "dairy", "lattosio", "siero di latte", "whey"],
    ),
    ("uova", &["egg", "uovo", "albume", "tuorlo"]),
    (
        "pesce",
        &[
            "fish",
            "fish meal",
            "farina di pesce",
            "salmone",
            "salmon",
            "tonno",
            "tuna",
        ],
    ),
    (
        "grano",
        &["wheat", "frumento", "glutine", "gluten", "farina di grano"],
    ),
    ("mais", &["corn", "granoturco", "corn meal", "farina di mais"]),
    ("soia", &["soy", "soy meal", "lecitina di soia"]),
    ("agnello", &["lamb", "lamb meal", "farina di agnello"]),
    ("maiale", &["pork", "suino", "prosciutto", "lardo"]),
    ("riso", &["rice", "farina di riso"]),
];

/// Medication-class derivatives. Only a small enumerated set of drug
/// classes has synonyms; everything else passes through literally.
const MEDICATION_SYNONYMS: &[(&str, &[&str])] = &[
    (
        "penicillina",
        &["penicillin", "amoxicillina", "amoxicillin", "ampicillina"],
    ),
    (
        "sulfamidici",
        &[
            "sulfonamide",
            "sulfadiazina",
            "sulfametossazolo",
            "trimetoprim-sulfa",
        ],
    ),
    (
        "fans",
        &["ibuprofene", "ketoprofene", "carprofene", "meloxicam"],
    ),
];

fn expand(allergen: &str, table: &[(&str, &[&str])]) -> BTreeSet<String> {
    let normalized = allergen.trim().to_lowercase();
    let mut terms = BTreeSet::new();
    if normalized.is_empty() {
        return terms;
    }
    terms.insert(normalized.clone());
    if let Some((_, synonyms)) = table.iter().find(|(key, _)| *key == normalized) {
        for synonym in *synonyms {
            terms.insert(synonym.to_string());
        }
    }
    terms
}

/// Expand a declared allergen into its ingredient derivative terms,
/// including the literal term itself
pub fn ingredient_expansion(allergen: &str) -> BTreeSet<String> {
    expand(allergen, INGREDIENT_SYNONYMS)
}

/// Expand a declared allergen into its medication-class terms, including
/// the literal term itself
pub fn medication_expansion(allergen: &str) -> BTreeSet<String> {
    expand(allergen, MEDICATION_SYNONYMS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_allergen_expands() {
        let terms = ingredient_expansion("pollo");
        assert!(terms.contains("pollo"));
        assert!(terms.contains("chicken"));
        assert!(terms.contains("chicken meal"));
    }

    #[test]
    fn test_expansion_is_case_insensitive() {
        assert_eq!(ingredient_expansion("POLLO"), ingredient_expansion("pollo"));
    }

    #[test]
    fn test_unknown_allergen_passes_through() {
        let terms = ingredient_expansion("quinoa");
        assert_eq!(terms.len(), 1);
        assert!(terms.contains("quinoa"));
    }

    #[test]
    fn test_expansion_includes_literal_term() {
        for (key, _) in INGREDIENT_SYNONYMS {
            assert!(
                ingredient_expansion(key).contains(*key),
                "expansion of {} lost the literal term",
                key
            );
        }
    }

    #[test]
    fn test_medication_classes_expand() {
        let terms = medication_expansion("penicillina");
        assert!(terms.contains("amoxicillina"));
        assert!(terms.contains("penicillin"));

        // Food allergens have no medication derivatives
        let terms = medication_expansion("pollo");
        assert_eq!(terms.len(), 1);
    }

    #[test]
    fn test_empty_allergen_expands_to_nothing() {
        assert!(ingredient_expansion("  ").is_empty());
    }

    #[test]
    fn test_synonym_tables_are_lowercase() {
        for (key, synonyms) in INGREDIENT_SYNONYMS.iter().chain(MEDICATION_SYNONYMS) {
            assert_eq!(*key, key.to_lowercase());
            for synonym in *synonyms {
                assert_eq!(*synonym, synonym.to_lowercase());
            }
        }
    }
}
