// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-animal allergen guard registry
//!
//! One guard per animal, created when the allergy profile is first
//! established and replaced wholesale on every update; filter sets are never
//! mutated in place, so concurrent reads of a replaced guard are safe.
//! Lookups for an unregistered subject fail open: no registered guard means
//! "no known allergies", not "definitely safe".

use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::synonyms::{ingredient_expansion, medication_expansion};

/// Expanded filter sets for one animal. Every filter set is a superset of
/// (or equal to) the declared allergy set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllergenGuard {
    pub subject_id: String,
    /// Declared allergies, lowercase normalized
    pub allergies: BTreeSet<String>,
    pub product_filters: BTreeSet<String>,
    pub food_ingredient_filters: BTreeSet<String>,
    pub medication_filters: BTreeSet<String>,
}

impl AllergenGuard {
    fn build(subject_id: &str, allergies: &[String]) -> Self {
        let allergies: BTreeSet<String> = allergies
            .iter()
            .map(|a| a.trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect();

        let mut product_filters = BTreeSet::new();
        let mut food_ingredient_filters = BTreeSet::new();
        let mut medication_filters = BTreeSet::new();

        for allergen in &allergies {
            let ingredient_terms = ingredient_expansion(allergen);
            product_filters.extend(ingredient_terms.iter().cloned());
            food_ingredient_filters.extend(ingredient_terms);
            medication_filters.extend(medication_expansion(allergen));
        }

        Self {
            subject_id: subject_id.to_string(),
            allergies,
            product_filters,
            food_ingredient_filters,
            medication_filters,
        }
    }
}

/// Outcome of a product compatibility check
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityReport {
    pub compatible: bool,
    /// Declared allergens whose derivative terms matched a candidate
    /// ingredient
    pub conflicting_allergens: Vec<String>,
}

impl CompatibilityReport {
    fn compatible() -> Self {
        Self {
            compatible: true,
            conflicting_allergens: Vec::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Subject id must not be empty")]
    EmptySubjectId,
}

/// Registry of allergen guards, keyed by subject id. Reads are lock-shared;
/// writes replace the whole guard under the write lock.
pub struct AllergenGuardRegistry {
    guards: RwLock<HashMap<String, AllergenGuard>>,
}

impl AllergenGuardRegistry {
    pub fn new() -> Self {
        Self {
            guards: RwLock::new(HashMap::new()),
        }
    }

    /// Register (or replace wholesale) the guard for a subject
    pub fn register(&self, subject_id: &str, allergies: &[String]) -> Result<(), RegistryError> {
        if subject_id.trim().is_empty() {
            return Err(RegistryError::EmptySubjectId);
        }

        let guard = AllergenGuard::build(subject_id, allergies);
        debug!(
            subject = subject_id,
            allergies = guard.allergies.len(),
            filters = guard.product_filters.len(),
            "allergen guard registered"
        );

        if let Ok(mut guards) = self.guards.write() {
            guards.insert(subject_id.to_string(), guard);
        }
        Ok(())
    }

    /// Remove the guard for a subject, e.g. when the animal profile is
    /// deleted
    pub fn unregister(&self, subject_id: &str) {
        if let Ok(mut guards) = self.guards.write() {
            guards.remove(subject_id);
        }
    }

    /// Snapshot of the guard for a subject, if registered
    pub fn guard(&self, subject_id: &str) -> Option<AllergenGuard> {
        self.guards.read().ok()?.get(subject_id).cloned()
    }

    /// Number of registered guards
    pub fn registered_count(&self) -> usize {
        self.guards.read().map(|g| g.len()).unwrap_or(0)
    }

    /// Check candidate ingredients against the subject's expanded filters.
    ///
    /// A conflict is reported when any filter term is a substring of any
    /// normalized candidate ingredient; the containment is intentionally
    /// asymmetric and over-blocks rather than under-blocks. Unknown
    /// subjects fail open.
    pub fn check_product_compatibility(
        &self,
        subject_id: &str,
        ingredients: &[String],
    ) -> CompatibilityReport {
        let guard = match self.guard(subject_id) {
            Some(guard) => guard,
            None => return CompatibilityReport::compatible(),
        };

        let normalized: Vec<String> = ingredients
            .iter()
            .map(|i| i.trim().to_lowercase())
            .filter(|i| !i.is_empty())
            .collect();

        let mut conflicts = BTreeSet::new();
        for allergen in &guard.allergies {
            let terms = ingredient_expansion(allergen);
            let hit = normalized
                .iter()
                .any(|ingredient| terms.iter().any(|term| ingredient.contains(term.as_str())));
            if hit {
                conflicts.insert(allergen.clone());
            }
        }

        CompatibilityReport {
            compatible: conflicts.is_empty(),
            conflicting_allergens: conflicts.into_iter().collect(),
        }
    }
}

impl Default for AllergenGuardRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(subject: &str, allergies: &[&str]) -> AllergenGuardRegistry {
        let registry = AllergenGuardRegistry::new();
        let allergies: Vec<String> = allergies.iter().map(|a| a.to_string()).collect();
        registry.register(subject, &allergies).unwrap();
        registry
    }

    fn ingredients(items: &[&str]) -> Vec<String> {
        items.iter().map(|i| i.to_string()).collect()
    }

    #[test]
    fn test_derivative_ingredient_detected() {
        let registry = registry_with("pet-1", &["pollo"]);
        let report =
            registry.check_product_compatibility("pet-1", &ingredients(&["Chicken Meal"]));
        assert!(!report.compatible);
        assert_eq!(report.conflicting_allergens, vec!["pollo".to_string()]);
    }

    #[test]
    fn test_check_is_case_insensitive() {
        let registry = registry_with("pet-1", &["MANZO"]);
        let report = registry
            .check_product_compatibility("pet-1", &ingredients(&["Farina di MANZO disidratata"]));
        assert!(!report.compatible);
    }

    #[test]
    fn test_asymmetric_containment() {
        // Filter term contained in a longer ingredient name: conflict
        let registry = registry_with("pet-1", &["grano"]);
        let report = registry
            .check_product_compatibility("pet-1", &ingredients(&["farina di grano tenero"]));
        assert!(!report.compatible);
    }

    #[test]
    fn test_clean_ingredients_are_compatible() {
        let registry = registry_with("pet-1", &["pollo"]);
        let report = registry
            .check_product_compatibility("pet-1", &ingredients(&["Salmone", "Riso", "Piselli"]));
        assert!(report.compatible);
        assert!(report.conflicting_allergens.is_empty());
    }

    #[test]
    fn test_unknown_subject_fails_open() {
        let registry = AllergenGuardRegistry::new();
        let report =
            registry.check_product_compatibility("ghost", &ingredients(&["Chicken Meal"]));
        assert!(report.compatible);
        assert!(report.conflicting_allergens.is_empty());
    }

    #[test]
    fn test_registration_is_idempotent() {
        let registry = AllergenGuardRegistry::new();
        let allergies = vec!["pollo".to_string(), "latticini".to_string()];

        registry.register("pet-1", &allergies).unwrap();
        let first = registry.guard("pet-1").unwrap();
        registry.register("pet-1", &allergies).unwrap();
        let second = registry.guard("pet-1").unwrap();

        assert_eq!(first.product_filters, second.product_filters);
        assert_eq!(first.food_ingredient_filters, second.food_ingredient_filters);
        assert_eq!(first.medication_filters, second.medication_filters);
    }

    #[test]
    fn test_update_replaces_guard_wholesale() {
        let registry = registry_with("pet-1", &["pollo"]);
        registry
            .register("pet-1", &["manzo".to_string()])
            .unwrap();

        let guard = registry.guard("pet-1").unwrap();
        assert!(!guard.allergies.contains("pollo"));
        assert!(guard.product_filters.contains("beef"));
        assert!(!guard.product_filters.contains("chicken"));
    }

    #[test]
    fn test_filters_are_supersets_of_allergies() {
        let registry = registry_with("pet-1", &["pollo", "quinoa", "penicillina"]);
        let guard = registry.guard("pet-1").unwrap();

        for allergen in &guard.allergies {
            assert!(guard.product_filters.contains(allergen));
            assert!(guard.food_ingredient_filters.contains(allergen));
            assert!(guard.medication_filters.contains(allergen));
        }
    }

    #[test]
    fn test_medication_filters_cover_drug_classes() {
        let registry = registry_with("pet-1", &["penicillina"]);
        let guard = registry.guard("pet-1").unwrap();
        assert!(guard.medication_filters.contains("amoxicillina"));
        // Ingredient derivatives stay out of the medication domain
        assert!(!guard.medication_filters.contains("chicken"));
    }

    #[test]
    fn test_allergies_normalized_on_registration() {
        let registry = registry_with("pet-1", &["  Pollo ", ""]);
        let guard = registry.guard("pet-1").unwrap();
        assert_eq!(guard.allergies.len(), 1);
        assert!(guard.allergies.contains("pollo"));
    }

    #[test]
    fn test_empty_subject_id_rejected() {
        let registry = AllergenGuardRegistry::new();
        assert!(registry.register("  ", &[]).is_err());
    }

    #[test]
    fn test_unregister() {
        let registry = registry_with("pet-1", &["pollo"]);
        assert_eq!(registry.registered_count(), 1);
        registry.unregister("pet-1");
        assert_eq!(registry.registered_count(), 0);
        assert!(registry.guard("pet-1").is_none());
    }
}
