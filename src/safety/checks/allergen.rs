// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Literal allergen mention check
//!
//! Matches the session animal's declared allergens against the input text.
//! This is a literal mention check, independent of the derivative-expansion
//! filters used for product compatibility.

use crate::safety::check::{CheckInput, CheckOutcome, SafetyCheck};
use crate::safety::types::{FlagKind, SafetyFlag, SafetyLevel, SessionContext};

pub struct AllergenCheck;

impl AllergenCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AllergenCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SafetyCheck for AllergenCheck {
    fn name(&self) -> &'static str {
        "allergen"
    }

    fn evaluate(&self, input: &CheckInput, context: &SessionContext) -> CheckOutcome {
        let animal = match &context.animal {
            Some(animal) if !animal.allergies.is_empty() => animal,
            _ => return CheckOutcome::none(),
        };

        let matched: Vec<&str> = animal
            .allergies
            .iter()
            .filter(|allergen| {
                !allergen.is_empty() && input.normalized.contains(&allergen.to_lowercase())
            })
            .map(String::as_str)
            .collect();

        if matched.is_empty() {
            return CheckOutcome::none();
        }

        let flag = SafetyFlag::new(
            SafetyLevel::Warning,
            FlagKind::AllergenWarning,
            format!(
                "Attenzione: {} risulta allergico a {}. Evita alimenti e prodotti che ne \
                 contengono anche in tracce.",
                animal.name,
                matched.join(", ")
            ),
        )
        .with_action(
            format!("Profilo salute di {}", animal.name),
            format!("/pets/{}/health", animal.id),
        );

        CheckOutcome::flag(flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::safety::types::{AnimalProfile, PersonaType};

    fn animal_with_allergies(allergies: &[&str]) -> AnimalProfile {
        AnimalProfile {
            id: "pet-1".to_string(),
            name: "Luna".to_string(),
            allergies: allergies.iter().map(|a| a.to_string()).collect(),
            age_months: Some(36),
            weight_kg: Some(12.0),
            activity_level: None,
            special_needs: Vec::new(),
        }
    }

    fn evaluate(text: &str, ctx: &SessionContext) -> CheckOutcome {
        AllergenCheck::new().evaluate(&CheckInput::new(text, PersonaType::Health), ctx)
    }

    #[test]
    fn test_declared_allergen_mention_flags() {
        let ctx =
            SessionContext::anonymous("s1").with_animal(animal_with_allergies(&["pollo"]));
        let outcome = evaluate("posso dargli del pollo bollito?", &ctx);

        assert_eq!(outcome.flags.len(), 1);
        let flag = &outcome.flags[0];
        assert_eq!(flag.level, SafetyLevel::Warning);
        assert_eq!(flag.kind, FlagKind::AllergenWarning);
        assert!(flag.message.contains("pollo"));
        assert!(flag.message.contains("Luna"));
        assert_eq!(
            flag.action.as_ref().unwrap().target,
            "/pets/pet-1/health"
        );
    }

    #[test]
    fn test_multiple_allergens_single_flag() {
        let ctx = SessionContext::anonymous("s1")
            .with_animal(animal_with_allergies(&["pollo", "manzo"]));
        let outcome = evaluate("meglio pollo o manzo per cena?", &ctx);

        assert_eq!(outcome.flags.len(), 1);
        assert!(outcome.flags[0].message.contains("pollo"));
        assert!(outcome.flags[0].message.contains("manzo"));
    }

    #[test]
    fn test_no_animal_no_flags() {
        let ctx = SessionContext::anonymous("s1");
        assert!(evaluate("un po' di pollo?", &ctx).is_empty());
    }

    #[test]
    fn test_empty_allergy_list_no_flags() {
        let ctx = SessionContext::anonymous("s1").with_animal(animal_with_allergies(&[]));
        assert!(evaluate("un po' di pollo?", &ctx).is_empty());
    }

    #[test]
    fn test_unmentioned_allergen_no_flags() {
        let ctx =
            SessionContext::anonymous("s1").with_animal(animal_with_allergies(&["pollo"]));
        assert!(evaluate("quanto deve dormire un cucciolo?", &ctx).is_empty());
    }
}
