// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Product/animal compatibility scoring
//!
//! Pure deterministic weighted sum over five components, each independently
//! capped; the result is clamped to [0, 1]. Candidates that fail the
//! allergen guard containment check should be excluded before scoring: the
//! allergy component here is a secondary, coarser safety layer over the raw
//! lists, not the primary filter.

use serde::{Deserialize, Serialize};

use crate::safety::types::{ActivityLevel, AnimalProfile};

const AGE_WEIGHT: f64 = 0.30;
const WEIGHT_WEIGHT: f64 = 0.25;
const ALLERGY_WEIGHT: f64 = 0.25;
const ACTIVITY_WEIGHT: f64 = 0.10;
const SPECIAL_NEEDS_WEIGHT: f64 = 0.10;

/// Candidate product facts consumed by the scorer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCompatibility {
    pub product_id: String,
    pub name: String,
    /// Declared allergens, matched against the animal's raw allergy list
    #[serde(default)]
    pub allergens: Vec<String>,
    /// Full ingredient list, used by the allergen guard containment check
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_age_months: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age_months: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_weight_kg: Option<f64>,
    /// Supported activity levels; empty means unrestricted
    #[serde(default)]
    pub activity_levels: Vec<ActivityLevel>,
    /// Special-needs condition tags the product supports
    #[serde(default)]
    pub supported_conditions: Vec<String>,
}

/// A candidate annotated with its relevance score
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredProduct {
    pub product: ProductCompatibility,
    pub score: f64,
}

/// Score a candidate product against an animal profile. Always in [0, 1].
pub fn compatibility_score(product: &ProductCompatibility, animal: &AnimalProfile) -> f64 {
    let age = range_fit(
        animal.age_months.map(f64::from),
        product.min_age_months.map(f64::from),
        product.max_age_months.map(f64::from),
        AGE_WEIGHT,
    );
    let weight = range_fit(
        animal.weight_kg,
        product.min_weight_kg,
        product.max_weight_kg,
        WEIGHT_WEIGHT,
    );
    let allergy = if has_allergy_conflict(product, animal) {
        0.0
    } else {
        ALLERGY_WEIGHT
    };
    let activity = activity_fit(product, animal);
    let special = special_needs_fit(product, animal);

    (age + weight + allergy + activity + special).clamp(0.0, 1.0)
}

/// Rank candidates descending by score. Ties keep the input order.
pub fn rank_products(
    products: Vec<ProductCompatibility>,
    animal: &AnimalProfile,
) -> Vec<ScoredProduct> {
    let mut scored: Vec<ScoredProduct> = products
        .into_iter()
        .map(|product| {
            let score = compatibility_score(&product, animal);
            ScoredProduct { product, score }
        })
        .collect();
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored
}

/// Full weight when the value sits inside the declared range, half weight
/// when the fit cannot be established (no declared range, or no declared
/// value), zero when the value falls outside a declared range.
fn range_fit(value: Option<f64>, min: Option<f64>, max: Option<f64>, full: f64) -> f64 {
    if min.is_none() && max.is_none() {
        return full / 2.0;
    }
    match value {
        None => full / 2.0,
        Some(v) => {
            let above_min = min.map_or(true, |m| v >= m);
            let below_max = max.map_or(true, |m| v <= m);
            if above_min && below_max {
                full
            } else {
                0.0
            }
        }
    }
}

/// Case-insensitive bidirectional substring containment over the raw lists
fn has_allergy_conflict(product: &ProductCompatibility, animal: &AnimalProfile) -> bool {
    product.allergens.iter().any(|product_allergen| {
        let pa = product_allergen.trim().to_lowercase();
        if pa.is_empty() {
            return false;
        }
        animal.allergies.iter().any(|animal_allergen| {
            let aa = animal_allergen.trim().to_lowercase();
            !aa.is_empty() && (pa.contains(&aa) || aa.contains(&pa))
        })
    })
}

fn activity_fit(product: &ProductCompatibility, animal: &AnimalProfile) -> f64 {
    if product.activity_levels.is_empty() {
        return ACTIVITY_WEIGHT;
    }
    match animal.activity_level {
        Some(level) if product.activity_levels.contains(&level) => ACTIVITY_WEIGHT,
        _ => 0.0,
    }
}

/// Fraction of the animal's special needs covered by the product. An animal
/// with no special needs gets full credit against a product that declares
/// no conditions, half credit otherwise.
fn special_needs_fit(product: &ProductCompatibility, animal: &AnimalProfile) -> f64 {
    if animal.special_needs.is_empty() {
        return if product.supported_conditions.is_empty() {
            SPECIAL_NEEDS_WEIGHT
        } else {
            SPECIAL_NEEDS_WEIGHT / 2.0
        };
    }

    let supported: Vec<String> = product
        .supported_conditions
        .iter()
        .map(|c| c.trim().to_lowercase())
        .collect();
    let covered = animal
        .special_needs
        .iter()
        .filter(|need| supported.contains(&need.trim().to_lowercase()))
        .count();

    SPECIAL_NEEDS_WEIGHT * covered as f64 / animal.special_needs.len() as f64
}
