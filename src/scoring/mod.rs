// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Deterministic product relevance scoring against animal profiles

pub mod compatibility;

pub use compatibility::{compatibility_score, rank_products, ProductCompatibility, ScoredProduct};
