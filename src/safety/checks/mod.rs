// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! The six check evaluators composed by the classifier

pub mod aggression;
pub mod allergen;
pub mod emergency;
pub mod inappropriate;
pub mod medical;
pub mod moderation;

pub use aggression::AggressionCheck;
pub use allergen::AllergenCheck;
pub use emergency::EmergencyCheck;
pub use inappropriate::InappropriateRequestCheck;
pub use medical::MedicalAdviceCheck;
pub use moderation::ContentModerationCheck;
