// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for the conversational safety gate

use serde::{Deserialize, Serialize};

use super::protocol::EmergencyProtocol;

/// Severity of a safety finding. The ordering is total: aggregation over a
/// flag set takes the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyLevel {
    Ok,
    Warning,
    Urgent,
    Blocked,
}

impl Default for SafetyLevel {
    fn default() -> Self {
        Self::Ok
    }
}

/// Category of a safety finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagKind {
    RedFlag,
    AllergenWarning,
    MedicationBlocked,
    ContentViolation,
}

/// Suggested action attached to a flag. `target` is either an internal
/// deep-link path or an external URL; the consuming UI decides how to open it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagAction {
    pub label: String,
    pub target: String,
}

/// A single safety finding produced by exactly one check evaluator.
/// Immutable once created; only the aggregate verdict is computed from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyFlag {
    pub level: SafetyLevel,
    pub kind: FlagKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<FlagAction>,
}

impl SafetyFlag {
    pub fn new(level: SafetyLevel, kind: FlagKind, message: impl Into<String>) -> Self {
        Self {
            level,
            kind,
            message: message.into(),
            action: None,
        }
    }

    pub fn with_action(mut self, label: impl Into<String>, target: impl Into<String>) -> Self {
        self.action = Some(FlagAction {
            label: label.into(),
            target: target.into(),
        });
        self
    }
}

/// The three fixed advisory personas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaType {
    Health,
    Training,
    Grooming,
}

impl PersonaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Training => "training",
            Self::Grooming => "grooming",
        }
    }
}

/// Activity level declared on an animal profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Low,
    Medium,
    High,
}

/// Owner experience level, collected during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Expert,
}

/// Animal profile attached to a session. Allergies are lowercase-normalized
/// at registration time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_months: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default)]
    pub special_needs: Vec<String>,
}

/// Read-only session context supplied by the chat layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub session_id: String,
    #[serde(default)]
    pub accepted_disclaimer: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animal: Option<AnimalProfile>,
}

impl SessionContext {
    /// Context with no animal profile attached
    pub fn anonymous(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            accepted_disclaimer: false,
            experience_level: None,
            animal: None,
        }
    }

    pub fn with_animal(mut self, animal: AnimalProfile) -> Self {
        self.animal = Some(animal);
        self
    }
}

/// Aggregated classification result for one input cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyVerdict {
    pub level: SafetyLevel,
    pub flags: Vec<SafetyFlag>,
    pub allow_response: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_protocol: Option<EmergencyProtocol>,
}

impl SafetyVerdict {
    /// Verdict for an input that matched no rule
    pub fn ok() -> Self {
        Self {
            level: SafetyLevel::Ok,
            flags: Vec::new(),
            allow_response: true,
            emergency_protocol: None,
        }
    }
}
