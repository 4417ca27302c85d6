// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod allergen;
pub mod safety;
pub mod scoring;
pub mod tools;

// Re-export main types from the safety gate
pub use safety::{
    AnimalProfile, CheckInput, CheckOutcome, EmergencyProtocol, FlagAction, FlagKind, PersonaType,
    ProtocolResponse, ResponseLevel, SafetyCheck, SafetyClassifier, SafetyConfig, SafetyEvent,
    SafetyEventLogger, SafetyFlag, SafetyLevel, SafetyVerdict, SessionContext,
};

// Re-export types from the allergen registry and scorer
pub use allergen::{AllergenGuard, AllergenGuardRegistry, CompatibilityReport, RegistryError};
pub use scoring::{compatibility_score, rank_products, ProductCompatibility, ScoredProduct};

// Re-export the tool routing surface
pub use tools::{
    MissionCatalog, NoteStore, ProductCatalog, ReminderScheduler, ToolConfig, ToolExecution,
    ToolKind, ToolRequest, ToolRouter,
};
