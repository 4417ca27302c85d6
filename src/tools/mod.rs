// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Agent-initiated tool execution
//!
//! Routes the fixed set of advisory-persona side effects to external
//! collaborator services with a normalized success/error shape:
//! - Missions, reminders, and notes against the application data store
//! - Product suggestions composed from the allergen guard and the
//!   compatibility scorer
//! - External veterinarian search URL building
//!
//! Every failure surfaces as `{success: false, error}`; callers check
//! `success` rather than relying on errors propagating.

pub mod collaborators;
pub mod config;
pub mod rate_limiter;
pub mod router;
pub mod types;
pub mod vet_search;

// Re-export commonly used types
pub use collaborators::{
    MissionCatalog, MissionRecord, NoteRecord, NoteStore, ProductCatalog, ReminderRecord,
    ReminderScheduler,
};
pub use config::ToolConfig;
pub use rate_limiter::ToolRateLimiter;
pub use router::ToolRouter;
pub use types::{
    CreateMissionParams, CreateReminderParams, OpenPdpParams, OpenVetSearchParams, SaveNoteParams,
    SuggestProductsParams, ToolError, ToolExecution, ToolKind, ToolRequest,
};
pub use vet_search::build_vet_search_url;
