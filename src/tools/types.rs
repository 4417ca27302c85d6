// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for agent-initiated tool execution

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The six supported agent-initiated side effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    CreateMission,
    CreateReminder,
    SuggestProducts,
    OpenVetSearch,
    SaveNote,
    OpenPdp,
}

impl ToolKind {
    /// Whether execution requires an animal profile in the session context
    pub fn requires_animal(&self) -> bool {
        !matches!(self, Self::OpenVetSearch)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateMission => "create_mission",
            Self::CreateReminder => "create_reminder",
            Self::SuggestProducts => "suggest_products",
            Self::OpenVetSearch => "open_vet_search",
            Self::SaveNote => "save_note",
            Self::OpenPdp => "open_pdp",
        }
    }
}

/// Normalized outcome of one tool execution. Callers check `success`;
/// failures never propagate as errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolExecution {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolExecution {
    pub fn ok(result: serde_json::Value) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

/// One entry of a batch execution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolRequest {
    pub kind: ToolKind,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMissionParams {
    pub template_id: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReminderParams {
    pub title: String,
    pub due_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SuggestProductsParams {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OpenVetSearchParams {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveNoteParams {
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPdpParams {
    pub product_id: String,
}

/// Internal failure reasons, rendered into user-facing `ToolExecution`
/// errors by the router
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Per usare {kind} devi prima selezionare un profilo animale")]
    AnimalRequired { kind: &'static str },

    #[error("Parametri non validi per {kind}")]
    InvalidParams { kind: &'static str },

    #[error("Hai fatto troppe richieste ravvicinate. Riprova tra qualche istante")]
    RateLimited,

    #[error("Operazione non riuscita. Riprova più tardi")]
    CollaboratorFailure,

    #[error("Prodotto non trovato")]
    ProductNotFound,
}
