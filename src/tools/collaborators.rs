// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! External collaborator traits behind the tool router
//!
//! The surrounding application provides the real implementations (data
//! store, scheduler, catalog). Implementations return `anyhow::Result` so
//! they can surface arbitrary failures; the router wraps every failure into
//! a normalized execution record and never propagates it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::safety::types::AnimalProfile;
use crate::scoring::ProductCompatibility;

use super::types::{CreateMissionParams, CreateReminderParams};

/// A gamification mission created from a template
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionRecord {
    pub mission_id: String,
    pub animal_id: String,
    pub title: String,
}

/// A scheduled care reminder
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRecord {
    pub reminder_id: String,
    pub title: String,
    pub due_at: DateTime<Utc>,
}

/// A saved advisory note
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub note_id: String,
    pub animal_id: String,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait MissionCatalog: Send + Sync {
    async fn create_mission(
        &self,
        animal_id: &str,
        params: &CreateMissionParams,
    ) -> anyhow::Result<MissionRecord>;
}

#[async_trait]
pub trait ReminderScheduler: Send + Sync {
    async fn schedule(
        &self,
        animal_id: &str,
        params: &CreateReminderParams,
    ) -> anyhow::Result<ReminderRecord>;
}

#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Candidate products for an animal, optionally narrowed by category
    /// and free-text query
    async fn candidate_products(
        &self,
        animal: &AnimalProfile,
        category: Option<&str>,
        query: Option<&str>,
    ) -> anyhow::Result<Vec<ProductCompatibility>>;

    /// Deep-link route for a product page, `None` when the product does
    /// not exist
    async fn product_route(&self, product_id: &str) -> anyhow::Result<Option<String>>;
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn save_note(&self, animal_id: &str, content: &str) -> anyhow::Result<NoteRecord>;
}
