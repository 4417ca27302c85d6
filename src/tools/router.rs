// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tool router: dispatch of agent-initiated side effects
//!
//! Validates the animal-context requirement per kind, applies the
//! per-session rate limit, delegates to the external collaborators, and
//! normalizes every outcome into a `ToolExecution`. Collaborator failures
//! are logged and reported with a generic retryable message; they never
//! crash the request and their internal error text is never exposed.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};

use crate::allergen::AllergenGuardRegistry;
use crate::safety::types::{AnimalProfile, SessionContext};
use crate::scoring::rank_products;

use super::collaborators::{MissionCatalog, NoteStore, ProductCatalog, ReminderScheduler};
use super::config::ToolConfig;
use super::rate_limiter::ToolRateLimiter;
use super::types::{
    CreateMissionParams, CreateReminderParams, OpenPdpParams, OpenVetSearchParams, SaveNoteParams,
    SuggestProductsParams, ToolError, ToolExecution, ToolKind, ToolRequest,
};
use super::vet_search::build_vet_search_url;

pub struct ToolRouter {
    missions: Arc<dyn MissionCatalog>,
    reminders: Arc<dyn ReminderScheduler>,
    catalog: Arc<dyn ProductCatalog>,
    notes: Arc<dyn NoteStore>,
    allergen_registry: Arc<AllergenGuardRegistry>,
    rate_limiter: ToolRateLimiter,
    config: ToolConfig,
}

impl ToolRouter {
    pub fn new(
        missions: Arc<dyn MissionCatalog>,
        reminders: Arc<dyn ReminderScheduler>,
        catalog: Arc<dyn ProductCatalog>,
        notes: Arc<dyn NoteStore>,
        allergen_registry: Arc<AllergenGuardRegistry>,
        config: ToolConfig,
    ) -> Self {
        let rate_limiter = ToolRateLimiter::new(config.rate_limit_per_minute);
        Self {
            missions,
            reminders,
            catalog,
            notes,
            allergen_registry,
            rate_limiter,
            config,
        }
    }

    /// Execute one tool action. Never fails: every outcome, including
    /// validation errors and collaborator failures, is a `ToolExecution`.
    pub async fn execute(
        &self,
        kind: ToolKind,
        params: serde_json::Value,
        context: &SessionContext,
    ) -> ToolExecution {
        if !self.rate_limiter.check(&context.session_id) {
            warn!(session = %context.session_id, kind = kind.as_str(), "tool rate limited");
            return ToolExecution::failure(ToolError::RateLimited.to_string());
        }
        self.rate_limiter.record(&context.session_id);

        let animal = context.animal.as_ref();
        if kind.requires_animal() && animal.is_none() {
            return ToolExecution::failure(
                ToolError::AnimalRequired {
                    kind: kind.as_str(),
                }
                .to_string(),
            );
        }

        let outcome = match kind {
            ToolKind::CreateMission => self.create_mission(animal.unwrap(), params).await,
            ToolKind::CreateReminder => self.create_reminder(animal.unwrap(), params).await,
            ToolKind::SuggestProducts => self.suggest_products(animal.unwrap(), params).await,
            ToolKind::OpenVetSearch => self.open_vet_search(params),
            ToolKind::SaveNote => self.save_note(animal.unwrap(), params).await,
            ToolKind::OpenPdp => self.open_pdp(params).await,
        };

        match outcome {
            Ok(result) => {
                debug!(kind = kind.as_str(), "tool executed");
                ToolExecution::ok(result)
            }
            Err(error) => ToolExecution::failure(error.to_string()),
        }
    }

    /// Execute independent requests concurrently. One failing request does
    /// not affect its siblings.
    pub async fn execute_many(
        &self,
        requests: Vec<ToolRequest>,
        context: &SessionContext,
    ) -> Vec<ToolExecution> {
        let futures: Vec<_> = requests
            .into_iter()
            .map(|request| self.execute(request.kind, request.params, context))
            .collect();
        futures::future::join_all(futures).await
    }

    fn parse<P: DeserializeOwned>(
        kind: ToolKind,
        params: serde_json::Value,
    ) -> Result<P, ToolError> {
        serde_json::from_value(params).map_err(|e| {
            debug!(kind = kind.as_str(), error = %e, "invalid tool params");
            ToolError::InvalidParams {
                kind: kind.as_str(),
            }
        })
    }

    async fn create_mission(
        &self,
        animal: &AnimalProfile,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let params: CreateMissionParams = Self::parse(ToolKind::CreateMission, params)?;
        let mission = self
            .missions
            .create_mission(&animal.id, &params)
            .await
            .map_err(|e| {
                warn!(error = %e, "mission collaborator failed");
                ToolError::CollaboratorFailure
            })?;
        Ok(json!({ "mission": mission }))
    }

    async fn create_reminder(
        &self,
        animal: &AnimalProfile,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let params: CreateReminderParams = Self::parse(ToolKind::CreateReminder, params)?;
        let reminder = self
            .reminders
            .schedule(&animal.id, &params)
            .await
            .map_err(|e| {
                warn!(error = %e, "reminder collaborator failed");
                ToolError::CollaboratorFailure
            })?;
        Ok(json!({ "reminder": reminder }))
    }

    async fn suggest_products(
        &self,
        animal: &AnimalProfile,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let params: SuggestProductsParams = Self::parse(ToolKind::SuggestProducts, params)?;
        let limit = params
            .limit
            .unwrap_or(self.config.default_suggestions)
            .min(self.config.max_suggestions);

        let candidates = self
            .catalog
            .candidate_products(animal, params.category.as_deref(), params.query.as_deref())
            .await
            .map_err(|e| {
                warn!(error = %e, "catalog collaborator failed");
                ToolError::CollaboratorFailure
            })?;

        // Hard allergen filter first; the scorer's allergy component is
        // only a secondary layer
        let safe: Vec<_> = candidates
            .into_iter()
            .filter(|product| {
                self.allergen_registry
                    .check_product_compatibility(&animal.id, &product.ingredients)
                    .compatible
            })
            .collect();

        let mut ranked = rank_products(safe, animal);
        ranked.truncate(limit);

        debug!(
            animal = %animal.id,
            returned = ranked.len(),
            "product suggestions ranked"
        );
        Ok(json!({ "products": ranked }))
    }

    fn open_vet_search(&self, params: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let params: OpenVetSearchParams = Self::parse(ToolKind::OpenVetSearch, params)?;
        let url = build_vet_search_url(params.query.as_deref(), params.location.as_deref());
        Ok(json!({ "url": url.as_str() }))
    }

    async fn save_note(
        &self,
        animal: &AnimalProfile,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let params: SaveNoteParams = Self::parse(ToolKind::SaveNote, params)?;
        let note = self
            .notes
            .save_note(&animal.id, &params.content)
            .await
            .map_err(|e| {
                warn!(error = %e, "note collaborator failed");
                ToolError::CollaboratorFailure
            })?;
        Ok(json!({ "note": note }))
    }

    async fn open_pdp(&self, params: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let params: OpenPdpParams = Self::parse(ToolKind::OpenPdp, params)?;
        let route = self
            .catalog
            .product_route(&params.product_id)
            .await
            .map_err(|e| {
                warn!(error = %e, "catalog collaborator failed");
                ToolError::CollaboratorFailure
            })?;
        match route {
            Some(route) => Ok(json!({ "route": route })),
            None => Err(ToolError::ProductNotFound),
        }
    }
}
