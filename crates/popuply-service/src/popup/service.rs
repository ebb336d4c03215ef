//! Popup management — CRUD, duplication, and publish stamping.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use popuply_core::error::AppError;
use popuply_database::repositories::popup::PopupRepository;
use popuply_database::repositories::website::WebsiteRepository;
use popuply_entity::popup::model::{CreatePopup, UpdatePopup};
use popuply_entity::popup::{Popup, PopupKind, PopupStatus, PopupTrigger};

use crate::context::RequestContext;

/// Name used when neither the request nor the design config provides one.
const UNTITLED: &str = "Untitled Popup";

/// Input for creating a popup. The name is optional; it falls back to the
/// design config's title, then to a placeholder.
#[derive(Debug, Clone, Default)]
pub struct CreatePopupInput {
    /// Website the popup is attached to.
    pub website_id: Uuid,
    /// Popup name.
    pub name: Option<String>,
    /// Popup kind.
    pub kind: Option<PopupKind>,
    /// Display trigger.
    pub trigger: Option<PopupTrigger>,
    /// Initial status.
    pub status: Option<PopupStatus>,
    /// Visual editor configuration.
    pub design_config: Option<serde_json::Value>,
    /// Targeting/display rules.
    pub display_rules: Option<serde_json::Value>,
}

/// Handles popup CRUD on behalf of the owning user.
#[derive(Debug, Clone)]
pub struct PopupService {
    /// Popup repository.
    popups: Arc<PopupRepository>,
    /// Website repository (ownership checks).
    websites: Arc<WebsiteRepository>,
}

impl PopupService {
    /// Creates a new popup service.
    pub fn new(popups: Arc<PopupRepository>, websites: Arc<WebsiteRepository>) -> Self {
        Self { popups, websites }
    }

    /// Lists the caller's popups, optionally for one website only.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        website_id: Option<Uuid>,
    ) -> Result<Vec<Popup>, AppError> {
        self.popups.list_for_user(ctx.user_id, website_id).await
    }

    /// Creates a popup on one of the caller's websites.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: CreatePopupInput,
    ) -> Result<Popup, AppError> {
        // The target website must belong to the caller.
        self.websites
            .find_for_user(input.website_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Website not found"))?;

        let design_config = input.design_config.unwrap_or_else(empty_object);
        let display_rules = input.display_rules.unwrap_or_else(empty_object);
        let status = input.status.unwrap_or_default();
        let name = resolve_name(input.name.as_deref(), &design_config);

        let popup = self
            .popups
            .create(&CreatePopup {
                user_id: ctx.user_id,
                website_id: input.website_id,
                name,
                kind: input.kind.unwrap_or_default(),
                trigger: input.trigger.unwrap_or_default(),
                status,
                design_config,
                display_rules,
                published_at: status.is_live().then(Utc::now),
            })
            .await?;

        info!(user_id = %ctx.user_id, popup_id = %popup.id, "Popup created");

        Ok(popup)
    }

    /// Fetches one of the caller's popups.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Popup, AppError> {
        self.popups
            .find_for_user(id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Popup not found"))
    }

    /// Applies a partial update to one of the caller's popups.
    ///
    /// The first transition to active stamps `published_at`; later pauses
    /// and re-activations keep the original timestamp.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        patch: UpdatePopup,
    ) -> Result<Popup, AppError> {
        let existing = self.get(ctx, id).await?;

        let name = match patch.name {
            Some(name) => {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    UNTITLED.to_string()
                } else {
                    trimmed.to_string()
                }
            }
            None => existing.name,
        };
        let status = patch.status.unwrap_or(existing.status);
        let published_at = match existing.published_at {
            Some(at) => Some(at),
            None => status.is_live().then(Utc::now),
        };

        self.popups
            .update(
                id,
                ctx.user_id,
                &name,
                patch.kind.unwrap_or(existing.kind),
                patch.trigger.unwrap_or(existing.trigger),
                status,
                &patch.design_config.unwrap_or(existing.design_config),
                &patch.display_rules.unwrap_or(existing.display_rules),
                published_at,
            )
            .await?
            .ok_or_else(|| AppError::not_found("Popup not found"))
    }

    /// Duplicates one of the caller's popups as a fresh draft.
    ///
    /// The copy starts with zeroed metrics and no publish timestamp.
    pub async fn duplicate(&self, ctx: &RequestContext, id: Uuid) -> Result<Popup, AppError> {
        let source = self.get(ctx, id).await?;

        let copy = self
            .popups
            .create(&CreatePopup {
                user_id: ctx.user_id,
                website_id: source.website_id,
                name: format!("Copy of {}", source.name),
                kind: source.kind,
                trigger: source.trigger,
                status: PopupStatus::Draft,
                design_config: source.design_config,
                display_rules: source.display_rules,
                published_at: None,
            })
            .await?;

        info!(user_id = %ctx.user_id, source = %id, copy = %copy.id, "Popup duplicated");

        Ok(copy)
    }

    /// Deletes one of the caller's popups.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let deleted = self.popups.delete(id, ctx.user_id).await?;
        if !deleted {
            return Err(AppError::not_found("Popup not found"));
        }

        info!(user_id = %ctx.user_id, popup_id = %id, "Popup deleted");

        Ok(())
    }
}

/// Resolve the popup name: explicit name, then the design config's title,
/// then the placeholder.
fn resolve_name(name: Option<&str>, design_config: &serde_json::Value) -> String {
    if let Some(name) = name {
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    if let Some(title) = design_config.get("title").and_then(|t| t.as_str()) {
        let trimmed = title.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    UNTITLED.to_string()
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}
