//! Website management — registration, settings, key rotation, deletion.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use popuply_core::error::AppError;
use popuply_database::repositories::popup::PopupRepository;
use popuply_database::repositories::website::WebsiteRepository;
use popuply_entity::popup::Popup;
use popuply_entity::website::model::{CreateWebsite, UpdateWebsite};
use popuply_entity::website::Website;

use crate::context::RequestContext;

use super::key::generate_website_key;

/// Handles website CRUD on behalf of the owning user.
#[derive(Debug, Clone)]
pub struct WebsiteService {
    /// Website repository.
    websites: Arc<WebsiteRepository>,
    /// Popup repository (for listing and the deletion cascade).
    popups: Arc<PopupRepository>,
}

impl WebsiteService {
    /// Creates a new website service.
    pub fn new(websites: Arc<WebsiteRepository>, popups: Arc<PopupRepository>) -> Self {
        Self { websites, popups }
    }

    /// Lists the caller's websites.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<Website>, AppError> {
        self.websites.list_for_user(ctx.user_id).await
    }

    /// Registers a new website with a freshly generated embed key.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        domain: &str,
        name: Option<String>,
    ) -> Result<Website, AppError> {
        let domain = domain.trim().trim_end_matches('/');
        let domain = domain
            .strip_prefix("https://")
            .or_else(|| domain.strip_prefix("http://"))
            .unwrap_or(domain);

        if domain.is_empty() || !domain.contains('.') || domain.contains(char::is_whitespace) {
            return Err(AppError::validation("A valid domain is required"));
        }

        let website = self
            .websites
            .create(&CreateWebsite {
                user_id: ctx.user_id,
                domain: domain.to_string(),
                website_key: generate_website_key(),
                name,
            })
            .await?;

        info!(user_id = %ctx.user_id, website_id = %website.id, domain = %website.domain, "Website registered");

        Ok(website)
    }

    /// Fetches one of the caller's websites.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Website, AppError> {
        self.websites
            .find_for_user(id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Website not found"))
    }

    /// Applies a partial update to one of the caller's websites.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        patch: UpdateWebsite,
    ) -> Result<Website, AppError> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Name cannot be empty"));
            }
        }

        self.websites
            .update(id, ctx.user_id, &patch)
            .await?
            .ok_or_else(|| AppError::not_found("Website not found"))
    }

    /// Rotates the embed key, retiring the old one into `previous_keys`.
    pub async fn rotate_key(&self, ctx: &RequestContext, id: Uuid) -> Result<Website, AppError> {
        let website = self
            .websites
            .rotate_key(id, ctx.user_id, &generate_website_key())
            .await?
            .ok_or_else(|| AppError::not_found("Website not found"))?;

        info!(user_id = %ctx.user_id, website_id = %website.id, "Website key rotated");

        Ok(website)
    }

    /// Deletes one of the caller's websites and all popups attached to it.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let popups = self.popups.delete_for_website(id, ctx.user_id).await?;
        let deleted = self.websites.delete(id, ctx.user_id).await?;

        if !deleted {
            return Err(AppError::not_found("Website not found"));
        }

        info!(user_id = %ctx.user_id, website_id = %id, popups, "Website deleted");

        Ok(())
    }

    /// Lists the popups attached to one of the caller's websites.
    pub async fn list_popups(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Vec<Popup>, AppError> {
        // Ownership check first so a foreign website id is a plain 404.
        self.get(ctx, id).await?;
        self.popups.list_for_user(ctx.user_id, Some(id)).await
    }
}
