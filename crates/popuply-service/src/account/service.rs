//! Account self-service — profile viewing, profile updates, and account
//! deletion with cascade.

use std::sync::Arc;

use tracing::info;

use popuply_core::error::AppError;
use popuply_database::repositories::popup::PopupRepository;
use popuply_database::repositories::user::UserRepository;
use popuply_database::repositories::website::WebsiteRepository;
use popuply_entity::user::model::UpdateProfile;
use popuply_entity::user::User;

use crate::context::RequestContext;

/// Handles account self-service operations.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// User repository.
    users: Arc<UserRepository>,
    /// Website repository (for the deletion cascade).
    websites: Arc<WebsiteRepository>,
    /// Popup repository (for the deletion cascade).
    popups: Arc<PopupRepository>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        users: Arc<UserRepository>,
        websites: Arc<WebsiteRepository>,
        popups: Arc<PopupRepository>,
    ) -> Self {
        Self {
            users,
            websites,
            popups,
        }
    }

    /// Gets the caller's full profile.
    ///
    /// An account deleted after the token was resolved surfaces as an
    /// authentication failure, not a 404, to avoid existence leakage.
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::authentication("Authentication required"))
    }

    /// Updates the caller's profile with the fields present in the patch.
    ///
    /// An email change is re-checked for uniqueness against other accounts
    /// first; on collision nothing in the request is applied.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        mut patch: UpdateProfile,
    ) -> Result<User, AppError> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Name cannot be empty"));
            }
        }

        if let Some(raw) = patch.email.take() {
            let email = raw.trim().to_string();
            if !email.contains('@') || !email.contains('.') {
                return Err(AppError::validation("Invalid email format"));
            }

            // No uniqueness check or write when the email is unchanged.
            if email != ctx.email {
                if self.users.email_taken_by_other(&email, ctx.user_id).await? {
                    return Err(AppError::conflict("Email already in use"));
                }
                patch.email = Some(email);
            }
        }

        let user = self.users.update_profile(ctx.user_id, &patch).await?;

        info!(user_id = %ctx.user_id, "Profile updated");

        Ok(user)
    }

    /// Deletes the caller's account and everything it owns.
    ///
    /// Hard delete, no tombstones: popups first, then websites, then the
    /// user row itself. Analytics events go with their popups via the
    /// database cascade. Any token issued for this account fails
    /// resolution afterwards.
    pub async fn delete_account(&self, ctx: &RequestContext) -> Result<(), AppError> {
        let popups = self.popups.delete_all_for_user(ctx.user_id).await?;
        let websites = self.websites.delete_all_for_user(ctx.user_id).await?;
        let deleted = self.users.delete(ctx.user_id).await?;

        if !deleted {
            return Err(AppError::authentication("Authentication required"));
        }

        info!(
            user_id = %ctx.user_id,
            websites,
            popups,
            "Account deleted with cascade"
        );

        Ok(())
    }
}
