//! Admin-only user management.

use std::sync::Arc;

use popuply_core::error::AppError;
use popuply_core::types::pagination::{PageRequest, PageResponse};
use popuply_database::repositories::user::UserRepository;
use popuply_entity::user::User;

/// Handles admin operations over the user base.
#[derive(Debug, Clone)]
pub struct AdminService {
    /// User repository.
    users: Arc<UserRepository>,
}

impl AdminService {
    /// Creates a new admin service.
    pub fn new(users: Arc<UserRepository>) -> Self {
        Self { users }
    }

    /// Lists all registered users, newest first.
    ///
    /// The role check happens in the middleware layer; by the time this
    /// runs the caller is known to be an admin.
    pub async fn list_users(&self, page: &PageRequest) -> Result<PageResponse<User>, AppError> {
        self.users.find_all(page).await
    }
}
