//! Per-request context describing the resolved caller.

use uuid::Uuid;

use popuply_entity::user::{SubscriptionTier, UserIdentity, UserRole};

/// The identity acting on a request, resolved by the session middleware.
///
/// Carries only public-facing fields; everything else must be re-read from
/// the store by the service that needs it.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Acting user's ID.
    pub user_id: Uuid,
    /// Acting user's email.
    pub email: String,
    /// Acting user's role.
    pub role: UserRole,
    /// Acting user's subscription tier.
    pub tier: SubscriptionTier,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, email: String, role: UserRole, tier: SubscriptionTier) -> Self {
        Self {
            user_id,
            email,
            role,
            tier,
        }
    }

    /// Whether the caller is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<UserIdentity> for RequestContext {
    fn from(identity: UserIdentity) -> Self {
        Self::new(identity.id, identity.email, identity.role, identity.tier)
    }
}
