//! Concrete repository implementations, one per aggregate.

pub mod analytics;
pub mod popup;
pub mod user;
pub mod website;

pub use analytics::AnalyticsRepository;
pub use popup::PopupRepository;
pub use user::UserRepository;
pub use website::WebsiteRepository;
