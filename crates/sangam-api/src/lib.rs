//! # sangam-api
//!
//! Authenticated REST client for the Sangam platform API.  One module per
//! endpoint group, DTOs defined next to the calls that use them.  All
//! requests carry the bearer token held by [`ApiClient`]; media paths are
//! resolved against the API origin.

pub mod chats;
pub mod client;
pub mod favorites;
pub mod interests;
pub mod notifications;
pub mod profiles;
pub mod search;
pub mod subscriptions;
pub mod upload;

mod error;

pub use chats::{ChatSummary, MediaItem, TypingStatus};
pub use client::ApiClient;
pub use error::{ApiError, Result};
pub use favorites::{favorites_to_csv, Favorite};
pub use interests::Interest;
pub use notifications::{Notification, NotificationPreferences, NotificationQuery};
pub use profiles::ProfileUpdate;
pub use search::{Pagination, SearchPage};
pub use subscriptions::{Invoice, PaymentSelection, Plan, Subscription};
pub use upload::UploadFile;
