//! # sangam-shared
//!
//! Domain types and pure logic shared by every Sangam crate: entity models,
//! wire enums, the profile-completeness predicate, the feature-gating
//! decision table, payment-split validation, and search-filter handling.
//!
//! Nothing in this crate performs I/O; everything here is deterministic and
//! unit-testable in isolation.

pub mod constants;
pub mod error;
pub mod gating;
pub mod message;
pub mod payment;
pub mod profile;
pub mod search;
pub mod types;

pub use error::ValidationError;
pub use gating::{evaluate_gate, GateDecision};
pub use message::{classify_mime, ChatMessage, MessageBody, MessageKind};
pub use payment::{mixed_split_covers_price, PaymentMethod};
pub use profile::{completion_percentage, is_profile_complete, Profile};
pub use search::{SavedSearch, SearchFilters, SortKey};
pub use types::*;
