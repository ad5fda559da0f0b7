//! Feature-gating decision table.
//!
//! Gated screens (search, chat, interests, favorites, notifications) check
//! two independently fetched flags before rendering: "has an active
//! subscription" and "profile is complete".  Whichever fails produces a
//! blocking modal, subscription taking priority.  Admin and vendor accounts
//! bypass both checks.

use crate::types::UserRole;

/// Outcome of the gate check, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// No active subscription: show the subscription-required modal.
    SubscriptionRequired,
    /// Subscribed but the profile checklist fails: show the
    /// profile-incomplete modal.
    ProfileIncomplete,
    /// Both conditions hold (or the role is privileged).
    Allowed,
}

impl GateDecision {
    pub fn is_allowed(self) -> bool {
        self == GateDecision::Allowed
    }
}

/// Evaluate the gate for one screen render.
///
/// Pure; re-run whenever either input flag is refetched.
pub fn evaluate_gate(
    has_active_subscription: bool,
    profile_complete: bool,
    role: UserRole,
) -> GateDecision {
    if role.is_privileged() {
        return GateDecision::Allowed;
    }
    if !has_active_subscription {
        return GateDecision::SubscriptionRequired;
    }
    if !profile_complete {
        return GateDecision::ProfileIncomplete;
    }
    GateDecision::Allowed
}
