//! Reactive feature gate.
//!
//! Wraps the pure decision table from `sangam-shared` in a controller that
//! recomputes whenever either input flag is refetched and publishes the
//! current decision on a watch channel, so every gated view reacts to one
//! view's refetch.

use std::sync::Mutex;

use tokio::sync::watch;
use tracing::debug;

use sangam_shared::{evaluate_gate, GateDecision, UserRole};

use crate::events::{EventBus, UiEvent};

struct GateInputs {
    has_active_subscription: bool,
    profile_complete: bool,
    role: UserRole,
}

/// Holds the gate inputs and the published decision.
pub struct GateController {
    inputs: Mutex<GateInputs>,
    tx: watch::Sender<GateDecision>,
}

impl GateController {
    /// Start pessimistic: until the first subscription and profile fetches
    /// land, a non-privileged member is treated as unsubscribed.
    pub fn new(role: UserRole) -> Self {
        let decision = evaluate_gate(false, false, role);
        let (tx, _rx) = watch::channel(decision);
        Self {
            inputs: Mutex::new(GateInputs {
                has_active_subscription: false,
                profile_complete: false,
                role,
            }),
            tx,
        }
    }

    pub fn set_subscription_active(&self, active: bool) {
        self.update(|inputs| inputs.has_active_subscription = active);
    }

    pub fn set_profile_complete(&self, complete: bool) {
        self.update(|inputs| inputs.profile_complete = complete);
    }

    pub fn set_role(&self, role: UserRole) {
        self.update(|inputs| inputs.role = role);
    }

    /// The current decision.
    pub fn decision(&self) -> GateDecision {
        *self.tx.borrow()
    }

    /// Watch for decision changes.
    pub fn subscribe(&self) -> watch::Receiver<GateDecision> {
        self.tx.subscribe()
    }

    /// Check the gate for a screen render; emits the blocking modal event
    /// when access is denied.  Returns whether the screen may proceed.
    pub fn enforce(&self, events: &EventBus) -> bool {
        match self.decision() {
            GateDecision::Allowed => true,
            GateDecision::SubscriptionRequired => {
                events.emit(UiEvent::SubscriptionModal);
                false
            }
            GateDecision::ProfileIncomplete => {
                events.emit(UiEvent::ProfileIncompleteModal);
                false
            }
        }
    }

    fn update<F: FnOnce(&mut GateInputs)>(&self, change: F) {
        let decision = {
            let Ok(mut inputs) = self.inputs.lock() else {
                return;
            };
            change(&mut inputs);
            evaluate_gate(
                inputs.has_active_subscription,
                inputs.profile_complete,
                inputs.role,
            )
        };

        self.tx.send_if_modified(|current| {
            if *current != decision {
                debug!(?decision, "gate decision changed");
                *current = decision;
                true
            } else {
                false
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_pessimistic_for_members() {
        let gate = GateController::new(UserRole::Member);
        assert_eq!(gate.decision(), GateDecision::SubscriptionRequired);
    }

    #[test]
    fn privileged_roles_always_pass() {
        let gate = GateController::new(UserRole::Admin);
        assert_eq!(gate.decision(), GateDecision::Allowed);
        gate.set_subscription_active(false);
        gate.set_profile_complete(false);
        assert_eq!(gate.decision(), GateDecision::Allowed);
    }

    #[test]
    fn subscription_then_profile_then_allowed() {
        let gate = GateController::new(UserRole::Member);

        gate.set_subscription_active(true);
        assert_eq!(gate.decision(), GateDecision::ProfileIncomplete);

        gate.set_profile_complete(true);
        assert_eq!(gate.decision(), GateDecision::Allowed);

        // expiry regresses the decision
        gate.set_subscription_active(false);
        assert_eq!(gate.decision(), GateDecision::SubscriptionRequired);
    }

    #[tokio::test]
    async fn watchers_observe_changes() {
        let gate = GateController::new(UserRole::Member);
        let mut rx = gate.subscribe();

        gate.set_subscription_active(true);
        gate.set_profile_complete(true);

        rx.changed().await.unwrap();
        // the watch channel coalesces; the latest value is what matters
        assert_eq!(*rx.borrow_and_update(), GateDecision::Allowed);
    }

    #[tokio::test]
    async fn enforce_emits_matching_modal() {
        let gate = GateController::new(UserRole::Member);
        let events = EventBus::new();
        let mut rx = events.subscribe();

        assert!(!gate.enforce(&events));
        assert!(matches!(rx.recv().await.unwrap(), UiEvent::SubscriptionModal));

        gate.set_subscription_active(true);
        assert!(!gate.enforce(&events));
        assert!(matches!(
            rx.recv().await.unwrap(),
            UiEvent::ProfileIncompleteModal
        ));

        gate.set_profile_complete(true);
        assert!(gate.enforce(&events));
    }
}
