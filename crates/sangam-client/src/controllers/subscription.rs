//! Subscription screen controller.
//!
//! Not gated: the plans and checkout screens are exactly where a blocked
//! member is sent.  The status poll runs silently so a flaky endpoint
//! never nags, and every successful probe feeds the gate, which is how an
//! expiry observed by this poll locks the rest of the app.

use std::sync::Arc;

use tracing::debug;

use sangam_api::{
    Invoice, PaymentSelection, Plan, Result as ApiResult, Subscription, UploadFile,
};

use crate::cache::QueryKey;
use crate::poller::{spawn_poll, PollErrorPolicy, PollHandle};
use crate::state::AppState;

pub struct SubscriptionController {
    state: Arc<AppState>,
    _poll: PollHandle,
}

impl SubscriptionController {
    pub fn mount(state: Arc<AppState>) -> Self {
        let poll = spawn_status_poll(&state);
        Self { state, _poll: poll }
    }

    /// The cached subscription, if the member has one.
    pub fn current(&self) -> Option<Subscription> {
        self.state
            .cache
            .get::<Option<Subscription>>(&QueryKey::CurrentSubscription)
            .flatten()
    }

    pub async fn plans(&self) -> ApiResult<Vec<Plan>> {
        self.state.api.subscription_plans().await
    }

    /// Purchase a plan.  An invalid mixed split fails client-side and is
    /// surfaced as a toast; nothing is sent.
    pub async fn subscribe(
        &self,
        plan: &Plan,
        payment: PaymentSelection,
    ) -> ApiResult<Subscription> {
        match self.state.api.subscribe(plan, payment).await {
            Ok(subscription) => {
                self.state
                    .events
                    .toast("Subscription submitted for approval");
                self.refetch_current().await;
                Ok(subscription)
            }
            Err(e) => {
                self.state.events.report_api_error(&e);
                Err(e)
            }
        }
    }

    pub async fn upgrade(&self, plan: &Plan) -> ApiResult<Subscription> {
        match self.state.api.upgrade_subscription(plan).await {
            Ok(subscription) => {
                self.refetch_current().await;
                Ok(subscription)
            }
            Err(e) => {
                self.state.events.report_api_error(&e);
                Err(e)
            }
        }
    }

    pub async fn upload_payment_proof(
        &self,
        subscription_id: &str,
        file: UploadFile,
    ) -> ApiResult<()> {
        match self
            .state
            .api
            .upload_payment_proof(subscription_id, file)
            .await
        {
            Ok(()) => {
                self.state.events.toast("Payment proof uploaded");
                Ok(())
            }
            Err(e) => {
                self.state.events.report_api_error(&e);
                Err(e)
            }
        }
    }

    pub async fn invoice(&self, subscription_id: &str) -> ApiResult<Invoice> {
        self.state.api.subscription_invoice(subscription_id).await
    }

    pub async fn history(&self) -> ApiResult<Vec<Subscription>> {
        let history = self.state.api.subscription_history().await?;
        self.state.cache.put(QueryKey::SubscriptionHistory, &history);
        Ok(history)
    }

    async fn refetch_current(&self) {
        match self.state.api.current_subscription().await {
            Ok(subscription) => apply_status(&self.state, subscription),
            Err(e) => debug!(error = %e, "subscription refetch failed, next poll retries"),
        }
    }
}

fn apply_status(state: &Arc<AppState>, subscription: Option<Subscription>) {
    state
        .gate
        .set_subscription_active(subscription.as_ref().is_some_and(|s| s.is_active));
    state.cache.put(QueryKey::CurrentSubscription, &subscription);
}

fn spawn_status_poll(state: &Arc<AppState>) -> PollHandle {
    let state = Arc::clone(state);
    spawn_poll(
        "subscription",
        state.config.subscription_poll,
        PollErrorPolicy::Silent,
        move || {
            let state = Arc::clone(&state);
            async move {
                let subscription = state.api.current_subscription().await?;
                apply_status(&state, subscription);
                Ok(())
            }
        },
    )
}
