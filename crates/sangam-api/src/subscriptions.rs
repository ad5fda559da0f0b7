//! Subscription plans, the current-subscription probe, purchase/upgrade,
//! invoices, and history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sangam_shared::payment::validate_mixed_split;
use sangam_shared::{ApprovalStatus, PaymentMethod};

use crate::client::ApiClient;
use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub duration_days: u32,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub plan_id: String,
    pub plan_name: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub status: ApprovalStatus,
    #[serde(default)]
    pub is_active: bool,
    pub valid_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub subscription_id: String,
    pub amount: f64,
    pub issued_at: DateTime<Utc>,
    pub download_url: String,
}

/// How the member chose to pay at checkout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaymentSelection {
    Upi,
    Cash,
    Mixed { upi_amount: f64, cash_amount: f64 },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubscribeBody<'a> {
    plan_id: &'a str,
    payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    upi_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cash_amount: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpgradeBody<'a> {
    plan_id: &'a str,
}

impl ApiClient {
    pub async fn subscription_plans(&self) -> Result<Vec<Plan>> {
        self.get_json("/api/subscriptions/plans").await
    }

    /// Probe the member's current subscription.
    ///
    /// A 401/404 here means "no active subscription" and yields `Ok(None)`;
    /// it is not an error.
    pub async fn current_subscription(&self) -> Result<Option<Subscription>> {
        match self.get_json("/api/subscriptions/current").await {
            Ok(sub) => Ok(Some(sub)),
            Err(e) if e.is_missing_subscription_probe() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Purchase a plan.  Mixed splits are validated client-side against the
    /// plan price before any request is sent.
    pub async fn subscribe(
        &self,
        plan: &Plan,
        payment: PaymentSelection,
    ) -> Result<Subscription> {
        let body = match payment {
            PaymentSelection::Upi => SubscribeBody {
                plan_id: &plan.id,
                payment_method: PaymentMethod::Upi,
                upi_amount: None,
                cash_amount: None,
            },
            PaymentSelection::Cash => SubscribeBody {
                plan_id: &plan.id,
                payment_method: PaymentMethod::Cash,
                upi_amount: None,
                cash_amount: None,
            },
            PaymentSelection::Mixed {
                upi_amount,
                cash_amount,
            } => {
                validate_mixed_split(plan.price, upi_amount, cash_amount)?;
                SubscribeBody {
                    plan_id: &plan.id,
                    payment_method: PaymentMethod::Mixed,
                    upi_amount: Some(upi_amount),
                    cash_amount: Some(cash_amount),
                }
            }
        };

        self.post_json("/api/subscriptions", &body).await
    }

    pub async fn upgrade_subscription(&self, plan: &Plan) -> Result<Subscription> {
        self.post_json(
            "/api/subscriptions/upgrade",
            &UpgradeBody { plan_id: &plan.id },
        )
        .await
    }

    pub async fn subscription_invoice(&self, subscription_id: &str) -> Result<Invoice> {
        self.get_json(&format!("/api/subscriptions/{subscription_id}/invoice"))
            .await
    }

    pub async fn subscription_history(&self) -> Result<Vec<Subscription>> {
        self.get_json("/api/subscriptions/history").await
    }
}
