//! Payment method enum and the client-side mixed-split check.

use serde::{Deserialize, Serialize};

use crate::constants::MIXED_PAYMENT_TOLERANCE;
use crate::error::ValidationError;

/// How a subscription is paid for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Upi,
    Cash,
    Mixed,
}

/// Whether a UPI + cash split covers the plan price within the allowed
/// rounding tolerance of one currency unit.
pub fn mixed_split_covers_price(plan_price: f64, upi_amount: f64, cash_amount: f64) -> bool {
    (upi_amount + cash_amount - plan_price).abs() <= MIXED_PAYMENT_TOLERANCE
}

/// Validate a mixed split before any request is sent.
///
/// Returns the amounts echoed back in the error so the UI can show what was
/// actually entered.
pub fn validate_mixed_split(
    plan_price: f64,
    upi_amount: f64,
    cash_amount: f64,
) -> Result<(), ValidationError> {
    if mixed_split_covers_price(plan_price, upi_amount, cash_amount) {
        Ok(())
    } else {
        Err(ValidationError::PaymentSplitMismatch {
            plan_price,
            paid: upi_amount + cash_amount,
        })
    }
}
