use thiserror::Error;

/// Client-side validation failures raised before any request is sent.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Mixed UPI + cash amounts do not cover the plan price within the
    /// allowed tolerance.
    #[error("Payment split {paid} does not match the plan price {plan_price}")]
    PaymentSplitMismatch { plan_price: f64, paid: f64 },

    /// A saved search needs a non-empty name.
    #[error("Saved search name must not be empty")]
    EmptySearchName,

    /// Attachment exceeds the upload size cap.
    #[error("File too large: {size} bytes (max {max})")]
    FileTooLarge { size: usize, max: usize },
}
