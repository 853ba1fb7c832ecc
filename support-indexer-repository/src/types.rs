//! Request types for search index operations.

/// Request to set the status of every ticket belonging to a customer.
///
/// Matching is by the `customer_email` field, not by document id, so every
/// document carrying the email is updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPatchRequest {
    /// The customer whose tickets are patched.
    pub customer_email: String,
    /// The new status value.
    pub status: String,
}

impl StatusPatchRequest {
    /// Create a new status patch request.
    pub fn new(customer_email: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            customer_email: customer_email.into(),
            status: status.into(),
        }
    }
}
