//! PaymentStore port - Persistence of Robokassa payment records.
//!
//! The store owns payment state. It must guarantee at most one effective
//! state transition per invoice id when the same notification is delivered
//! concurrently; the domain only recomputes the same decision.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, InvoiceId};
use crate::domain::payment::PaymentRecord;

/// Repository port for payment records, keyed by invoice id.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Find the payment for an invoice.
    ///
    /// Returns `None` if no redirect was ever issued for it.
    async fn find_by_invoice_id(
        &self,
        invoice_id: InvoiceId,
    ) -> Result<Option<PaymentRecord>, DomainError>;

    /// Insert or replace the payment for its invoice.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, payment: &PaymentRecord) -> Result<(), DomainError>;
}
