//! In-Memory Payment Store Adapter
//!
//! Keeps payment records in memory, keyed by invoice id.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, InvoiceId};
use crate::domain::payment::PaymentRecord;
use crate::ports::PaymentStore;

/// In-memory storage for payment records
#[derive(Debug, Clone)]
pub struct InMemoryPaymentStore {
    payments: Arc<RwLock<HashMap<InvoiceId, PaymentRecord>>>,
}

impl InMemoryPaymentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            payments: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get the number of stored payments
    pub async fn payment_count(&self) -> usize {
        self.payments.read().await.len()
    }

    /// Clear all stored payments (useful for tests)
    pub async fn clear(&self) {
        self.payments.write().await.clear();
    }
}

impl Default for InMemoryPaymentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn find_by_invoice_id(
        &self,
        invoice_id: InvoiceId,
    ) -> Result<Option<PaymentRecord>, DomainError> {
        let payments = self.payments.read().await;
        Ok(payments.get(&invoice_id).cloned())
    }

    async fn save(&self, payment: &PaymentRecord) -> Result<(), DomainError> {
        let mut payments = self.payments.write().await;
        payments.insert(payment.invoice_id, payment.clone());
        Ok(())
    }
}
