//! OrderReader port - Read access to the external order system.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, InvoiceId};
use crate::domain::payment::OrderSnapshot;

/// Reader port for order snapshots.
///
/// The invoice id sent to Robokassa is the order number, so orders are
/// looked up by it directly.
#[async_trait]
pub trait OrderReader: Send + Sync {
    /// Returns `None` if the order does not exist.
    async fn find_by_invoice_id(
        &self,
        invoice_id: InvoiceId,
    ) -> Result<Option<OrderSnapshot>, DomainError>;
}
