//! In-Memory Order Reader Adapter
//!
//! Serves order snapshots from memory. Orders can be seeded from a JSON
//! file holding an array of snapshots.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, InvoiceId};
use crate::domain::payment::OrderSnapshot;
use crate::ports::OrderReader;

/// In-memory order source
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderReader {
    orders: Arc<RwLock<HashMap<InvoiceId, OrderSnapshot>>>,
}

impl InMemoryOrderReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader holding `orders`
    pub fn with_orders(orders: impl IntoIterator<Item = OrderSnapshot>) -> Self {
        let orders = orders.into_iter().map(|order| (order.id, order)).collect();
        Self {
            orders: Arc::new(RwLock::new(orders)),
        }
    }

    /// Load orders from a JSON array file
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::new(ErrorCode::InternalError, e.to_string())
                .with_detail("path", path.display().to_string())
        })?;
        let orders: Vec<OrderSnapshot> = serde_json::from_str(&raw).map_err(|e| {
            DomainError::new(ErrorCode::ValidationFailed, e.to_string())
                .with_detail("path", path.display().to_string())
        })?;
        Ok(Self::with_orders(orders))
    }

    /// Add or replace an order
    pub async fn insert(&self, order: OrderSnapshot) {
        self.orders.write().await.insert(order.id, order);
    }

    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderReader for InMemoryOrderReader {
    async fn find_by_invoice_id(
        &self,
        invoice_id: InvoiceId,
    ) -> Result<Option<OrderSnapshot>, DomainError> {
        let orders = self.orders.read().await;
        Ok(orders.get(&invoice_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Money;
    use tempfile::TempDir;

    fn order(id: u64) -> OrderSnapshot {
        OrderSnapshot::new(
            InvoiceId::new(id).unwrap(),
            Money::parse("99.90", "RUB").unwrap(),
            "a@b.c",
        )
    }

    #[tokio::test]
    async fn finds_seeded_order() {
        let reader = InMemoryOrderReader::with_orders([order(1), order(2)]);
        let found = reader
            .find_by_invoice_id(InvoiceId::new(2).unwrap())
            .await
            .unwrap();
        assert_eq!(found.unwrap().total.to_out_sum(), "99.90");
        assert_eq!(reader.order_count().await, 2);
    }

    #[tokio::test]
    async fn insert_makes_order_visible() {
        let reader = InMemoryOrderReader::new();
        reader.insert(order(8)).await;
        let found = reader
            .find_by_invoice_id(InvoiceId::new(8).unwrap())
            .await
            .unwrap();
        assert!(found.is_some());
    }

    async fn write_orders_file(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("orders.json");
        tokio::fs::write(&path, contents).await.unwrap();
        path
    }

    #[tokio::test]
    async fn loads_orders_from_json_file() {
        let dir = TempDir::new().unwrap();
        let path = write_orders_file(
            &dir,
            r#"[{"id":3,"total":{"amount":"10.00","currency":"RUB"},"email":"a@b.c",
                 "items":[{"name":"Tea","unit_price":"10.00","quantity":"1"}]}]"#,
        )
        .await;

        let reader = InMemoryOrderReader::from_json_file(&path).await.unwrap();
        assert_eq!(reader.order_count().await, 1);
    }

    #[tokio::test]
    async fn invalid_order_in_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_orders_file(
            &dir,
            r#"[{"id":0,"total":{"amount":"-5.00","currency":"rubles"},"email":"a@b.c",
                 "items":[{"name":"","unit_price":"-1","quantity":"0"}]}]"#,
        )
        .await;

        let err = InMemoryOrderReader::from_json_file(&path).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.details.contains_key("path"));
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let err = InMemoryOrderReader::from_json_file("/nonexistent/orders.json")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(
            err.details.get("path").map(String::as_str),
            Some("/nonexistent/orders.json")
        );
    }
}
