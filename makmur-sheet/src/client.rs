use std::sync::Arc;
use std::time::Duration;

use makmur_utils::time::now_id_timestamp;
use tracing::{debug, info, warn};

use crate::actions::{ProductEdit, SheetAction};
use crate::decoder::decode_payload;
use crate::error::SyncError;
use crate::model::product::{InventoryRecord, ProductDraft};
use crate::transport::{ReqwestSheetTransport, SheetTransport};

/// Result of a write. The script endpoint cannot be observed on the write
/// path, so `Dispatched` means "sent without a transport error", never
/// "applied". Reload to see whether the change landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum WriteOutcome {
    Dispatched,
}

/// Read/write access to the single spreadsheet endpoint.
#[derive(Clone)]
pub struct SheetClient {
    transport: Arc<dyn SheetTransport>,
}

impl std::fmt::Debug for SheetClient {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("SheetClient").finish_non_exhaustive()
    }
}

impl SheetClient {
    pub fn new(transport: Arc<dyn SheetTransport>) -> Self {
        Self { transport }
    }

    pub fn from_endpoint(endpoint: &str, timeout: Option<Duration>) -> Result<Self, SyncError> {
        let transport = ReqwestSheetTransport::new(endpoint, timeout)?;
        Ok(Self::new(Arc::new(transport)))
    }

    /// Fetch and decode every row. An endpoint with no usable rows yields an
    /// empty list.
    pub async fn fetch_all(&self) -> Result<Vec<InventoryRecord>, SyncError> {
        let payload = self.transport.fetch().await.inspect_err(|err| {
            warn!(?err, "sheet read failed");
        })?;

        let records = decode_payload(&payload);
        debug!(records = records.len(), "decoded sheet rows");
        Ok(records)
    }

    /// Send `action` one-way. See [`WriteOutcome`] for what success means.
    pub async fn mutate(&self, action: &SheetAction) -> Result<WriteOutcome, SyncError> {
        let body = serde_json::to_string(action).map_err(|err| {
            SyncError::Transport(format!("failed to encode `{}` payload: {err}", action.name()))
        })?;

        match self.transport.post(body).await {
            Ok(()) => {
                info!(
                    action = action.name(),
                    nomor = action.nomor(),
                    "sheet write dispatched (unacknowledged)"
                );
                Ok(WriteOutcome::Dispatched)
            }
            Err(err) => {
                warn!(?err, action = action.name(), "sheet write failed to dispatch");
                Err(err)
            }
        }
    }

    pub async fn add_product(&self, product: ProductDraft) -> Result<WriteOutcome, SyncError> {
        self.mutate(&SheetAction::AddProduct(product)).await
    }

    pub async fn edit_product(
        &self,
        nomor: u32,
        product: ProductDraft,
    ) -> Result<WriteOutcome, SyncError> {
        self.mutate(&SheetAction::EditProduct(ProductEdit { nomor, product }))
            .await
    }

    pub async fn delete_product(&self, nomor: u32) -> Result<WriteOutcome, SyncError> {
        self.mutate(&SheetAction::DeleteProduct { nomor }).await
    }

    /// Record `qty` units of `record` as sold, stamped with the local time.
    pub async fn record_sale(
        &self,
        record: &InventoryRecord,
        qty: u32,
    ) -> Result<WriteOutcome, SyncError> {
        self.mutate(&SheetAction::RecordSale {
            nomor: record.nomor,
            brand: record.brand.clone(),
            code: record.code.clone(),
            category: record.category.clone(),
            qty,
            timestamp: now_id_timestamp(),
        })
        .await
    }

    /// Log a customer request for an item the shop may not stock.
    pub async fn log_request(
        &self,
        item_name: &str,
        note: &str,
    ) -> Result<WriteOutcome, SyncError> {
        self.mutate(&SheetAction::LogRequest {
            item_name: item_name.to_owned(),
            note: note.to_owned(),
            timestamp: now_id_timestamp(),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use super::{SheetClient, WriteOutcome};
    use crate::error::SyncError;
    use crate::model::product::ProductDraft;
    use crate::transport::SheetTransport;

    #[derive(Default)]
    struct StubTransport {
        reads: Mutex<VecDeque<Result<Value, SyncError>>>,
        posts: Mutex<Vec<String>>,
        fail_posts: bool,
    }

    impl StubTransport {
        fn with_reads(reads: Vec<Result<Value, SyncError>>) -> Self {
            Self {
                reads: Mutex::new(reads.into()),
                ..Self::default()
            }
        }

        fn failing_posts() -> Self {
            Self {
                fail_posts: true,
                ..Self::default()
            }
        }

        fn posted(&self) -> Vec<Value> {
            self.posts
                .lock()
                .expect("posts lock")
                .iter()
                .map(|body| serde_json::from_str(body).expect("posted JSON"))
                .collect()
        }
    }

    #[async_trait]
    impl SheetTransport for StubTransport {
        async fn fetch(&self) -> Result<Value, SyncError> {
            self.reads
                .lock()
                .expect("reads lock")
                .pop_front()
                .unwrap_or_else(|| Err(SyncError::Transport("no queued read".to_owned())))
        }

        async fn post(&self, body: String) -> Result<(), SyncError> {
            if self.fail_posts {
                return Err(SyncError::Transport("connection refused".to_owned()));
            }
            self.posts.lock().expect("posts lock").push(body);
            Ok(())
        }
    }

    #[tokio::test]
    async fn fetch_all_decodes_rows() {
        let transport = Arc::new(StubTransport::with_reads(vec![Ok(json!([
            ["No", "Jenis", "Merk"],
            ["1", "Ban", "GT Radial", "Champiro", "185/65", "R15", "4", "Baru", "", ""],
        ]))]));
        let client = SheetClient::new(transport);

        let records = client.fetch_all().await.expect("fetch");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].brand, "GT Radial");
        assert_eq!(records[0].stock, 4);
    }

    #[tokio::test]
    async fn fetch_all_passes_read_errors_through() {
        let transport = Arc::new(StubTransport::with_reads(vec![Err(SyncError::Status(500))]));
        let client = SheetClient::new(transport);

        assert_eq!(client.fetch_all().await, Err(SyncError::Status(500)));
    }

    #[tokio::test]
    async fn fetch_all_with_no_rows_is_empty() {
        let transport = Arc::new(StubTransport::with_reads(vec![Ok(json!({ "error": "x" }))]));
        let client = SheetClient::new(transport);

        assert_eq!(client.fetch_all().await, Ok(Vec::new()));
    }

    #[tokio::test]
    async fn writes_are_tagged_with_their_action() {
        let transport = Arc::new(StubTransport::default());
        let client = SheetClient::new(transport.clone());

        let draft = ProductDraft {
            brand: "Dunlop".to_owned(),
            code: "Enasave".to_owned(),
            ..ProductDraft::default()
        };
        assert_eq!(client.add_product(draft.clone()).await, Ok(WriteOutcome::Dispatched));
        assert_eq!(client.edit_product(7, draft).await, Ok(WriteOutcome::Dispatched));
        assert_eq!(client.delete_product(7).await, Ok(WriteOutcome::Dispatched));
        assert_eq!(
            client.log_request("Velg R17", "cari 4 pcs").await,
            Ok(WriteOutcome::Dispatched)
        );

        let posted = transport.posted();
        let actions: Vec<_> = posted.iter().map(|body| body["action"].clone()).collect();
        assert_eq!(
            actions,
            vec![
                json!("add_product"),
                json!("edit_product"),
                json!("delete_product"),
                json!("log_request")
            ]
        );
        assert_eq!(posted[1]["nomor"], 7);
        assert_eq!(posted[2], json!({ "action": "delete_product", "nomor": 7 }));
        assert_eq!(posted[3]["itemName"], "Velg R17");
        assert!(posted[3]["timestamp"].as_str().is_some_and(|ts| !ts.is_empty()));
    }

    #[tokio::test]
    async fn record_sale_copies_identity_and_stamps_time() {
        let transport = Arc::new(StubTransport::with_reads(vec![Ok(json!([
            ["4", "Ban", "GT Radial", "Champiro", "185/65", "R15", "4", "Baru", "", ""],
        ]))]));
        let client = SheetClient::new(transport.clone());
        let records = client.fetch_all().await.expect("fetch");

        assert_eq!(client.record_sale(&records[0], 2).await, Ok(WriteOutcome::Dispatched));

        let posted = transport.posted();
        let sale = &posted[0];
        assert_eq!(sale["action"], "record_sale");
        assert_eq!(sale["nomor"], 4);
        assert_eq!(sale["brand"], "GT Radial");
        assert_eq!(sale["code"], "Champiro");
        assert_eq!(sale["category"], "Ban");
        assert_eq!(sale["qty"], 2);
        assert!(sale["timestamp"].as_str().is_some_and(|ts| ts.contains('/')));
    }

    #[tokio::test]
    async fn transport_failure_is_reported() {
        let client = SheetClient::new(Arc::new(StubTransport::failing_posts()));

        let result = client.delete_product(1).await;
        assert!(matches!(result, Err(SyncError::Transport(_))));
    }
}
