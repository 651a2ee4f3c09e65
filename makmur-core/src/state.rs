use std::collections::BTreeMap;
use std::sync::Arc;

use makmur_llm::AssistantService;
use makmur_llm::prompt::FALLBACK_REPLY;
use makmur_sheet::{InventoryRecord, ProductDraft, SheetClient, SyncError, WriteOutcome};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::auth::{AuthError, OperatorSession};
use crate::chat::{ChatLog, ChatMessage};
use crate::config::StoreConfig;
use crate::view;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    /// The current snapshot has no record with this `nomor`.
    #[error("no product with nomor {0} in the current inventory")]
    UnknownProduct(u32),
}

/// Shared storefront session: the last good inventory snapshot, operator
/// login, and the chat transcript.
///
/// Writes never touch the snapshot. Call [`Storefront::reload`] after a
/// dispatched write to see whether the sheet accepted it.
#[derive(Clone, Debug)]
pub struct Storefront {
    config: StoreConfig,
    sheet: SheetClient,
    assistant: Option<AssistantService>,
    records: Arc<RwLock<Arc<Vec<InventoryRecord>>>>,
    session: Arc<RwLock<OperatorSession>>,
    chat: Arc<RwLock<ChatLog>>,
}

impl Storefront {
    pub fn new(config: StoreConfig, sheet: SheetClient, assistant: Option<AssistantService>) -> Self {
        let session = OperatorSession::new(config.admin_password.clone());

        Self {
            config,
            sheet,
            assistant,
            records: Arc::new(RwLock::new(Arc::new(Vec::new()))),
            session: Arc::new(RwLock::new(session)),
            chat: Arc::new(RwLock::new(ChatLog::new())),
        }
    }

    /// Build the sheet client from `config.sheet_url`.
    pub fn from_config(
        config: StoreConfig,
        assistant: Option<AssistantService>,
    ) -> Result<Self, SyncError> {
        let sheet = SheetClient::from_endpoint(&config.sheet_url, config.sheet_timeout)?;
        Ok(Self::new(config, sheet, assistant))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn assistant_enabled(&self) -> bool {
        self.assistant.is_some()
    }

    /// Replace the snapshot with a fresh read. On error the previous snapshot
    /// stays in place.
    pub async fn reload(&self) -> Result<usize, SyncError> {
        let records = self.sheet.fetch_all().await?;
        let count = records.len();

        *self.records.write().await = Arc::new(records);
        info!(records = count, "inventory synchronized");
        Ok(count)
    }

    pub async fn snapshot(&self) -> Arc<Vec<InventoryRecord>> {
        self.records.read().await.clone()
    }

    pub async fn find(&self, nomor: u32) -> Option<InventoryRecord> {
        self.snapshot()
            .await
            .iter()
            .find(|record| record.nomor == nomor)
            .cloned()
    }

    pub async fn filtered(&self, category: &str, query: &str) -> Vec<InventoryRecord> {
        let snapshot = self.snapshot().await;
        view::filter(&snapshot, category, query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Filtered records grouped by upper-cased brand, brands ascending.
    pub async fn grouped(
        &self,
        category: &str,
        query: &str,
    ) -> BTreeMap<String, Vec<InventoryRecord>> {
        let snapshot = self.snapshot().await;
        view::group_by_brand(view::filter(&snapshot, category, query))
            .into_iter()
            .map(|(brand, records)| (brand, records.into_iter().cloned().collect()))
            .collect()
    }

    pub async fn categories(&self) -> Vec<String> {
        view::categories(&self.snapshot().await)
    }

    pub async fn login(&self, password: &str) -> Result<(), AuthError> {
        let result = self.session.write().await.login(password);
        match result {
            Ok(()) => info!("operator logged in"),
            Err(err) => warn!(%err, "operator login rejected"),
        }
        result
    }

    pub async fn toggle_operator_mode(&self) -> Result<bool, AuthError> {
        self.session.write().await.toggle()
    }

    pub async fn logout(&self) {
        self.session.write().await.logout();
    }

    pub async fn is_operator(&self) -> bool {
        self.session.read().await.is_operator()
    }

    async fn require_operator(&self) -> Result<(), StoreError> {
        self.session.read().await.require_operator()?;
        Ok(())
    }

    pub async fn add_product(&self, product: ProductDraft) -> Result<WriteOutcome, StoreError> {
        self.require_operator().await?;
        Ok(self.sheet.add_product(product).await?)
    }

    pub async fn edit_product(
        &self,
        nomor: u32,
        product: ProductDraft,
    ) -> Result<WriteOutcome, StoreError> {
        self.require_operator().await?;
        Ok(self.sheet.edit_product(nomor, product).await?)
    }

    pub async fn delete_product(&self, nomor: u32) -> Result<WriteOutcome, StoreError> {
        self.require_operator().await?;
        Ok(self.sheet.delete_product(nomor).await?)
    }

    /// Record a sale of `qty` units, clamped to what the snapshot has in
    /// stock (at least one).
    pub async fn record_sale(&self, nomor: u32, qty: u32) -> Result<WriteOutcome, StoreError> {
        self.require_operator().await?;
        let record = self
            .find(nomor)
            .await
            .ok_or(StoreError::UnknownProduct(nomor))?;

        let qty = clamp_sale_qty(qty, record.stock);
        Ok(self.sheet.record_sale(&record, qty).await?)
    }

    /// Note a customer request. Open to every visitor.
    pub async fn log_request(&self, item_name: &str, note: &str) -> Result<WriteOutcome, StoreError> {
        Ok(self.sheet.log_request(item_name, note).await?)
    }

    /// Ask the assistant and record both sides in the transcript. Blank input
    /// is ignored and returns `None`.
    pub async fn send_chat(&self, input: &str) -> Option<String> {
        if input.trim().is_empty() {
            return None;
        }

        self.chat.write().await.push(ChatMessage::user(input));

        let reply = match &self.assistant {
            Some(assistant) => assistant.ask(input, &self.snapshot().await).await,
            None => FALLBACK_REPLY.to_owned(),
        };

        self.chat
            .write()
            .await
            .push(ChatMessage::assistant(reply.clone()));
        Some(reply)
    }

    pub async fn chat_history(&self) -> Vec<ChatMessage> {
        self.chat.read().await.messages().to_vec()
    }
}

/// Sale quantity within `1..=stock`, never below one.
pub fn clamp_sale_qty(qty: u32, stock: u32) -> u32 {
    qty.clamp(1, stock.max(1))
}
