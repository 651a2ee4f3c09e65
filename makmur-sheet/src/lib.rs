pub mod actions;
pub mod client;
pub mod decoder;
pub mod error;
pub mod model;
pub mod transport;

pub use actions::SheetAction;
pub use client::{SheetClient, WriteOutcome};
pub use error::SyncError;
pub use model::product::{InventoryRecord, ProductDraft};
pub use transport::{ReqwestSheetTransport, SheetTransport};
