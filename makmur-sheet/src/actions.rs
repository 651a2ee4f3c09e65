use serde::Serialize;

use crate::model::product::ProductDraft;

/// A write request for the spreadsheet script, serialized as
/// `{ "action": "<name>", ...fields }`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SheetAction {
    AddProduct(ProductDraft),
    EditProduct(ProductEdit),
    DeleteProduct {
        nomor: u32,
    },
    RecordSale {
        nomor: u32,
        brand: String,
        code: String,
        category: String,
        qty: u32,
        timestamp: String,
    },
    LogRequest {
        #[serde(rename = "itemName")]
        item_name: String,
        note: String,
        timestamp: String,
    },
}

/// Replacement fields for the row identified by `nomor`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductEdit {
    pub nomor: u32,
    #[serde(flatten)]
    pub product: ProductDraft,
}

impl SheetAction {
    /// Wire name of the action.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddProduct(_) => "add_product",
            Self::EditProduct(_) => "edit_product",
            Self::DeleteProduct { .. } => "delete_product",
            Self::RecordSale { .. } => "record_sale",
            Self::LogRequest { .. } => "log_request",
        }
    }

    /// Row targeted by the action, when it targets one.
    pub fn nomor(&self) -> Option<u32> {
        match self {
            Self::EditProduct(edit) => Some(edit.nomor),
            Self::DeleteProduct { nomor } | Self::RecordSale { nomor, .. } => Some(*nomor),
            Self::AddProduct(_) | Self::LogRequest { .. } => None,
        }
    }
}
