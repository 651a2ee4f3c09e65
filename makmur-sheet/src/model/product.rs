use serde::{Deserialize, Serialize};

/// Category assigned when a row leaves the category column blank.
pub const DEFAULT_CATEGORY: &str = "Ban";
/// Description pre-filled on a new product draft.
pub const DEFAULT_DESCRIPTION: &str = "Baru";

/// One decoded tire/rim SKU. Records are rebuilt on every sync and never
/// edited locally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub id: String,
    pub nomor: u32,
    pub category: String,
    pub brand: String,
    pub code: String,
    pub size: String,
    pub ring: String,
    pub stock: u32,
    pub description: String,
    pub expiry_code: String,
    pub image: String,
    pub sold_count: u32,
    pub price: u32,
}

/// Editable product fields sent upstream by `add_product` / `edit_product`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub category: String,
    pub brand: String,
    pub code: String,
    pub size: String,
    pub ring: String,
    pub stock: u32,
    pub description: String,
    pub expiry_code: String,
    pub image: String,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_owned(),
            brand: String::new(),
            code: String::new(),
            size: String::new(),
            ring: String::new(),
            stock: 0,
            description: DEFAULT_DESCRIPTION.to_owned(),
            expiry_code: String::new(),
            image: String::new(),
        }
    }
}

impl From<&InventoryRecord> for ProductDraft {
    fn from(record: &InventoryRecord) -> Self {
        Self {
            category: record.category.clone(),
            brand: record.brand.clone(),
            code: record.code.clone(),
            size: record.size.clone(),
            ring: record.ring.clone(),
            stock: record.stock,
            description: record.description.clone(),
            expiry_code: record.expiry_code.clone(),
            image: record.image.clone(),
        }
    }
}
