//! Pure projections of the record snapshot for display.

use std::collections::BTreeMap;

use makmur_sheet::InventoryRecord;
use makmur_utils::formatting::brand_key;

/// Category filter value that matches every record.
pub const ALL_CATEGORIES: &str = "Semua";

/// Records in `category` (or any, for [`ALL_CATEGORIES`]) whose brand, code,
/// or size contains `query`, ignoring case. Input order is kept.
pub fn filter<'a>(
    records: &'a [InventoryRecord],
    category: &str,
    query: &str,
) -> Vec<&'a InventoryRecord> {
    let needle = query.to_lowercase();

    records
        .iter()
        .filter(|record| category == ALL_CATEGORIES || record.category == category)
        .filter(|record| {
            needle.is_empty()
                || record.brand.to_lowercase().contains(&needle)
                || record.code.to_lowercase().contains(&needle)
                || record.size.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Group by upper-cased brand. Keys iterate in ascending order; each group
/// keeps input order.
pub fn group_by_brand<'a, I>(records: I) -> BTreeMap<String, Vec<&'a InventoryRecord>>
where
    I: IntoIterator<Item = &'a InventoryRecord>,
{
    let mut groups: BTreeMap<String, Vec<&'a InventoryRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(brand_key(&record.brand)).or_default().push(record);
    }
    groups
}

/// [`ALL_CATEGORIES`] followed by each distinct category in first-seen order.
pub fn categories(records: &[InventoryRecord]) -> Vec<String> {
    let mut out = vec![ALL_CATEGORIES.to_owned()];
    for record in records {
        if !out.iter().any(|seen| seen == &record.category) {
            out.push(record.category.clone());
        }
    }
    out
}
