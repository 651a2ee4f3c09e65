/// Grouping key for a brand name ("gt radial" -> "GT RADIAL").
pub fn brand_key(brand: &str) -> String {
    brand.to_uppercase()
}

/// Stock as shown to customers: "4 Unit", or "KOSONG" when sold out.
pub fn stock_label(stock: u32) -> String {
    if stock > 0 {
        format!("{} Unit", stock)
    } else {
        "KOSONG".to_owned()
    }
}

/// Ring size with a single `R` prefix ("15" -> "R15", "r15" -> "R15").
pub fn ring_label(ring: &str) -> String {
    let value = ring.trim();
    let bare = value
        .strip_prefix('R')
        .or_else(|| value.strip_prefix('r'))
        .unwrap_or(value);
    format!("R{}", bare)
}
