use std::{fs, path::Path};

use makmur_sheet::InventoryRecord;
use makmur_utils::formatting::{ring_label, stock_label};

pub const SHOP_NAME: &str = "Karya Makmur Ban";
pub const SHOP_ADDRESS: &str = "Karya Makmur, Kec. Labuhan Maringgai, Lampung Timur";

/// Returned when the model answers with no text.
pub const BUSY_REPLY: &str = "Maaf, database sedang sibuk. Silakan coba lagi.";
/// Returned when the model cannot be reached at all.
pub const FALLBACK_REPLY: &str = "Maaf, asisten AI sedang maintenance untuk sinkronisasi cloud.";

const DEFAULT_PREAMBLE: &str = "Anda adalah \"Asisten Ahli Ban Karya Makmur\". \
Anda bertugas membantu pelanggan menemukan ban yang tepat di gudang Karya Makmur.

ATURAN:
1. Selalu ramah, profesional, dan gunakan Bahasa Indonesia.
2. Jika stok ADA, sebutkan detailnya dan tambahkan format [[SEARCH:KataKunci]] untuk memicu pencarian di UI.
3. Jika stok KOSONG, tawarkan alternatif merk atau ukuran terdekat yang ada.
4. Fokus hanya pada Ban dan Velg.";

/// Role preamble, overridable with a non-empty `SYSTEM_PROMPT.md`.
pub fn preamble() -> String {
    let prompt_file = Path::new("SYSTEM_PROMPT.md");
    match fs::read_to_string(prompt_file) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => DEFAULT_PREAMBLE.to_owned(),
    }
}

/// One line per record: brand, code, size, ring, and stock.
pub fn inventory_context(records: &[InventoryRecord]) -> String {
    records
        .iter()
        .map(|record| {
            format!(
                "- Merk: {}, Kode/Model: {}, Ukuran: {}, Ring: {}, Stok: {}",
                record.brand,
                record.code,
                record.size,
                ring_label(&record.ring),
                stock_label(record.stock)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full system instruction for one question about the current stock.
pub fn system_prompt(records: &[InventoryRecord]) -> String {
    build_system_prompt(&preamble(), records)
}

fn build_system_prompt(preamble: &str, records: &[InventoryRecord]) -> String {
    format!(
        "{}\n\nDATA GUDANG SAAT INI:\n{}\n\nLokasi Bengkel: {}, {}. Melayani ganti ban dan tambal ban darurat.",
        preamble.trim(),
        inventory_context(records),
        SHOP_NAME,
        SHOP_ADDRESS
    )
}
