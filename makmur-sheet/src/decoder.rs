//! Turns the loosely shaped rows published by the spreadsheet script into
//! [`InventoryRecord`]s.
//!
//! The script may publish a bare array of rows or an object whose first
//! property holds that array. A row is either an array (read by index) or an
//! object (read by the Nth key), so every column goes through [`RowView`].

use makmur_utils::parse::{clamp_stock, coerce_number, parse_leading_int};
use serde_json::{Map, Value};

use crate::model::product::{DEFAULT_CATEGORY, InventoryRecord};

const COL_NOMOR: usize = 0;
const COL_CATEGORY: usize = 1;
const COL_BRAND: usize = 2;
const COL_CODE: usize = 3;
const COL_SIZE: usize = 4;
const COL_RING: usize = 5;
const COL_STOCK: usize = 6;
const COL_DESCRIPTION: usize = 7;
const COL_EXPIRY_CODE: usize = 8;

const PLACEHOLDER: &str = "-";
const IMAGE_BASE_URL: &str = "https://images.unsplash.com/photo-1541899481282-d53bffe3c35d?auto=format&fit=crop&q=80&w=400&h=300";

/// Positional view over one raw row.
#[derive(Clone, Copy, Debug)]
pub enum RowView<'a> {
    Positional(&'a [Value]),
    Keyed(&'a Map<String, Value>),
    Empty,
}

impl<'a> RowView<'a> {
    pub fn new(row: &'a Value) -> Self {
        match row {
            Value::Array(items) => Self::Positional(items),
            Value::Object(map) => Self::Keyed(map),
            _ => Self::Empty,
        }
    }

    /// Raw value at `index`, or `None` when the row has no such column.
    pub fn field(&self, index: usize) -> Option<&'a Value> {
        match self {
            Self::Positional(items) => items.get(index),
            Self::Keyed(map) => map.values().nth(index),
            Self::Empty => None,
        }
    }

    /// Column as text. Missing and null cells read as an empty string.
    pub fn text(&self, index: usize) -> String {
        cell_text(self.field(index))
    }
}

/// Decode a whole response body.
pub fn decode_payload(payload: &Value) -> Vec<InventoryRecord> {
    decode_rows(extract_rows(payload))
}

/// Locate the row array inside a response body.
pub fn extract_rows(payload: &Value) -> &[Value] {
    match payload {
        Value::Array(rows) => rows,
        Value::Object(map) => match map.values().next() {
            Some(Value::Array(rows)) => rows,
            _ => &[],
        },
        _ => &[],
    }
}

/// Decode rows in order, skipping a leading header row and rows that carry
/// neither brand nor code.
pub fn decode_rows(rows: &[Value]) -> Vec<InventoryRecord> {
    let data_rows = match rows.first() {
        Some(first) if is_header(RowView::new(first)) => &rows[1..],
        _ => rows,
    };

    data_rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| decode_row(RowView::new(row), index))
        .collect()
}

/// A first row is a header when its first column is not a number. Keyed
/// rows use their first value too, whatever that key is called.
fn is_header(row: RowView<'_>) -> bool {
    cell_number(row.field(COL_NOMOR)).is_none()
}

/// Decode one row at its post-header `index`.
pub fn decode_row(row: RowView<'_>, index: usize) -> Option<InventoryRecord> {
    let brand = row.text(COL_BRAND).trim().to_owned();
    let code = row.text(COL_CODE).trim().to_owned();
    if brand.is_empty() && code.is_empty() {
        return None;
    }

    let nomor = parse_leading_int(&row.text(COL_NOMOR))
        .filter(|value| *value > 0)
        .and_then(|value| u32::try_from(value).ok())
        .unwrap_or_else(|| fallback_nomor(index));

    let category = match row.text(COL_CATEGORY).trim() {
        "" => DEFAULT_CATEGORY.to_owned(),
        value => value.to_owned(),
    };

    Some(InventoryRecord {
        id: format!("prod-{}-{}", nomor, index),
        nomor,
        category,
        brand,
        code,
        size: or_placeholder(row.text(COL_SIZE)),
        ring: or_placeholder(row.text(COL_RING)),
        stock: cell_number(row.field(COL_STOCK)).map_or(0, clamp_stock),
        description: row.text(COL_DESCRIPTION),
        expiry_code: row.text(COL_EXPIRY_CODE),
        image: image_url(nomor),
        sold_count: 0,
        price: 0,
    })
}

/// Synthetic product picture, unique per `nomor`.
pub fn image_url(nomor: u32) -> String {
    format!("{}&sig={}", IMAGE_BASE_URL, nomor)
}

fn fallback_nomor(index: usize) -> u32 {
    u32::try_from(index).map_or(u32::MAX, |value| value.saturating_add(1))
}

fn or_placeholder(value: String) -> String {
    if value.is_empty() {
        PLACEHOLDER.to_owned()
    } else {
        value
    }
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => match number.as_f64() {
            // Sheets hands integers back as floats; print `4`, not `4.0`.
            Some(float) if number.is_f64() && float.fract() == 0.0 && float.abs() < 1e15 => {
                format!("{}", float as i64)
            }
            _ => number.to_string(),
        },
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(other) => other.to_string(),
    }
}

fn cell_number(value: Option<&Value>) -> Option<f64> {
    match value {
        None => None,
        Some(Value::Null) => Some(0.0),
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => coerce_number(text),
        Some(Value::Bool(flag)) => Some(if *flag { 1.0 } else { 0.0 }),
        Some(Value::Array(_)) | Some(Value::Object(_)) => None,
    }
}
