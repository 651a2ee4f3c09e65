use chrono::{Local, NaiveDateTime};

/// Format a timestamp the way an Indonesian (`id-ID`) locale prints it,
/// e.g. `16/10/2026, 09.05.07`.
pub fn format_id_timestamp(at: &NaiveDateTime) -> String {
    at.format("%-d/%-m/%Y, %H.%M.%S").to_string()
}

/// Current local time in `id-ID` format.
pub fn now_id_timestamp() -> String {
    format_id_timestamp(&Local::now().naive_local())
}
