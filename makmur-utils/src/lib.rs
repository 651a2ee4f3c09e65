/// Environment variable helpers shared by the config loaders.
pub mod env;
/// Shared formatting helpers (brand keys, stock labels, ring labels).
pub mod formatting;
/// Pure parser helpers for loosely typed spreadsheet cells.
pub mod parse;
/// Shared time helpers.
pub mod time;
