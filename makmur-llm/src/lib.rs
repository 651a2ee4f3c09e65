pub mod client;
pub mod hints;
pub mod prompt;
pub mod provider;

pub use client::AssistantService;
pub use hints::{extract_search_hints, strip_search_hints};
pub use provider::{CompletionProvider, GeminiProvider, OllamaProvider};
