pub mod auth;
pub mod chat;
pub mod config;
pub mod state;
pub mod view;

pub use auth::{AuthError, OperatorSession};
pub use chat::{ChatLog, ChatMessage, ChatRole};
pub use config::StoreConfig;
pub use state::{StoreError, Storefront};
