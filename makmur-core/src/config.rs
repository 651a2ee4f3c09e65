use std::fmt;
use std::time::Duration;

use makmur_utils::env::{env_trimmed, env_u64};

/// Published Apps Script endpoint of the shop's stock sheet.
pub const DEFAULT_SHEET_URL: &str = "https://script.google.com/macros/s/AKfycbyAFLNLQ1TQPzFet_AX3POuw89jtt66QStx2uEKUYjw89KwQngGswS990dpJTeeE6eN/exec";

/// Session configuration, passed explicitly into [`crate::Storefront`].
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub sheet_url: String,
    /// `None` keeps the HTTP client's default.
    pub sheet_timeout: Option<Duration>,
    /// `None` disables operator mode entirely.
    pub admin_password: Option<String>,
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("StoreConfig")
            .field("sheet_url", &self.sheet_url)
            .field("sheet_timeout", &self.sheet_timeout)
            .field(
                "admin_password",
                &self.admin_password.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            sheet_url: DEFAULT_SHEET_URL.to_owned(),
            sheet_timeout: None,
            admin_password: None,
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Self {
        let sheet_url = env_trimmed("SHEET_URL").unwrap_or_else(|| DEFAULT_SHEET_URL.to_owned());
        let sheet_timeout = match env_u64("SHEET_TIMEOUT_SECONDS", 0) {
            0 => None,
            seconds => Some(Duration::from_secs(seconds)),
        };

        Self {
            sheet_url,
            sheet_timeout,
            admin_password: env_trimmed("ADMIN_PASSWORD"),
        }
    }

    pub fn operator_mode_available(&self) -> bool {
        self.admin_password.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_SHEET_URL, StoreConfig};

    #[test]
    fn defaults_point_at_published_sheet() {
        let config = StoreConfig::default();
        assert_eq!(config.sheet_url, DEFAULT_SHEET_URL);
        assert_eq!(config.sheet_timeout, None);
        assert!(!config.operator_mode_available());
    }

    #[test]
    fn debug_output_redacts_password() {
        let config = StoreConfig {
            admin_password: Some("admin123".to_owned()),
            ..StoreConfig::default()
        };

        let rendered = format!("{config:?}");
        assert!(!rendered.contains("admin123"));
        assert!(rendered.contains("<redacted>"));
        assert!(config.operator_mode_available());
    }
}
