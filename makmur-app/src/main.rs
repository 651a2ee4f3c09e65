use anyhow::Context as _;
use tracing::{error, info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;

use makmur_core::view::ALL_CATEGORIES;
use makmur_core::{StoreConfig, Storefront};
use makmur_llm::{AssistantService, extract_search_hints, strip_search_hints};
use makmur_utils::env::env_trimmed;
use makmur_utils::formatting::{ring_label, stock_label};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let target = metadata.target();

        let within_info_level = *metadata.level() <= tracing::Level::INFO;
        if !within_info_level {
            return false;
        }

        !(target.starts_with("hyper") || target.starts_with("reqwest"))
    }));

    tracing_subscriber::registry().with(fmt_layer).init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    let config = StoreConfig::from_env();
    let assistant = AssistantService::from_env_optional()?;
    if let Some(service) = &assistant {
        info!(provider = service.label(), "Assistant provider selected.");
    }

    let store = Storefront::from_config(config, assistant)
        .context("failed to initialize sheet client")?;

    info!(sheet_url = %store.config().sheet_url, "Sheet endpoint configured.");
    if store.config().operator_mode_available() {
        info!("Operator mode available.");
    } else {
        info!("Operator mode disabled (set ADMIN_PASSWORD to enable).");
    }
    if store.assistant_enabled() {
        info!("Assistant enabled.");
    } else {
        info!(
            "Assistant disabled (missing GEMINI_API_KEY / OLLAMA_* vars or ASSISTANT_ENABLED=false)."
        );
    }

    if let Err(err) = store.reload().await {
        error!(%err, "Initial inventory sync failed.");
        return Err(err.into());
    }

    let category = env_trimmed("STOCK_CATEGORY").unwrap_or_else(|| ALL_CATEGORIES.to_owned());
    let query = env_trimmed("STOCK_QUERY").unwrap_or_default();

    let groups = store.grouped(&category, &query).await;
    if groups.is_empty() {
        warn!(%category, %query, "No products match the current filter.");
    }

    for (brand, records) in &groups {
        info!(brand = %brand, products = records.len(), "Brand");
        for record in records {
            info!(
                nomor = record.nomor,
                code = %record.code,
                size = %record.size,
                ring = %ring_label(&record.ring),
                stock = %stock_label(record.stock),
                "  product"
            );
        }
    }

    if let Some(question) = env_trimmed("ASSISTANT_QUESTION") {
        if let Some(reply) = store.send_chat(&question).await {
            let hints = extract_search_hints(&reply);
            let reply = strip_search_hints(&reply);
            info!(%question, %reply, ?hints, "Assistant reply.");
        }
    }

    Ok(())
}
