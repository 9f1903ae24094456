use anyhow::{Context, Result};
use personal_site::config::Config;
use personal_site::i18n::Translator;
use personal_site::web::{self, AppState};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("personal_site=info".parse()?),
        )
        .init();

    info!("Starting personal site");

    let config = Config::from_env()?;
    info!("✓ Configuration loaded (content API: {})", config.cms_api_url);

    let translator = Translator::load(&config.locales_dir)
        .with_context(|| format!("Failed to load translations from {}", config.locales_dir))?;
    info!("✓ Translations loaded from {}", config.locales_dir);

    let state = Arc::new(AppState::new(config, translator)?);
    web::serve(state).await
}
