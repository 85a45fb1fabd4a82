use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use marquee_api::{
    config::{Config, ProviderKind},
    routes::{create_router, AppState},
    services::providers::{omdb::OmdbProvider, tmdb::TmdbProvider, MovieProvider},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marquee_api=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    // Credentials are validated here, once; request handlers never read the
    // environment.
    let provider: Arc<dyn MovieProvider> = match config.movie_provider {
        ProviderKind::Tmdb => Arc::new(
            TmdbProvider::from_config(&config)
                .context("TMDB deployments require TMDB_API_KEY and TMDB_ACCESS_TOKEN")?,
        ),
        ProviderKind::Omdb => {
            if config.omdb_api_key.is_none() {
                tracing::warn!("OMDB_API_KEY not set - movie routes will return errors");
            }
            Arc::new(OmdbProvider::from_config(&config))
        }
    };

    tracing::info!(provider = provider.name(), "Configured movie provider");

    let app = create_router(AppState { provider });

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
