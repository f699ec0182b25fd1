mod api;
mod clip;
mod config;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clip_relay=debug,tower_http=debug".into()),
        )
        .init();

    let config = config::Config::from_env()?;

    api::serve(config).await
}
