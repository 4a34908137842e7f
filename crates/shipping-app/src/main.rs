use shipping_client::{CorreiosClient, PlatformClient};
use shipping_hex::application::install_service::InstallService;
use shipping_hex::application::quote_service::QuoteService;
use shipping_hex::config::Config;
use shipping_hex::inbound::http::{HttpServer, HttpServerConfig};
use shipping_repo::{build_repo, Repo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for credentials / DATABASE_URL / SERVER_PORT when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string()))
        .init();

    let config = Config::from_env()?;
    let repo: Repo = build_repo(config.database_url.as_deref()).await?;

    let mut platform = PlatformClient::builder(&config.app_id, &config.app_secret)?;
    if let Some(url) = &config.api_url {
        platform = platform.with_api_url(url)?;
    }
    if let Some(url) = &config.authorization_url {
        platform = platform.with_authorization_url(url)?;
    }
    let platform = platform.build()?;
    let correios = CorreiosClient::new(&config.correios_url)?;

    let install = InstallService::new(repo, platform, config.carrier_callback_url());
    let quote = QuoteService::new(correios);

    let server_cfg = HttpServerConfig {
        port: config.server_port.clone(),
    };

    let http = HttpServer::new(install, quote, server_cfg).await?;
    http.run().await
}
