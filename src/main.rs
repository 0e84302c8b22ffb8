use faso_guide::api::{create_router, AppState};
use faso_guide::infrastructure::{build_chat_service, AppConfig};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=debug,faso_guide=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    let chatbot = build_chat_service(&config).await?;

    let indexed = chatbot.load().await?;
    info!(indexed, total = chatbot.count().await?, "Knowledge base ready");

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let app = create_router(AppState::new(chatbot, config));

    info!("API server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
