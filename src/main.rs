use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zns_leads_api::config::{Config, Environment};
use zns_leads_api::db::Database;
use zns_leads_api::db_storage::LeadStorage;
use zns_leads_api::handlers::AppState;
use zns_leads_api::server::build_router;
use zns_leads_api::webhook_client::WebhookClient;

fn default_log_filter(environment: Option<Environment>) -> &'static str {
    match environment {
        Some(Environment::Production) => "zns_leads_api=info,tower_http=info",
        Some(Environment::Test) => "zns_leads_api=warn",
        _ => "zns_leads_api=debug,tower_http=debug",
    }
}

/// Main entry point for the application.
///
/// This function initializes the application, including:
/// - Logging and tracing.
/// - Configuration loading.
/// - Database connection and migrations.
/// - Webhook client.
/// - HTTP routes and middleware (CORS, rate limiting, auth, request logging).
///
/// It then starts the Axum server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    let environment = std::env::var("APP_ENV")
        .or_else(|_| std::env::var("NODE_ENV"))
        .ok()
        .and_then(|v| v.parse::<Environment>().ok());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_log_filter(environment).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    // Initialize database connection pool
    let db = Database::new(&config.database_url).await?;
    tracing::info!("Database connection pool established");

    db.migrate(config.direct_url.as_deref()).await?;

    let webhooks = WebhookClient::from_config(&config)?;

    let port = config.port;
    let app_state = Arc::new(AppState {
        storage: LeadStorage::new(db.pool.clone()),
        config,
        webhooks,
    });

    // Configure rate limiter: 10 requests/second per IP, burst of 20
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?,
    );

    // Health check and docs bypass rate limiting
    let app = build_router(app_state, |lead_routes| {
        lead_routes.layer(GovernorLayer {
            config: governor_conf,
        })
    });

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
