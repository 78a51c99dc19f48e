use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ledgerline::config::{AppConfig, Config, DatabaseConfig, LogFormat, StorageBackend};
use ledgerline::core::{Clock, SystemClock};
use ledgerline::invoices::PdfRenderer;
use ledgerline::leads::HttpSheetSource;
use ledgerline::middleware::RequestId;
use ledgerline::{AppDependencies, AppServices, Repositories};

fn init_tracing(app: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| app.default_log_filter().into());

    let registry = tracing_subscriber::registry().with(filter);
    match app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    init_tracing(&config.app);

    tracing::info!("Starting Ledgerline");
    tracing::info!(environment = %config.app.env, currency = %config.app.currency, "Configuration loaded");
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let repositories = match (&config.app.storage, &config.database) {
        (StorageBackend::MySql, Some(database)) => {
            let pool = database
                .create_pool()
                .await
                .context("Failed to create database pool")?;
            DatabaseConfig::migrate(&pool)
                .await
                .context("Failed to run migrations")?;

            tracing::info!(
                "Database pool initialized ({} connections)",
                database.max_connections
            );
            Repositories::mysql(pool)
        }
        _ => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Repositories::in_memory()
        }
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let services = AppServices::new(AppDependencies {
        repositories,
        sheet_source: Arc::new(
            HttpSheetSource::new(&config.sheet).context("Failed to build sheet client")?,
        ),
        renderer: Arc::new(PdfRenderer::new()),
        clock,
        issuer: config.issuer.clone(),
        currency: config.app.currency,
    });

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let services = services.clone();
        App::new()
            .wrap(cors)
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .configure(move |cfg| services.configure(cfg))
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await.context("Server terminated with an error")
}
