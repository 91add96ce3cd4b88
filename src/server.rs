//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, mail and media backends, and the
//! Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::mail::{LogMailer, Mailer, SmtpMailer};
use crate::infrastructure::media::{CloudinaryStore, DisabledMediaStore, MediaStore};
use crate::infrastructure::persistence::{
    PgListingRepository, PgMessageRepository, PgSellerRepository, PgUserRepository,
};
use crate::routes::app_router;
use crate::state::{AppState, AuthSettings, Repositories};
use crate::utils::jwt::JwtKeys;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - SMTP mailer (or a logging mailer)
/// - Cloudinary media store (or uploads disabled)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The SMTP or Cloudinary client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let mailer = build_mailer(&config)?;
    let media = build_media_store(&config)?;

    let pool = Arc::new(pool);
    let repos = Repositories {
        users: Arc::new(PgUserRepository::new(pool.clone())),
        sellers: Arc::new(PgSellerRepository::new(pool.clone())),
        listings: Arc::new(PgListingRepository::new(pool.clone())),
        messages: Arc::new(PgMessageRepository::new(pool)),
    };

    let settings = AuthSettings {
        jwt: JwtKeys::new(
            &config.jwt_secret,
            chrono::Duration::hours(config.jwt_expiration_hours),
        ),
        bcrypt_cost: config.bcrypt_cost,
        public_url: config.public_url.clone(),
    };

    let state = AppState::new(repos, mailer, media, settings);

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn connect(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

fn build_mailer(config: &Config) -> Result<Arc<dyn Mailer>> {
    match &config.smtp {
        Some(smtp) => {
            let mailer = SmtpMailer::new(smtp).context("Failed to build SMTP transport")?;
            tracing::info!(host = %smtp.host, port = smtp.port, "Mail enabled (SMTP)");
            Ok(Arc::new(mailer))
        }
        None => {
            tracing::warn!("SMTP_HOST not set; emails will be logged instead of sent");
            Ok(Arc::new(LogMailer::new()))
        }
    }
}

fn build_media_store(config: &Config) -> Result<Arc<dyn MediaStore>> {
    match &config.cloudinary {
        Some(cloudinary) => {
            let store =
                CloudinaryStore::new(cloudinary).context("Failed to build Cloudinary client")?;
            tracing::info!(cloud = %cloudinary.cloud_name, "Media uploads enabled (Cloudinary)");
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("Cloudinary credentials not set; image uploads are disabled");
            Ok(Arc::new(DisabledMediaStore))
        }
    }
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
