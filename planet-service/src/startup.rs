//! Application startup and lifecycle management.

use crate::config::{PlanetConfig, StoreConfig};
use crate::handlers;
use crate::services::{ApiDocs, InMemoryPlanetStore, MongoPlanetStore, PlanetStore};
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, get_service, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PlanetStore>,
    pub docs: ApiDocs,
    pub environment: String,
}

/// Build the HTTP router. `static_dir` provides `index.html` for `/` and
/// any other file not matched by an API route.
pub fn build_router(state: AppState, static_dir: &Path, max_body_bytes: usize) -> Router {
    Router::new()
        .route(
            "/",
            get_service(ServeFile::new(static_dir.join("index.html"))),
        )
        .route("/planet", post(handlers::get_planet))
        .route("/api-docs", get(handlers::api_docs))
        .route("/os", get(handlers::os_info))
        .route("/live", get(handlers::liveness))
        .route("/ready", get(handlers::readiness))
        .route("/metrics", get(handlers::metrics_endpoint))
        .fallback_service(ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Connect the configured store and bind the listener.
    pub async fn build(config: PlanetConfig) -> Result<Self, AppError> {
        let store: Arc<dyn PlanetStore> = match &config.store {
            StoreConfig::Mongodb(mongo) => Arc::new(MongoPlanetStore::connect(mongo).await?),
            StoreConfig::Memory => {
                tracing::warn!("Using in-memory planet store; data is not persisted");
                Arc::new(InMemoryPlanetStore::solar_system())
            }
        };

        Self::build_with_store(config, store).await
    }

    /// Bind the listener around an already constructed store.
    pub async fn build_with_store(
        config: PlanetConfig,
        store: Arc<dyn PlanetStore>,
    ) -> Result<Self, AppError> {
        let state = AppState {
            store,
            docs: ApiDocs::new(config.api_docs_path.clone()),
            environment: config.environment.clone(),
        };
        let router = build_router(state, &config.static_dir, config.max_body_bytes);

        // Port 0 binds a random port (tests)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            service = %config.service_name,
            environment = %config.environment,
            port,
            "Server listening"
        );

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until SIGINT/SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Service shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
