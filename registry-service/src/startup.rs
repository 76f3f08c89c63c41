use crate::config::{RegistryConfig, StoreBackend};
use crate::handlers;
use crate::services::{
    EnrollmentCoordinator, InMemoryStore, MongoDb, ProfileAssembler, RegistryStore,
};
use axum::{
    http::{header, HeaderValue, Method, Request},
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: RegistryConfig,
    pub store: Arc<dyn RegistryStore>,
    pub enrollment: EnrollmentCoordinator,
    pub profiles: ProfileAssembler,
}

impl AppState {
    pub fn new(config: RegistryConfig, store: Arc<dyn RegistryStore>) -> Self {
        Self {
            enrollment: EnrollmentCoordinator::new(store.clone()),
            profiles: ProfileAssembler::new(store.clone()),
            config,
            store,
        }
    }
}

/// Opens the backend named in the config. MongoDB indexes are created here.
pub async fn connect_store(config: &RegistryConfig) -> Result<Arc<dyn RegistryStore>, AppError> {
    match config.store.backend {
        StoreBackend::MongoDb => {
            let db = MongoDb::connect(&config.mongodb.uri, &config.mongodb.database)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to connect to MongoDB: {}", e);
                    e
                })?;
            db.initialize_indexes().await.map_err(|e| {
                tracing::error!("Failed to initialize database indexes: {}", e);
                e
            })?;
            Ok(Arc::new(db))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors.allowed_origins);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route(
            "/programs",
            post(handlers::create_program).get(handlers::list_programs),
        )
        .route(
            "/programs/",
            post(handlers::create_program).get(handlers::list_programs),
        )
        .route(
            "/programs/:program_id",
            get(handlers::get_program).delete(handlers::delete_program),
        )
        .route(
            "/programs/:program_id/enroll",
            post(handlers::enroll_client_in_program),
        )
        .route(
            "/clients",
            post(handlers::register_client).get(handlers::list_clients),
        )
        .route(
            "/clients/",
            post(handlers::register_client).get(handlers::list_clients),
        )
        .route("/clients/:client_id", get(handlers::get_client_profile))
        .route("/clients/:client_id/enroll", post(handlers::enroll_client))
        .route("/clients/:client_id/unenroll", post(handlers::unenroll_client))
        .route(
            "/clients/api/client-profile/:client_id",
            get(handlers::get_client_profile),
        )
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(cors)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_origin = if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed_origins.iter().filter_map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|e| tracing::error!("Invalid CORS origin '{}': {}. Skipping.", o, e))
                .ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers([header::HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

impl Application {
    pub async fn build(config: RegistryConfig) -> Result<Self, AppError> {
        let store = connect_store(&config).await?;
        let state = AppState::new(config.clone(), store);

        let app = build_router(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            store = state.store.backend_name(),
            "Registry service listening"
        );

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            state,
        })
    }

    pub fn store(&self) -> Arc<dyn RegistryStore> {
        self.state.store.clone()
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
