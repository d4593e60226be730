use crate::config::NlpConfig;
use crate::handlers;
use crate::services::providers::openai::OpenAiTextProvider;
use crate::services::providers::TextProvider;
use crate::services::TextService;
use crate::ApiDoc;
use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use service_core::middleware::{
    api_key_middleware, metrics::metrics_middleware, security_headers::security_headers_middleware,
    timing::{timing_middleware, PROCESS_TIME_HEADER},
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
    RequestAuthenticator, SharedSecretAuthenticator, API_KEY_HEADER,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
pub struct AppState {
    pub config: NlpConfig,
    pub text_service: TextService,
    pub authenticator: Arc<dyn RequestAuthenticator>,
}

impl AppState {
    /// Wire the service around an arbitrary provider. Callers authenticate
    /// with the configured shared secret.
    pub fn new(config: NlpConfig, provider: Arc<dyn TextProvider>) -> Self {
        let authenticator: Arc<dyn RequestAuthenticator> = Arc::new(
            SharedSecretAuthenticator::new(config.security.api_key.clone()),
        );

        Self {
            text_service: TextService::new(provider),
            authenticator,
            config,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/classify_ticket", post(handlers::tickets::classify_ticket))
        .route("/analyze", post(handlers::text::analyze))
        .route("/summarize", post(handlers::text::summarize))
        .route("/generate", post(handlers::text::generate))
        .route_layer(from_fn_with_state(
            state.authenticator.clone(),
            api_key_middleware,
        ));

    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/.well-known/openapi.json", ApiDoc::openapi()))
        .layer(from_fn(timing_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
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
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &NlpConfig) -> CorsLayer {
    let origins = if config.security.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = config
            .security
            .allowed_origins
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::error!("Invalid CORS origin '{}': {}. Skipping.", o, e);
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(API_KEY_HEADER),
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER), PROCESS_TIME_HEADER])
}

pub struct Application {
    port: u16,
    router: Router,
}

impl Application {
    pub async fn build(config: NlpConfig) -> anyhow::Result<Self> {
        let provider = OpenAiTextProvider::new(config.openai.clone())?;
        tracing::info!(
            model = %provider.model(),
            base_url = %config.openai.base_url,
            "OpenAI provider initialized"
        );

        Self::build_with_provider(config, Arc::new(provider))
    }

    pub fn build_with_provider(
        config: NlpConfig,
        provider: Arc<dyn TextProvider>,
    ) -> anyhow::Result<Self> {
        if config.security.allows_any_origin() {
            tracing::warn!("CORS allows any origin");
        }

        let port = config.common.port;
        let router = build_router(AppState::new(config, provider));

        Ok(Self { port, router })
    }

    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        tracing::info!("Listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
