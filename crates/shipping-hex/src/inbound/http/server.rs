use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    serve, Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::application::install_service::InstallService;
use crate::application::quote_service::QuoteService;
use crate::errors::QuoteError;
use shipping_types::domain::package::CartItem;
use shipping_types::ports::platform::PlatformApi;
use shipping_types::ports::rate_service::RateService;
use shipping_types::ports::token_repository::StoreTokenRepository;

#[derive(Clone)]
pub struct HttpServerConfig {
    pub port: String,
}

pub struct AppState<R, P, C>
where
    R: StoreTokenRepository,
    P: PlatformApi,
    C: RateService,
{
    pub install: InstallService<R, P>,
    pub quote: QuoteService<C>,
}

pub struct HttpServer<R, P, C>
where
    R: StoreTokenRepository,
    P: PlatformApi,
    C: RateService,
{
    pub state: Arc<AppState<R, P, C>>,
    pub config: HttpServerConfig,
}

#[derive(Deserialize)]
pub struct InstallQuery {
    pub code: Option<String>,
}

#[derive(Deserialize)]
pub struct PostalEndpoint {
    pub postal_code: String,
}

#[derive(Deserialize)]
pub struct QuoteRequest {
    pub origin: PostalEndpoint,
    pub destination: PostalEndpoint,
    pub items: Vec<CartItem>,
}

impl<R, P, C> HttpServer<R, P, C>
where
    R: StoreTokenRepository,
    P: PlatformApi,
    C: RateService,
{
    pub async fn new(
        install: InstallService<R, P>,
        quote: QuoteService<C>,
        config: HttpServerConfig,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            state: Arc::new(AppState { install, quote }),
            config,
        })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http_request",
                    %request_id,
                    method = %request.method(),
                    uri
                )
            })
            .on_request(
                |request: &axum::extract::Request<_>, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        method = %request.method(),
                        uri = %request.uri(),
                        "request"
                    );
                },
            )
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        status = %response.status(),
                        latency_ms = %latency.as_millis(),
                        "response"
                    );
                },
            );

        let state = self.state.clone();
        let app = Router::new()
            .route("/", get(hello))
            .route("/nuvemshop/install", get(install::<R, P, C>))
            .route("/nuvemshop/options", post(options::<R, P, C>))
            .layer(trace_layer)
            .with_state(state);

        let addr: SocketAddr = format!("0.0.0.0:{}", self.config.port).parse()?;
        tracing::info!("starting server on {}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}

async fn hello() -> &'static str {
    "Hello World!"
}

/// Install callback: exchanges the code, registers the carrier, redirects to
/// the store's shipping settings. All failures answer 200 with the flow's
/// fixed plain-text message.
async fn install<R, P, C>(
    State(state): State<Arc<AppState<R, P, C>>>,
    Query(query): Query<InstallQuery>,
) -> Response
where
    R: StoreTokenRepository,
    P: PlatformApi,
    C: RateService,
{
    // A missing code fails the exchange like an invalid one would.
    let code = query.code.unwrap_or_default();
    match state.install.install(&code).await {
        // The platform expects a plain 302, not axum's 303 `Redirect::to`.
        Ok(redirect_url) => (
            axum::http::StatusCode::FOUND,
            [(axum::http::header::LOCATION, redirect_url)],
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "store installation failed");
            (axum::http::StatusCode::OK, e.user_message()).into_response()
        }
    }
}

/// Rates callback: called by the platform during product/cart/checkout.
async fn options<R, P, C>(
    State(state): State<Arc<AppState<R, P, C>>>,
    Json(payload): Json<QuoteRequest>,
) -> Result<Json<serde_json::Value>, QuoteError>
where
    R: StoreTokenRepository,
    P: PlatformApi,
    C: RateService,
{
    tracing::info!(
        origin = %payload.origin.postal_code,
        destination = %payload.destination.postal_code,
        items = payload.items.len(),
        "options requested"
    );

    let options = state
        .quote
        .quote(
            &payload.origin.postal_code,
            &payload.destination.postal_code,
            &payload.items,
        )
        .await?;
    Ok(Json(serde_json::json!({ "rates": options })))
}
