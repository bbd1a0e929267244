//! HTTP surface: the viewer shell and the merged document routes.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use ring_core::OutputFormat;
use ring_engine::{Aggregator, FetchError, ReqwestFetcher};
use ring_logging::{ring_error, ring_info};
use tower::ServiceExt;

use crate::config::RingConfig;

const VIEWER_TEMPLATE: &str = include_str!("../static/index.html");

/// Read-only state shared by every request.
pub struct AppState {
    base_path: String,
    viewer_html: String,
    aggregator: Aggregator,
}

impl AppState {
    pub fn new(config: &RingConfig, aggregator: Aggregator) -> Self {
        let base_path = config.base_path().to_string();
        let spec_url = format!("{}/doc.yaml", base_path.trim_end_matches('/'));
        let viewer_html = render_viewer(
            &escape_html(&config.title),
            &escape_js_string(&spec_url),
        );
        Self {
            base_path,
            viewer_html,
            aggregator,
        }
    }

    pub fn from_config(config: &RingConfig) -> Result<Self, FetchError> {
        let fetcher = Arc::new(ReqwestFetcher::new(config.fetch_settings())?);
        let aggregator = Aggregator::new(
            fetcher,
            config.sources(),
            config.policy(),
            config.render_options(),
        );
        Ok(Self::new(config, aggregator))
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }
}

/// Routes with a plain 404 for everything else.
pub fn router(state: Arc<AppState>) -> Router {
    router_with_next(state, Router::new().fallback(not_found))
}

/// Routes that hand every request they do not serve to `next`.
pub fn router_with_next(state: Arc<AppState>, next: Router) -> Router {
    let documents = format!("{}/{{*document}}", state.base_path.trim_end_matches('/'));
    let fallthrough = next.clone();
    Router::new()
        .route(&state.base_path, get(viewer))
        .route(
            &documents,
            get(
                move |State(state): State<Arc<AppState>>,
                      Path(name): Path<String>,
                      request: Request| {
                    let next = fallthrough.clone();
                    async move { document(state, name, request, next).await }
                },
            ),
        )
        .with_state(state)
        .fallback_service(next)
}

async fn viewer(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.viewer_html.clone())
}

async fn document(state: Arc<AppState>, name: String, request: Request, next: Router) -> Response {
    let extension = name.rsplit_once('.').map(|(_, extension)| extension);
    let Some(format) = extension.and_then(OutputFormat::from_extension) else {
        return match next.oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };
    };

    ring_info!("aggregating {} sources for {}", state.aggregator.sources().len(), name);
    match state.aggregator.render(format).await {
        Ok(rendered) => (
            [(header::CONTENT_TYPE, rendered.content_type)],
            rendered.body,
        )
            .into_response(),
        Err(err) => {
            ring_error!("failed to build {}: {}", name, err);
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "not found")
}

/// Fills the viewer placeholders in one pass; substituted text is never rescanned.
fn render_viewer(title: &str, spec_url: &str) -> String {
    let mut html = String::with_capacity(VIEWER_TEMPLATE.len() + title.len() + spec_url.len());
    let mut rest = VIEWER_TEMPLATE;
    while let Some(start) = rest.find("{{") {
        html.push_str(&rest[..start]);
        let marker = &rest[start..];
        if let Some(tail) = marker.strip_prefix("{{title}}") {
            html.push_str(title);
            rest = tail;
        } else if let Some(tail) = marker.strip_prefix("{{spec_url}}") {
            html.push_str(spec_url);
            rest = tail;
        } else {
            html.push_str("{{");
            rest = &marker[2..];
        }
    }
    html.push_str(rest);
    html
}

// The document URL lands inside a single-quoted string in an inline script.
fn escape_js_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '<' => escaped.push_str("\\u003c"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Binds `listen` and serves until Ctrl-C.
pub async fn serve(state: Arc<AppState>, listen: SocketAddr) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(listen).await?;
    ring_info!(
        "serving {} on http://{}",
        state.base_path,
        listener.local_addr()?
    );
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        ring_error!("failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    ring_info!("shutting down");
}
