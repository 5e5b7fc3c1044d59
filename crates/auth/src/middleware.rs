//! Accounts middleware
//!
//! Every controller route runs behind [`accounts_middleware`]: it reads the
//! caller's [`Accounts`] from the headers, stores them in the request
//! extensions and reports the handled request. Request tracing and the CORS
//! header are tower-http layers, built here and applied by
//! [`router`](crate::router).

use std::{
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode},
    middleware::Next,
    response::Response,
};
use kitbag_common::{telemetry::request_id, Config};
use kitbag_http::{error_response, ApiError};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::Span;

use crate::accounts::Accounts;

/// A request that went through [`accounts_middleware`]
#[derive(Debug, Clone)]
pub struct HandledRequest {
    pub method: Method,
    pub path: String,
    pub status: StatusCode,
    pub started: Instant,
    pub elapsed: Duration,
}

type HandledHook = Arc<dyn Fn(&HandledRequest) + Send + Sync>;

/// State of [`accounts_middleware`], plus the CORS origin of the router
#[derive(Clone)]
pub struct AccountsMiddleware {
    allow_origin: HeaderValue,
    on_handled: Option<HandledHook>,
}

impl Default for AccountsMiddleware {
    fn default() -> Self {
        Self {
            allow_origin: HeaderValue::from_static("*"),
            on_handled: None,
        }
    }
}

impl AccountsMiddleware {
    pub fn from_config(config: &Config) -> kitbag_common::Result<Self> {
        let allow_origin = HeaderValue::from_str(&config.allow_origin).map_err(|e| {
            kitbag_common::Error::Config(format!(
                "Invalid CORS_ALLOW_ORIGIN '{}': {}",
                config.allow_origin, e
            ))
        })?;
        Ok(Self {
            allow_origin,
            on_handled: None,
        })
    }

    pub fn with_allow_origin(mut self, allow_origin: HeaderValue) -> Self {
        self.allow_origin = allow_origin;
        self
    }

    /// Call `hook` once for every handled request, after the response is built
    pub fn on_handled<F>(mut self, hook: F) -> Self
    where
        F: Fn(&HandledRequest) + Send + Sync + 'static,
    {
        self.on_handled = Some(Arc::new(hook));
        self
    }

    pub fn allow_origin(&self) -> &HeaderValue {
        &self.allow_origin
    }

    /// CORS layer answering with the configured `Access-Control-Allow-Origin`
    pub fn cors_layer(&self) -> CorsLayer {
        let origin = if self.allow_origin == "*" {
            AllowOrigin::any()
        } else {
            AllowOrigin::exact(self.allow_origin.clone())
        };
        CorsLayer::new().allow_origin(origin)
    }
}

impl fmt::Debug for AccountsMiddleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountsMiddleware")
            .field("allow_origin", &self.allow_origin)
            .field("on_handled", &self.on_handled.is_some())
            .finish()
    }
}

/// Resolve the caller's accounts and run the handler.
///
/// Requests without valid credentials never reach the handler; they get a
/// negotiated error response instead (400 for a bad `Authorization` header,
/// 500 for a half-set impersonation).
pub async fn accounts_middleware(
    State(middleware): State<AccountsMiddleware>,
    mut request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = match Accounts::from_headers(request.headers()) {
        Ok(accounts) => {
            request.extensions_mut().insert(accounts);
            next.run(request).await
        }
        Err(err) => {
            tracing::debug!(error = %err, "Rejecting request without valid credentials");
            error_response(request.headers(), ApiError::from(err))
        }
    };

    if let Some(hook) = &middleware.on_handled {
        hook(&HandledRequest {
            method,
            path,
            status: response.status(),
            started,
            elapsed: started.elapsed(),
        });
    }

    response
}

/// `make_span_with` callback of the router's `TraceLayer`
pub(crate) fn request_span(request: &Request) -> Span {
    tracing::info_span!(
        "request",
        request_id = %request_id(),
        method = %request.method(),
        path = %request.uri().path(),
    )
}

/// `on_response` callback of the router's `TraceLayer`: level follows the status class
pub(crate) fn log_response(response: &Response, latency: Duration, _span: &Span) {
    let status = response.status().as_u16();
    let elapsed_ms = latency.as_millis() as u64;

    if response.status().is_server_error() {
        tracing::error!(status, elapsed_ms, "Request handled");
    } else if response.status().is_client_error() {
        tracing::warn!(status, elapsed_ms, "Request handled");
    } else {
        tracing::info!(status, elapsed_ms, "Request handled");
    }
}
