//! Controllers and routing
//!
//! A [`Controller`] groups the routes of one API resource. [`router`] mounts
//! the routes of every controller behind [`accounts_middleware`], and wraps
//! the whole router in request tracing and CORS.

use std::collections::{BTreeMap, HashSet};

use axum::{
    handler::Handler,
    http::Method,
    middleware::from_fn_with_state,
    routing::{on, MethodFilter, MethodRouter},
    Router,
};
use kitbag_common::{Error, Result};
use tower_http::trace::TraceLayer;

use crate::middleware::{accounts_middleware, log_response, request_span, AccountsMiddleware};

/// A single endpoint: path, method and handler
#[derive(Debug)]
pub struct Route {
    pub path: String,
    pub method: Method,
    handler: MethodRouter,
}

impl Route {
    /// Fails for methods axum cannot route on (extension methods) and for
    /// paths axum would reject when mounting.
    pub fn new<H, T>(path: impl Into<String>, method: Method, handler: H) -> Result<Self>
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        let path = path.into();
        validate_path(&path)?;

        let filter = MethodFilter::try_from(method.clone()).map_err(|e| {
            Error::Validation(format!("Unsupported route method {}: {}", method, e))
        })?;

        Ok(Self {
            path,
            method,
            handler: on(filter, handler),
        })
    }
}

/// Paths start with `/`; captures are `{name}` and `{*rest}`, not `:name` or `*rest`
fn validate_path(path: &str) -> Result<()> {
    if !path.starts_with('/') {
        return Err(Error::Validation(format!(
            "Route path '{}' must start with '/'",
            path
        )));
    }

    if let Some(segment) = path
        .split('/')
        .find(|segment| segment.starts_with(':') || segment.starts_with('*'))
    {
        return Err(Error::Validation(format!(
            "Route path '{}' uses unsupported capture '{}', write captures as '{{name}}' or '{{*rest}}'",
            path, segment
        )));
    }

    Ok(())
}

/// Something that serves a set of routes
pub trait Controller {
    fn routes(&self) -> Vec<Route>;
}

/// Build a router serving every route of `controllers`, each wrapped by the
/// accounts middleware.
///
/// Routes of different controllers may share a path as long as their methods
/// differ; the same path and method twice is an error.
pub fn router(controllers: &[&dyn Controller], middleware: AccountsMiddleware) -> Result<Router> {
    let mut seen = HashSet::new();
    let mut by_path: BTreeMap<String, MethodRouter> = BTreeMap::new();

    for route in controllers.iter().flat_map(|controller| controller.routes()) {
        if !seen.insert((route.path.clone(), route.method.clone())) {
            return Err(Error::Validation(format!(
                "Route {} {} is registered twice",
                route.method, route.path
            )));
        }

        tracing::debug!(method = %route.method, path = %route.path, "Mounting route");

        let handler = route
            .handler
            .layer(from_fn_with_state(middleware.clone(), accounts_middleware));

        let merged = match by_path.remove(&route.path) {
            Some(existing) => existing.merge(handler),
            None => handler,
        };
        by_path.insert(route.path, merged);
    }

    let router = by_path
        .into_iter()
        .fold(Router::new(), |router, (path, handler)| {
            router.route(&path, handler)
        });

    Ok(router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(log_response)
                .on_failure(()),
        )
        .layer(middleware.cors_layer()))
}
