use crate::error::{DispatchError, RouteError};
use crate::ids::RequestId;
use crate::json::JsonValue;
use crate::registry::{Args, HandlerEntry, HandlerRegistry, ParamKind, ParameterSpec};
use crate::router::{find_param, parse_query_params, ParamVec, Router};
use crate::server::{HttpExchange, JSON_CONTENT_TYPE, TEXT_CONTENT_TYPE};
use http::StatusCode;
use std::any::Any;
use std::io;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// The only method served.
pub const ALLOWED_METHOD: &str = "GET";

/// Status, content type and body produced for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResponse {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: String,
}

impl DispatchResponse {
    fn ok(value: &JsonValue) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: JSON_CONTENT_TYPE,
            body: value.render(0),
        }
    }

    fn error(err: &DispatchError) -> Self {
        Self {
            status: err.status(),
            content_type: TEXT_CONTENT_TYPE,
            body: err.body(),
        }
    }
}

/// Per-request state machine over an immutable route table.
///
/// Cloning is cheap: the controller, route table and handlers are shared.
pub struct Dispatcher<C> {
    controller: Arc<C>,
    router: Arc<Router>,
    handlers: Arc<[HandlerEntry<C>]>,
}

impl<C> Clone for Dispatcher<C> {
    fn clone(&self) -> Self {
        Self {
            controller: Arc::clone(&self.controller),
            router: Arc::clone(&self.router),
            handlers: Arc::clone(&self.handlers),
        }
    }
}

impl<C> Dispatcher<C> {
    /// Build the route table for `registry` and take ownership of the
    /// controller shared by every request.
    ///
    /// # Errors
    ///
    /// [`RouteError::InvalidPattern`] if a template fails to compile,
    /// [`RouteError::UnboundPathVariable`] if a path-bound parameter has no
    /// placeholder of the same name in its template.
    pub fn new(controller: C, registry: HandlerRegistry<C>) -> Result<Self, RouteError>
    where
        C: 'static,
    {
        let (base_path, handlers) = registry.into_parts();
        let router = Router::new(
            &base_path,
            handlers.iter().map(|h| (&*h.name, h.path.as_str())),
        )?;

        for (route, handler) in router.routes().iter().zip(&handlers) {
            for spec in &handler.params {
                let declared = route
                    .variable_names()
                    .iter()
                    .any(|name| name.as_ref() == spec.name);
                if spec.kind == ParamKind::PathVariable && !declared {
                    return Err(RouteError::UnboundPathVariable {
                        handler: handler.name.to_string(),
                        name: spec.name.clone(),
                    });
                }
            }
        }

        Ok(Self {
            controller: Arc::new(controller),
            router: Arc::new(router),
            handlers: handlers.into(),
        })
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    #[must_use]
    pub fn handlers(&self) -> &[HandlerEntry<C>] {
        &self.handlers
    }

    /// Run one request through the state machine, stopping at the first
    /// failing stage.
    ///
    /// # Errors
    ///
    /// Any [`DispatchError`]; its [`status`](DispatchError::status) is the
    /// response status.
    pub fn try_dispatch(
        &self,
        method: &str,
        path: &str,
        query: Option<&str>,
    ) -> Result<JsonValue, DispatchError> {
        self.run(RequestId::new(), method, path, query)
    }

    /// Run one request and turn the outcome into a response.
    #[must_use]
    pub fn dispatch(&self, method: &str, path: &str, query: Option<&str>) -> DispatchResponse {
        let request_id = RequestId::new();
        match self.run(request_id, method, path, query) {
            Ok(value) => {
                let response = DispatchResponse::ok(&value);
                debug!(
                    request_id = %request_id,
                    status = response.status.as_u16(),
                    body_bytes = response.body.len(),
                    "Response rendered"
                );
                response
            }
            Err(err) => {
                let response = DispatchResponse::error(&err);
                if response.status.is_server_error() {
                    error!(
                        request_id = %request_id,
                        status = response.status.as_u16(),
                        error = %err,
                        "Request failed"
                    );
                } else {
                    warn!(
                        request_id = %request_id,
                        status = response.status.as_u16(),
                        error = %err,
                        "Request rejected"
                    );
                }
                response
            }
        }
    }

    /// Dispatch the request carried by `exchange` and write its response.
    ///
    /// # Errors
    ///
    /// Only transport write failures; request failures become responses.
    pub fn handle<E: HttpExchange + ?Sized>(&self, exchange: &mut E) -> io::Result<()> {
        let response = self.dispatch(exchange.method(), exchange.path(), exchange.query());
        exchange.respond(response.status, response.content_type, response.body)
    }

    fn run(
        &self,
        request_id: RequestId,
        method: &str,
        path: &str,
        query: Option<&str>,
    ) -> Result<JsonValue, DispatchError> {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            "Request received"
        );

        if method != ALLOWED_METHOD {
            return Err(DispatchError::MethodNotAllowed(method.to_string()));
        }

        let route_match = self
            .router
            .route(path)
            .ok_or_else(|| DispatchError::RouteNotFound(path.to_string()))?;
        let handler = self
            .handlers
            .get(route_match.index)
            .ok_or_else(|| DispatchError::RouteNotFound(path.to_string()))?;

        let query_params = parse_query_params(query);
        let args = bind_arguments(&handler.params, &route_match.path_params, &query_params)?;
        debug!(
            request_id = %request_id,
            handler_name = %handler.name,
            args = ?args,
            "Parameters bound"
        );

        let start = Instant::now();
        let controller = &*self.controller;
        let outcome = catch_unwind(AssertUnwindSafe(|| handler.call(controller, &args)));
        let latency = start.elapsed();

        match outcome {
            Ok(result) => {
                info!(
                    request_id = %request_id,
                    handler_name = %handler.name,
                    latency_us = latency.as_micros(),
                    success = result.is_ok(),
                    "Handler completed"
                );
                result
            }
            Err(panic) => {
                let message = panic_message(&*panic);
                error!(
                    request_id = %request_id,
                    handler_name = %handler.name,
                    panic_message = %message,
                    "Handler panicked"
                );
                Err(DispatchError::Panicked(message))
            }
        }
    }
}

/// Resolve and convert each declared parameter, in declaration order.
///
/// # Errors
///
/// [`DispatchError::MissingParameter`] when a declared parameter has no
/// value, [`DispatchError::TypeConversion`] when its text does not parse.
pub fn bind_arguments(
    params: &[ParameterSpec],
    path_params: &ParamVec,
    query_params: &ParamVec,
) -> Result<Args, DispatchError> {
    let mut args = Args::new();
    for spec in params {
        let source = match spec.kind {
            ParamKind::PathVariable => path_params,
            ParamKind::QueryParameter => query_params,
        };
        let raw = find_param(source, &spec.name)
            .ok_or_else(|| DispatchError::MissingParameter(spec.name.clone()))?;
        args.push(spec.name.clone(), spec.ty.convert(&spec.name, raw)?);
    }
    Ok(args)
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
