use super::exchange::HttpExchange;
use super::http_server::{HttpServer, ServerHandle};
use super::request::{parse_request, ParsedRequest};
use super::response::write_response;
use crate::dispatcher::Dispatcher;
use crate::error::RouteError;
use crate::registry::HandlerRegistry;
use http::StatusCode;
use may_minihttp::{HttpService, Request, Response};
use std::io;
use std::net::ToSocketAddrs;

/// `may_minihttp` service that hands every request to the dispatcher.
pub struct AppService<C> {
    dispatcher: Dispatcher<C>,
}

impl<C> Clone for AppService<C> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<C> AppService<C> {
    pub fn new(dispatcher: Dispatcher<C>) -> Self {
        Self { dispatcher }
    }
}

/// Parsed request plus the response the dispatcher wrote for it.
struct BufferedExchange {
    request: ParsedRequest,
    reply: Option<(StatusCode, &'static str, String)>,
}

impl HttpExchange for BufferedExchange {
    fn method(&self) -> &str {
        &self.request.method
    }

    fn path(&self) -> &str {
        &self.request.path
    }

    fn query(&self) -> Option<&str> {
        self.request.query.as_deref()
    }

    fn respond(
        &mut self,
        status: StatusCode,
        content_type: &'static str,
        body: String,
    ) -> io::Result<()> {
        self.reply = Some((status, content_type, body));
        Ok(())
    }
}

impl<C: Send + Sync + 'static> HttpService for AppService<C> {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let mut exchange = BufferedExchange {
            request: parse_request(&req),
            reply: None,
        };
        self.dispatcher.handle(&mut exchange)?;
        if let Some((status, content_type, body)) = exchange.reply {
            write_response(res, status, content_type, body);
        }
        Ok(())
    }
}

/// A controller, its route table, and the means to serve them.
///
/// ```rust,no_run
/// use getjson::demo::{registry, DemoController};
/// use getjson::server::GetJson;
///
/// # fn main() -> anyhow::Result<()> {
/// let app = GetJson::new(DemoController::default(), registry())?;
/// let handle = app.start("0.0.0.0:8080")?;
/// handle.join().ok();
/// # Ok(())
/// # }
/// ```
pub struct GetJson<C> {
    dispatcher: Dispatcher<C>,
}

impl<C: Send + Sync + 'static> GetJson<C> {
    /// Build the route table for `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError`] if a template fails to compile or a handler
    /// binds a path variable its template does not declare.
    pub fn new(controller: C, registry: HandlerRegistry<C>) -> Result<Self, RouteError> {
        Ok(Self {
            dispatcher: Dispatcher::new(controller, registry)?,
        })
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher<C> {
        &self.dispatcher
    }

    /// Bind `addr` and start serving.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid or cannot be bound.
    pub fn start<A: ToSocketAddrs>(&self, addr: A) -> io::Result<ServerHandle> {
        HttpServer(AppService::new(self.dispatcher.clone())).start(addr)
    }
}
