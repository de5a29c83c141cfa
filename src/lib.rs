//! # getjson
//!
//! **getjson** serves the methods of a controller as read-only HTTP endpoints
//! whose responses are rendered from an in-memory JSON document model.
//!
//! ## Overview
//!
//! The crate has two halves that meet at the response path:
//!
//! - a JSON document model ([`json`]) with canonical text rendering,
//!   structure-preserving `filter`/`map`, a visitor-based validator, and a
//!   serde-driven converter from any `Serialize` value
//! - a GET-only router ([`router`], [`dispatcher`]) that compiles path
//!   templates into matchers, binds path and query parameters, invokes the
//!   handler, and renders its result
//!
//! ## Architecture
//!
//! - **[`json`]** - `JsonValue`, rendering, traversal, transforms, conversion
//! - **[`registry`]** - declarative handler registration (`HandlerRegistry`)
//! - **[`router`]** - path normalization, template compilation, route table
//! - **[`dispatcher`]** - the per-request state machine
//! - **[`server`]** - `may_minihttp` transport and server lifecycle
//! - **[`demo`]** - the demo controller served by the binary
//! - **[`cli`]**, **[`logging`]**, **[`runtime_config`]** - process surface
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Server as HttpServer<br/>(may_minihttp)
//!     participant Dispatcher
//!     participant Router
//!     participant Handler
//!     participant Json as json::to_json_value
//!
//!     Client->>Server: GET /api/args?n=2&text=Ha
//!     Server->>Dispatcher: HttpExchange (method, path, query)
//!     alt method != GET
//!         Dispatcher-->>Client: 405 Method Must Be GET
//!     end
//!     Dispatcher->>Router: route("/api/args")
//!     alt no matcher accepts the path
//!         Dispatcher-->>Client: 404 Endpoint Not Found
//!     end
//!     Router-->>Dispatcher: RouteMatch (handler, path variables)
//!     Dispatcher->>Dispatcher: bind + convert parameters
//!     Dispatcher->>Handler: call(controller, args)
//!     Handler->>Json: Serialize value
//!     Json-->>Dispatcher: JsonValue
//!     Dispatcher-->>Client: 200 render(0)
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use getjson::registry::{HandlerRegistry, ParamType, ParameterSpec};
//! use getjson::server::GetJson;
//!
//! struct Greeter;
//!
//! # fn main() -> anyhow::Result<()> {
//! let registry = HandlerRegistry::new("api").mapping(
//!     "hello",
//!     "hello/{name}",
//!     vec![ParameterSpec::path("name", ParamType::String)],
//!     |_: &Greeter, args| Ok(format!("hello {}", args.str("name")?)),
//! );
//! let handle = GetJson::new(Greeter, registry)?.start("127.0.0.1:8080")?;
//! handle.wait_ready()?;
//! handle.stop();
//! # Ok(())
//! # }
//! ```
//!
//! ## Runtime Considerations
//!
//! The server runs on the `may` coroutine runtime, not tokio:
//!
//! - each connection is served by a coroutine; handlers run on it directly
//! - stack size and worker count come from `GETJSON_STACK_SIZE` and
//!   `GETJSON_WORKERS` (see [`runtime_config`])
//! - the controller is shared by all requests and must be `Send + Sync`

pub mod cli;
pub mod demo;
pub mod dispatcher;
pub mod error;
pub mod ids;
pub mod json;
pub mod logging;
pub mod registry;
pub mod router;
pub mod runtime_config;
pub mod server;

pub use error::{ConvertError, DispatchError, RouteError};
pub use json::{to_json_value, JsonValue};
pub use server::GetJson;
