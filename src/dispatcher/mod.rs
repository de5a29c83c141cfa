//! # Dispatcher Module
//!
//! Runs each request through a fixed sequence of stages, any of which may
//! short-circuit to an error response:
//!
//! 1. **MethodCheck** - anything but `GET` is answered with 405
//! 2. **PathMatch** - first route in registration order whose matcher accepts
//!    the whole path; none gives 404
//! 3. **ParamBind** - path variables by name from the match, query parameters
//!    by name from the query string, each converted to its declared type
//! 4. **Invoke** - the handler runs under `catch_unwind`
//! 5. **Serialize** - the handler's value is converted to a
//!    [`JsonValue`](crate::json::JsonValue) and rendered
//! 6. **Respond** - 200 with the rendered text, or the error's status with a
//!    plain-text diagnostic
//!
//! Failures in stages 3-5 are reported as 500. No request failure stops the
//! server.
//!
//! ```rust
//! use getjson::demo::{registry, DemoController};
//! use getjson::dispatcher::Dispatcher;
//!
//! let dispatcher = Dispatcher::new(DemoController::default(), registry()).unwrap();
//! let response = dispatcher.dispatch("GET", "/api/path/xyz", None);
//! assert_eq!(response.status, 200);
//! assert_eq!(response.body, "\"xyz!\"");
//! ```

mod core;

pub use core::{bind_arguments, DispatchResponse, Dispatcher, ALLOWED_METHOD};
