//! # Router Module
//!
//! Path matching and route resolution for the GET dispatcher.
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Compilation**: At startup, handler paths (e.g., `path/{pathvar}`) are
//!    joined to the base path, normalized, and converted into anchored regex
//!    patterns that capture each placeholder.
//!
//! 2. **Matching**: For each incoming request, the router tests the request
//!    path against all compiled patterns in registration order until one
//!    matches, returning the handler name and extracted path variables.
//!
//! ## Example
//!
//! ```rust
//! use getjson::router::Router;
//!
//! let router = Router::new("api", [("ints", "ints"), ("path", "path/{pathvar}")]).unwrap();
//! let m = router.route("/api/path/xyz").unwrap();
//! assert_eq!(&*m.handler_name, "path");
//! assert_eq!(m.get_path_param("pathvar"), Some("xyz"));
//! assert!(router.route("/api/unknown").is_none());
//! ```

mod core;
#[cfg(test)]
mod tests;

pub use core::{
    find_param, normalize_path, parse_query_params, ParamVec, Route, RouteMatch, Router,
    MAX_INLINE_PARAMS,
};
