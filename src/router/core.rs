//! Router core module - hot path for request routing.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]

use crate::error::RouteError;
use regex::Regex;
use smallvec::SmallVec;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Maximum number of path/query parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the hot path.
///
/// Param names use `Arc<str>` because path-variable names come from the
/// route table built at startup; values are per-request text from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Look up a parameter by name with "last write wins" semantics.
#[inline]
#[must_use]
pub fn find_param<'a>(params: &'a ParamVec, name: &str) -> Option<&'a str> {
    params
        .iter()
        .rfind(|(k, _)| k.as_ref() == name)
        .map(|(_, v)| v.as_str())
}

/// One compiled entry of the route table.
#[derive(Debug, Clone)]
pub struct Route {
    handler_name: Arc<str>,
    full_path: String,
    matcher: Regex,
    variable_names: Vec<Arc<str>>,
}

impl Route {
    /// Name of the handler registered for this route.
    #[must_use]
    pub fn handler_name(&self) -> &str {
        &self.handler_name
    }

    /// Normalized template including the base path, e.g. `/api/path/{pathvar}`.
    #[must_use]
    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    /// Placeholder names in the order they appear in the template.
    #[must_use]
    pub fn variable_names(&self) -> &[Arc<str>] {
        &self.variable_names
    }

    /// Full match of `path` against the compiled matcher.
    fn captures(&self, path: &str) -> Option<ParamVec> {
        let caps = self.matcher.captures(path)?;
        let mut params = ParamVec::new();
        for (i, name) in self.variable_names.iter().enumerate() {
            let value = caps.get(i + 1)?;
            params.push((Arc::clone(name), value.as_str().to_string()));
        }
        Some(params)
    }
}

/// Result of successfully matching a request path to a route.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// Position of the matched route in registration order
    pub index: usize,
    /// Name of the handler that should process this request
    pub handler_name: Arc<str>,
    /// Path variables extracted from the URL (`{id}` -> `("id", "123")`)
    pub path_params: ParamVec,
}

impl RouteMatch {
    /// Get a path parameter by name.
    ///
    /// If a template repeats a placeholder name the last occurrence wins.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        find_param(&self.path_params, name)
    }
}

/// Immutable route table built once at startup.
///
/// Matching is a linear scan in registration order; the first matcher that
/// accepts the whole path wins. Two templates compiling to the same matcher
/// are not rejected, the later one is simply unreachable.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
    base_path: String,
}

impl Router {
    /// Compile `(handler_name, handler_path)` pairs below `base_path`.
    ///
    /// The full path of each route is
    /// `normalize_path("/" + base_path + "/" + handler_path)`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidPattern`] if a template does not compile.
    pub fn new<'a, I>(base_path: &str, handlers: I) -> Result<Self, RouteError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut routes = Vec::new();
        for (handler_name, handler_path) in handlers {
            let full_path = normalize_path(&format!("/{base_path}/{handler_path}"));
            let (matcher, names) =
                Self::path_to_regex(&full_path).map_err(|source| RouteError::InvalidPattern {
                    path: full_path.clone(),
                    source,
                })?;
            debug!(
                handler_name = %handler_name,
                full_path = %full_path,
                matcher = %matcher.as_str(),
                variables = ?names,
                "Compiled route"
            );
            routes.push(Route {
                handler_name: Arc::from(handler_name),
                full_path,
                matcher,
                variable_names: names.into_iter().map(Arc::from).collect(),
            });
        }

        let routes_summary: Vec<&str> = routes.iter().take(10).map(|r| r.full_path()).collect();
        info!(
            routes_count = routes.len(),
            base_path = %base_path,
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );

        Ok(Self {
            routes,
            base_path: base_path.to_string(),
        })
    }

    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Compiled routes in registration order.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Match a request path (without its query string) to a route.
    ///
    /// # Returns
    ///
    /// * `Some(RouteMatch)` - the first route whose matcher accepts the path
    /// * `None` - no route matches (results in 404)
    #[must_use]
    pub fn route(&self, path: &str) -> Option<RouteMatch> {
        debug!(path = %path, "Route match attempt");
        let match_start = Instant::now();

        let found = self
            .routes
            .iter()
            .enumerate()
            .find_map(|(index, route)| route.captures(path).map(|params| (index, route, params)));

        let match_duration = match_start.elapsed();

        if let Some((index, route, path_params)) = found {
            if match_duration > Duration::from_millis(1) {
                warn!(
                    path = %path,
                    handler_name = %route.handler_name,
                    route_pattern = %route.full_path,
                    duration_us = match_duration.as_micros(),
                    "Slow route matching detected"
                );
            } else {
                debug!(
                    path = %path,
                    handler_name = %route.handler_name,
                    route_pattern = %route.full_path,
                    path_params = ?path_params,
                    duration_us = match_duration.as_micros(),
                    "Route matched"
                );
            }
            return Some(RouteMatch {
                index,
                handler_name: Arc::clone(&route.handler_name),
                path_params,
            });
        }

        debug!(
            path = %path,
            duration_us = match_duration.as_micros(),
            "No route matched"
        );
        None
    }

    /// Convert a path template to an anchored regex and its placeholder names.
    ///
    /// Each `{name}` (word characters only) becomes `([^/]+)`; all other text
    /// is matched literally. `/users/{id}` compiles to `^/users/([^/]+)$`.
    pub(crate) fn path_to_regex(path: &str) -> Result<(Regex, Vec<String>), regex::Error> {
        let mut pattern = String::with_capacity(path.len() + 8);
        pattern.push('^');
        let mut param_names = Vec::with_capacity(path.matches('{').count());

        let mut rest = path;
        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) if is_placeholder_name(&after[..close]) => {
                    pattern.push_str(&regex::escape(&rest[..open]));
                    pattern.push_str("([^/]+)");
                    param_names.push(after[..close].to_string());
                    rest = &after[close + 1..];
                }
                _ => {
                    pattern.push_str(&regex::escape(&rest[..=open]));
                    rest = after;
                }
            }
        }
        pattern.push_str(&regex::escape(rest));
        pattern.push('$');

        Ok((Regex::new(&pattern)?, param_names))
    }
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// Collapse repeated `/` and strip one trailing `/` (the root stays `/`).
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    if out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Split a raw query string on `&` then `=`.
///
/// Pairs that do not split into exactly a key and a value are dropped. No
/// percent-decoding is applied.
#[must_use]
pub fn parse_query_params(query: Option<&str>) -> ParamVec {
    let Some(query) = query else {
        return ParamVec::new();
    };
    query
        .split('&')
        .filter_map(|pair| {
            let mut parts = pair.split('=');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(value), None) => Some((Arc::from(key), value.to_string())),
                _ => None,
            }
        })
        .collect()
}
