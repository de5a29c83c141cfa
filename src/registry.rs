//! Handler registry: the declarative description of a controller's endpoints.
//!
//! Each endpoint is registered with a subpath below the registry's base path,
//! the ordered list of parameters it binds, and a closure receiving the
//! shared controller plus the bound [`Args`]. The closure may return any
//! `Serialize` type; the registry wraps it so the dispatcher only ever sees
//! [`JsonValue`] results.
//!
//! ```rust
//! use getjson::registry::{HandlerRegistry, ParamType, ParameterSpec};
//!
//! struct Controller;
//!
//! let registry = HandlerRegistry::<Controller>::new("api")
//!     .mapping("ints", "ints", vec![], |_, _| Ok(vec![1, 2, 3]))
//!     .mapping(
//!         "path",
//!         "path/{pathvar}",
//!         vec![ParameterSpec::path("pathvar", ParamType::String)],
//!         |_, args| Ok(format!("{}!", args.str("pathvar")?)),
//!     );
//! assert_eq!(registry.entries().len(), 2);
//! ```

use crate::error::DispatchError;
use crate::json::{to_json_value, JsonValue};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Where a parameter's raw text comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// A `{name}` placeholder of the route template
    PathVariable,
    /// A `name=value` pair of the query string
    QueryParameter,
}

/// Supported bound parameter types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Int,
    String,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Int => f.write_str("Int"),
            ParamType::String => f.write_str("String"),
        }
    }
}

impl ParamType {
    /// Convert raw request text into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::TypeConversion`] when `raw` is not an integer
    /// and `self` is [`ParamType::Int`].
    pub fn convert(self, name: &str, raw: &str) -> Result<ParamValue, DispatchError> {
        match self {
            ParamType::String => Ok(ParamValue::Str(raw.to_string())),
            ParamType::Int => {
                raw.parse::<i64>()
                    .map(ParamValue::Int)
                    .map_err(|_| DispatchError::TypeConversion {
                        name: name.to_string(),
                        expected: ParamType::Int,
                        value: raw.to_string(),
                    })
            }
        }
    }
}

/// One declared handler parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    pub kind: ParamKind,
    pub ty: ParamType,
}

impl ParameterSpec {
    /// Parameter bound from the path placeholder of the same name.
    pub fn path(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::PathVariable,
            ty,
        }
    }

    /// Parameter bound from the query string.
    pub fn query(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::QueryParameter,
            ty,
        }
    }
}

impl fmt::Display for ParameterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self.kind {
            ParamKind::PathVariable => "path",
            ParamKind::QueryParameter => "query",
        };
        write!(f, "{}: {} ({source})", self.name, self.ty)
    }
}

/// A converted parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Int(i64),
    Str(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(n) => write!(f, "{n}"),
            ParamValue::Str(s) => f.write_str(s),
        }
    }
}

/// Bound arguments of one request, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    values: Vec<(String, ParamValue)>,
}

impl Args {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: ParamValue) {
        self.values.push((name.into(), value));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Integer argument `name`.
    ///
    /// # Errors
    ///
    /// [`DispatchError::MissingParameter`] if absent,
    /// [`DispatchError::TypeConversion`] if it was bound as a string.
    pub fn int(&self, name: &str) -> Result<i64, DispatchError> {
        match self.get(name) {
            Some(ParamValue::Int(n)) => Ok(*n),
            Some(ParamValue::Str(s)) => Err(DispatchError::TypeConversion {
                name: name.to_string(),
                expected: ParamType::Int,
                value: s.clone(),
            }),
            None => Err(DispatchError::MissingParameter(name.to_string())),
        }
    }

    /// String argument `name`. Integer arguments are returned as text.
    ///
    /// # Errors
    ///
    /// [`DispatchError::MissingParameter`] if absent.
    pub fn str(&self, name: &str) -> Result<String, DispatchError> {
        self.get(name)
            .map(ToString::to_string)
            .ok_or_else(|| DispatchError::MissingParameter(name.to_string()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Type-erased endpoint body: invoke and convert.
pub type HandlerFn<C> = dyn Fn(&C, &Args) -> Result<JsonValue, DispatchError> + Send + Sync;

/// One registered endpoint.
pub struct HandlerEntry<C> {
    pub name: Arc<str>,
    pub path: String,
    pub params: Vec<ParameterSpec>,
    handler: Arc<HandlerFn<C>>,
}

impl<C> HandlerEntry<C> {
    /// Run the endpoint and convert its result.
    ///
    /// # Errors
    ///
    /// Returns the handler's own failure or a conversion failure.
    pub fn call(&self, controller: &C, args: &Args) -> Result<JsonValue, DispatchError> {
        (self.handler)(controller, args)
    }
}

impl<C> Clone for HandlerEntry<C> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            path: self.path.clone(),
            params: self.params.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<C> fmt::Debug for HandlerEntry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerEntry")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Ordered set of endpoints sharing one base path and one controller type.
pub struct HandlerRegistry<C> {
    base_path: String,
    entries: Vec<HandlerEntry<C>>,
}

impl<C: 'static> HandlerRegistry<C> {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            entries: Vec::new(),
        }
    }

    /// Register an endpoint at `path` (relative to the base path).
    ///
    /// Errors returned by `handler` that wrap a [`DispatchError`] keep their
    /// variant; any other error becomes [`DispatchError::Handler`].
    #[must_use]
    pub fn mapping<T, F>(
        mut self,
        name: &str,
        path: &str,
        params: Vec<ParameterSpec>,
        handler: F,
    ) -> Self
    where
        T: Serialize + 'static,
        F: Fn(&C, &Args) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        let wrapped = move |controller: &C, args: &Args| -> Result<JsonValue, DispatchError> {
            let value = handler(controller, args).map_err(into_dispatch_error)?;
            Ok(to_json_value(&value)?)
        };
        self.entries.push(HandlerEntry {
            name: Arc::from(name),
            path: path.to_string(),
            params,
            handler: Arc::new(wrapped),
        });
        self
    }

    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    #[must_use]
    pub fn entries(&self) -> &[HandlerEntry<C>] {
        &self.entries
    }

    /// Split into base path and endpoints.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<HandlerEntry<C>>) {
        (self.base_path, self.entries)
    }
}

fn into_dispatch_error(err: anyhow::Error) -> DispatchError {
    match err.downcast::<DispatchError>() {
        Ok(dispatch) => dispatch,
        Err(other) => DispatchError::Handler(other),
    }
}
