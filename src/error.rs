//! Error types shared by the converter, the route table and the dispatcher.

use crate::registry::ParamType;
use http::StatusCode;
use thiserror::Error;

/// Failure to represent a value as a [`JsonValue`](crate::json::JsonValue).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// A mapping whose keys are not strings.
    #[error("unsupported map key type: {0}")]
    UnsupportedKeyType(String),

    /// A shape with no JSON counterpart (data-carrying enum variants,
    /// integers outside the 64-bit range).
    #[error("unsupported value shape: {0}")]
    UnsupportedValueShape(String),

    /// Error raised by a `Serialize` implementation itself.
    #[error("{0}")]
    Custom(String),
}

impl serde::ser::Error for ConvertError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        ConvertError::Custom(msg.to_string())
    }
}

/// Failure while building the route table at startup.
#[derive(Error, Debug)]
pub enum RouteError {
    /// The compiled matcher was rejected by the regex engine.
    #[error("invalid path template `{path}`: {source}")]
    InvalidPattern {
        path: String,
        #[source]
        source: regex::Error,
    },

    /// A path-bound parameter names a placeholder its template lacks.
    #[error("handler `{handler}` binds path variable `{name}` which its template does not declare")]
    UnboundPathVariable { handler: String, name: String },
}

/// Failure of one request. Never fatal to the server.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("method `{0}` not allowed")]
    MethodNotAllowed(String),

    #[error("no route matches `{0}`")]
    RouteNotFound(String),

    #[error("missing parameter `{0}`")]
    MissingParameter(String),

    #[error("parameter `{name}` expects {expected}, got `{value}`")]
    TypeConversion {
        name: String,
        expected: ParamType,
        value: String,
    },

    #[error("cannot convert handler result: {0}")]
    Conversion(#[from] ConvertError),

    #[error("handler failed: {0:#}")]
    Handler(anyhow::Error),

    #[error("handler panicked: {0}")]
    Panicked(String),
}

impl DispatchError {
    /// HTTP status reported for this failure.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            DispatchError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            DispatchError::MissingParameter(_)
            | DispatchError::TypeConversion { .. }
            | DispatchError::Conversion(_)
            | DispatchError::Handler(_)
            | DispatchError::Panicked(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Plain-text body written for this failure.
    #[must_use]
    pub fn body(&self) -> String {
        match self {
            DispatchError::MethodNotAllowed(_) => "Method Must Be GET".to_string(),
            DispatchError::RouteNotFound(_) => "Endpoint Not Found".to_string(),
            other => format!("Server Error: {other}"),
        }
    }
}
