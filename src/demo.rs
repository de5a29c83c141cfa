//! Demo controller served by `getjson serve`.
//!
//! | Route                          | Returns                                       |
//! |--------------------------------|-----------------------------------------------|
//! | `/api/ints`                    | `[1, 2, 3]`                                   |
//! | `/api/pair`                    | `{"first":"um","second":"dois"}`              |
//! | `/api/path/{pathvar}`          | `"<pathvar>!"`                                |
//! | `/api/args?n=<int>&text=<str>` | `{"<text>":"<text repeated n times>"}`        |
//! | `/api/filter?op=&value=`       | the demo document filtered by a comparison    |
//! | `/api/doubled`                 | the demo document with every number doubled   |
//! | `/api/validate`                | `{"valid":<bool>}` for the demo document      |
//! | `/api/course`                  | a sample record converted field by field      |
//!
//! `filter` treats malformed `op`/`value` arguments as matching nothing and
//! answers with an empty object rather than an error status.

use crate::json::{JsonMap, JsonNumber, JsonValue};
use crate::registry::{HandlerRegistry, ParamType, ParameterSpec};
use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

pub const BASE_PATH: &str = "api";

/// Shared state of the demo endpoints: one read-only document.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoController {
    document: JsonValue,
}

impl Default for DemoController {
    fn default() -> Self {
        Self::new(JsonValue::from(serde_json::json!({
            "name": "Alice",
            "age": 30,
            "location": "aqui",
            "codigo-postal": null,
            "outro": true,
            "b": [1, {"algo": [11]}, 2, {"nada": [0]}]
        })))
    }
}

impl DemoController {
    #[must_use]
    pub fn new(document: JsonValue) -> Self {
        Self { document }
    }

    #[must_use]
    pub fn document(&self) -> &JsonValue {
        &self.document
    }

    /// Apply `op`/`value` to the document, or an empty object if they do not
    /// describe a comparison.
    #[must_use]
    pub fn filtered(&self, op: &str, value: &str) -> JsonValue {
        match NumericFilter::parse(op, value) {
            Ok(filter) => self.document.filter(|v| filter.matches(v)),
            Err(err) => {
                warn!(op = %op, value = %value, error = %err, "Malformed filter arguments");
                JsonValue::Object(JsonMap::new())
            }
        }
    }

    /// The document with every number doubled and everything else untouched.
    #[must_use]
    pub fn doubled(&self) -> JsonValue {
        self.document.map(|v| match v.as_number() {
            Some(JsonNumber::Int(n)) => n
                .checked_mul(2)
                .map_or_else(|| JsonValue::from(n as f64 * 2.0), JsonValue::from),
            Some(n) => JsonValue::from(n.as_f64() * 2.0),
            None => v.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pair<A, B> {
    pub first: A,
    pub second: B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub valid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    pub name: String,
    pub credits: i32,
    pub evaluation: Vec<EvalItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvalItem {
    pub name: String,
    pub percentage: f64,
    pub mandatory: bool,
    #[serde(rename = "type")]
    pub kind: Option<EvalType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EvalType {
    Test,
    Project,
    Exam,
}

impl Course {
    /// The sample record served at `/api/course`.
    #[must_use]
    pub fn sample() -> Self {
        let item = |name: &str, percentage, mandatory, kind| EvalItem {
            name: name.to_string(),
            percentage,
            mandatory,
            kind,
        };
        Self {
            name: "PA".to_string(),
            credits: 6,
            evaluation: vec![
                item("quizzes", 0.2, false, None),
                item("project", 0.5, true, Some(EvalType::Project)),
                item("exam", 0.3, true, Some(EvalType::Exam)),
            ],
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterArgsError {
    #[error("unknown comparison operator `{0}`")]
    UnknownOperator(String),
    #[error("`{0}` is not a number")]
    InvalidValue(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
}

impl FromStr for Comparison {
    type Err = FilterArgsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gt" => Ok(Comparison::Gt),
            "ge" => Ok(Comparison::Ge),
            "lt" => Ok(Comparison::Lt),
            "le" => Ok(Comparison::Le),
            "eq" => Ok(Comparison::Eq),
            "ne" => Ok(Comparison::Ne),
            other => Err(FilterArgsError::UnknownOperator(other.to_string())),
        }
    }
}

/// Keeps numbers that compare true against a threshold; drops every other
/// leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericFilter {
    pub op: Comparison,
    pub threshold: f64,
}

impl NumericFilter {
    /// # Errors
    ///
    /// [`FilterArgsError`] if `op` is not one of `gt ge lt le eq ne` or
    /// `value` is not a finite number.
    pub fn parse(op: &str, value: &str) -> Result<Self, FilterArgsError> {
        let op = op.parse()?;
        let threshold = value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| FilterArgsError::InvalidValue(value.to_string()))?;
        Ok(Self { op, threshold })
    }

    #[must_use]
    pub fn matches(&self, value: &JsonValue) -> bool {
        let Some(n) = value.as_number().map(|n| n.as_f64()) else {
            return false;
        };
        match self.op {
            Comparison::Gt => n > self.threshold,
            Comparison::Ge => n >= self.threshold,
            Comparison::Lt => n < self.threshold,
            Comparison::Le => n <= self.threshold,
            Comparison::Eq => n == self.threshold,
            Comparison::Ne => n != self.threshold,
        }
    }
}

/// Endpoints of [`DemoController`] under [`BASE_PATH`].
#[must_use]
pub fn registry() -> HandlerRegistry<DemoController> {
    HandlerRegistry::<DemoController>::new(BASE_PATH)
        .mapping("ints", "ints", vec![], |_, _| Ok(vec![1, 2, 3]))
        .mapping("pair", "pair", vec![], |_, _| {
            Ok(Pair {
                first: "um",
                second: "dois",
            })
        })
        .mapping(
            "path",
            "path/{pathvar}",
            vec![ParameterSpec::path("pathvar", ParamType::String)],
            |_, args| Ok(format!("{}!", args.str("pathvar")?)),
        )
        .mapping(
            "args",
            "args",
            vec![
                ParameterSpec::query("n", ParamType::Int),
                ParameterSpec::query("text", ParamType::String),
            ],
            |_, args| {
                let n = usize::try_from(args.int("n")?)?;
                let text = args.str("text")?;
                let repeated = text.repeat(n);
                Ok(HashMap::from([(text, repeated)]))
            },
        )
        .mapping(
            "filter",
            "filter",
            vec![
                ParameterSpec::query("op", ParamType::String),
                ParameterSpec::query("value", ParamType::String),
            ],
            |controller, args| Ok(controller.filtered(&args.str("op")?, &args.str("value")?)),
        )
        .mapping("doubled", "doubled", vec![], |controller, _| {
            Ok(controller.doubled())
        })
        .mapping("validate", "validate", vec![], |controller, _| {
            Ok(Validation {
                valid: controller.document().is_valid(),
            })
        })
        .mapping("course", "course", vec![], |_, _| Ok(Course::sample()))
}
