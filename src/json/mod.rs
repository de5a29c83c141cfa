//! # JSON Module
//!
//! In-memory JSON document model used as the response body of every handler.
//!
//! ## Overview
//!
//! - [`JsonValue`] - the document tree (null, boolean, number, string, array,
//!   object) with insertion-ordered objects
//! - **Rendering** - [`JsonValue::render`] produces the canonical tab-indented
//!   text written on the wire
//! - **Traversal** - [`JsonValue::accept`] drives a [`JsonVisitor`];
//!   [`JsonValidator`] checks array homogeneity
//! - **Transforms** - [`JsonValue::filter`] prunes, [`JsonValue::map`]
//!   rewrites leaves
//! - **Conversion** - [`to_json_value`] turns any `Serialize` type into a tree
//!
//! ## Example
//!
//! ```rust
//! use getjson::json::JsonValue;
//!
//! let value = JsonValue::object([
//!     ("name", JsonValue::from("Alice")),
//!     ("scores", JsonValue::array([3, 1, 4])),
//! ]);
//! let high = value.filter(|v| v.as_number().is_some_and(|n| n.as_f64() > 2.0));
//! assert_eq!(high.render(0), "{\n\t\"scores\":[\n\t\t3,\n\t\t4\n\t]\n}");
//! assert!(value.is_valid());
//! ```

mod convert;
mod render;
mod transform;
mod value;
mod visitor;

pub use convert::to_json_value;
pub use value::{JsonKind, JsonMap, JsonNumber, JsonValue};
pub use visitor::{JsonValidator, JsonVisitor};
