//! Structural `filter` and `map` over [`JsonValue`] trees.
//!
//! The two policies are deliberately asymmetric:
//!
//! - `filter` tests scalars with the predicate and recurses into containers,
//!   dropping a nested container whose filtered result is empty.
//! - `map` always recurses into containers and only ever hands scalars to the
//!   transform, so the output has exactly the shape of the input.
//!
//! The `try_` variants thread a caller error type through the walk and stop
//! at the first failure.

use super::value::{JsonMap, JsonValue};
use std::convert::Infallible;

impl JsonValue {
    /// Keep the scalars accepted by `predicate`, pruning containers that
    /// end up empty. A scalar receiver is returned unchanged.
    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> JsonValue
    where
        P: FnMut(&JsonValue) -> bool,
    {
        into_ok(self.try_filter(|v| Ok::<_, Infallible>(predicate(v))))
    }

    /// Fallible form of [`filter`](JsonValue::filter).
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `predicate`.
    pub fn try_filter<P, E>(&self, mut predicate: P) -> Result<JsonValue, E>
    where
        P: FnMut(&JsonValue) -> Result<bool, E>,
    {
        match self {
            JsonValue::Array(_) | JsonValue::Object(_) => filter_container(self, &mut predicate),
            scalar => Ok(scalar.clone()),
        }
    }

    /// Replace every scalar leaf with `transform(leaf)`, keeping every
    /// array and object in place.
    #[must_use]
    pub fn map<F>(&self, mut transform: F) -> JsonValue
    where
        F: FnMut(&JsonValue) -> JsonValue,
    {
        into_ok(self.try_map(|v| Ok::<_, Infallible>(transform(v))))
    }

    /// Fallible form of [`map`](JsonValue::map).
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `transform`.
    pub fn try_map<F, E>(&self, mut transform: F) -> Result<JsonValue, E>
    where
        F: FnMut(&JsonValue) -> Result<JsonValue, E>,
    {
        map_value(self, &mut transform)
    }
}

fn into_ok(result: Result<JsonValue, Infallible>) -> JsonValue {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Decide whether one child survives its parent's filter step.
fn retain<P, E>(child: &JsonValue, predicate: &mut P) -> Result<Option<JsonValue>, E>
where
    P: FnMut(&JsonValue) -> Result<bool, E>,
{
    if child.is_container() {
        let filtered = filter_container(child, predicate)?;
        Ok((!filtered.is_empty()).then_some(filtered))
    } else if predicate(child)? {
        Ok(Some(child.clone()))
    } else {
        Ok(None)
    }
}

fn filter_container<P, E>(value: &JsonValue, predicate: &mut P) -> Result<JsonValue, E>
where
    P: FnMut(&JsonValue) -> Result<bool, E>,
{
    match value {
        JsonValue::Array(items) => {
            let mut kept = Vec::with_capacity(items.len());
            for item in items {
                if let Some(item) = retain(item, predicate)? {
                    kept.push(item);
                }
            }
            Ok(JsonValue::Array(kept))
        }
        JsonValue::Object(fields) => {
            let mut kept = JsonMap::with_capacity(fields.len());
            for (key, item) in fields.iter() {
                if let Some(item) = retain(item, predicate)? {
                    kept.insert(key, item);
                }
            }
            Ok(JsonValue::Object(kept))
        }
        scalar => Ok(scalar.clone()),
    }
}

fn map_value<F, E>(value: &JsonValue, transform: &mut F) -> Result<JsonValue, E>
where
    F: FnMut(&JsonValue) -> Result<JsonValue, E>,
{
    match value {
        JsonValue::Array(items) => {
            let mut mapped = Vec::with_capacity(items.len());
            for item in items {
                mapped.push(map_value(item, transform)?);
            }
            Ok(JsonValue::Array(mapped))
        }
        JsonValue::Object(fields) => {
            let mut mapped = JsonMap::with_capacity(fields.len());
            for (key, item) in fields.iter() {
                mapped.insert(key, map_value(item, transform)?);
            }
            Ok(JsonValue::Object(mapped))
        }
        JsonValue::Null | JsonValue::Bool(_) | JsonValue::Number(_) | JsonValue::String(_) => {
            transform(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::JsonNumber;

    fn number_above_one(v: &JsonValue) -> bool {
        v.as_number().is_some_and(|n| n.as_f64() > 1.0)
    }

    #[test]
    fn test_filter_array_keeps_matching_scalars_and_nested_arrays() {
        let json = JsonValue::Array(vec![
            JsonValue::from(1),
            JsonValue::from("hello"),
            JsonValue::from(4),
            JsonValue::array([5, 3]),
        ]);
        let result = json.filter(|v| matches!(v, JsonValue::Number(_)));
        assert_eq!(
            result,
            JsonValue::Array(vec![
                JsonValue::from(1),
                JsonValue::from(4),
                JsonValue::array([5, 3]),
            ])
        );
    }

    #[test]
    fn test_filter_object_prunes_emptied_containers() {
        let obj = JsonValue::object([
            ("name", JsonValue::from("Alice")),
            ("age", JsonValue::from(30)),
            ("location", JsonValue::from("aqui")),
            ("codigo-postal", JsonValue::Null),
            ("outro", JsonValue::Bool(true)),
            (
                "b",
                JsonValue::Array(vec![
                    JsonValue::from(1),
                    JsonValue::object([("algo", JsonValue::array([11]))]),
                    JsonValue::from(2),
                    JsonValue::object([("nada", JsonValue::array([0]))]),
                ]),
            ),
        ]);
        let result = obj.filter(number_above_one);
        let expected = JsonValue::object([
            ("age", JsonValue::from(30)),
            (
                "b",
                JsonValue::Array(vec![
                    JsonValue::object([("algo", JsonValue::array([11]))]),
                    JsonValue::from(2),
                ]),
            ),
        ]);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_filter_on_scalar_is_identity() {
        let value = JsonValue::from("x");
        assert_eq!(value.filter(|_| false), value);
    }

    #[test]
    fn test_filter_drops_originally_empty_children() {
        let value = JsonValue::Array(vec![JsonValue::Array(vec![]), JsonValue::from(1)]);
        assert_eq!(value.filter(|_| true), JsonValue::array([1]));
    }

    #[test]
    fn test_map_doubles_numbers_and_keeps_shape() {
        let json = JsonValue::Array(vec![
            JsonValue::from(1),
            JsonValue::object([("algo", JsonValue::array([11]))]),
            JsonValue::from(2),
        ]);
        let result = json.map(|v| match v.as_number() {
            Some(JsonNumber::Int(n)) => JsonValue::from(n * 2),
            _ => v.clone(),
        });
        assert_eq!(
            result,
            JsonValue::Array(vec![
                JsonValue::from(2),
                JsonValue::object([("algo", JsonValue::array([22]))]),
                JsonValue::from(4),
            ])
        );
    }

    #[test]
    fn test_map_never_sees_containers() {
        let json = JsonValue::object([("a", JsonValue::Array(vec![]))]);
        let result = json.map(|_| JsonValue::Null);
        assert_eq!(result, json);
    }

    #[test]
    fn test_try_filter_stops_on_first_error() {
        let json = JsonValue::array([1, 2, 3]);
        let mut seen = 0;
        let result: Result<JsonValue, String> = json.try_filter(|v| {
            seen += 1;
            if v == &JsonValue::from(2) {
                Err("boom".to_string())
            } else {
                Ok(true)
            }
        });
        assert_eq!(result, Err("boom".to_string()));
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_try_map_propagates_error() {
        let json = JsonValue::object([("a", JsonValue::from("x"))]);
        let result: Result<JsonValue, &str> = json.try_map(|_| Err("bad leaf"));
        assert_eq!(result, Err("bad leaf"));
    }
}
