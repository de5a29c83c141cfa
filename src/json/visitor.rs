//! Depth-first traversal over a [`JsonValue`] tree and the array
//! homogeneity validator built on it.

use super::value::{JsonKind, JsonMap, JsonNumber, JsonValue};

/// Per-variant hooks invoked by [`JsonValue::accept`].
///
/// Every hook defaults to a no-op so implementors only override the
/// variants they care about. Containers are reported before their children.
pub trait JsonVisitor {
    fn visit_null(&mut self) {}
    fn visit_bool(&mut self, _value: bool) {}
    fn visit_number(&mut self, _value: &JsonNumber) {}
    fn visit_string(&mut self, _value: &str) {}
    fn visit_array(&mut self, _items: &[JsonValue]) {}
    fn visit_object(&mut self, _fields: &JsonMap) {}
}

impl JsonValue {
    /// Walk the tree depth-first, calling the matching hook for every node.
    pub fn accept<V: JsonVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            JsonValue::Null => visitor.visit_null(),
            JsonValue::Bool(b) => visitor.visit_bool(*b),
            JsonValue::Number(n) => visitor.visit_number(n),
            JsonValue::String(s) => visitor.visit_string(s),
            JsonValue::Array(items) => {
                visitor.visit_array(items);
                for item in items {
                    item.accept(visitor);
                }
            }
            JsonValue::Object(fields) => {
                visitor.visit_object(fields);
                for item in fields.values() {
                    item.accept(visitor);
                }
            }
        }
    }

    /// Run a [`JsonValidator`] over this tree.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let mut validator = JsonValidator::new();
        self.accept(&mut validator);
        validator.is_valid()
    }
}

/// Checks that every array in a tree holds elements of one variant and no
/// `null`s.
///
/// Objects and scalars carry no rule of their own. Once a violation is seen
/// the result stays `false`; the traversal still descends into the rest of
/// the tree.
#[derive(Debug, Clone)]
pub struct JsonValidator {
    valid: bool,
}

impl Default for JsonValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonValidator {
    #[must_use]
    pub fn new() -> Self {
        Self { valid: true }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl JsonVisitor for JsonValidator {
    fn visit_array(&mut self, items: &[JsonValue]) {
        let mut expected: Option<JsonKind> = None;
        for item in items {
            let kind = item.kind();
            if kind == JsonKind::Null || expected.is_some_and(|k| k != kind) {
                self.valid = false;
                return;
            }
            expected = Some(kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_homogeneous_arrays() {
        let s = JsonValue::from("String");
        let obj = JsonValue::object([("Teste", s.clone())]);
        let strings = JsonValue::Array(vec![s.clone()]);

        assert!(JsonValue::array([1, 2]).is_valid());
        assert!(strings.is_valid());
        assert!(JsonValue::Array(vec![obj.clone(), obj.clone()]).is_valid());
        assert!(JsonValue::Array(vec![strings.clone(), strings.clone(), strings.clone()]).is_valid());
        assert!(JsonValue::Array(vec![]).is_valid());
    }

    #[test]
    fn test_heterogeneous_or_null_arrays() {
        let s = JsonValue::from("String");
        let obj = JsonValue::object([("Teste", s.clone())]);

        assert!(!JsonValue::Array(vec![JsonValue::from(1), JsonValue::from("x")]).is_valid());
        assert!(!JsonValue::Array(vec![JsonValue::Null]).is_valid());
        assert!(!JsonValue::Array(vec![JsonValue::Null, JsonValue::Null, JsonValue::Null]).is_valid());
        assert!(!JsonValue::Array(vec![s.clone(), obj, JsonValue::Array(vec![s])]).is_valid());
    }

    #[test]
    fn test_objects_validate_nested_arrays() {
        let ok = JsonValue::object([("Olá", JsonValue::from("Mundo"))]);
        assert!(ok.is_valid());

        let nested = JsonValue::object([
            ("Olá", JsonValue::from("Mundo")),
            ("jsonArray", JsonValue::Array(vec![JsonValue::Null; 3])),
        ]);
        assert!(!nested.is_valid());
    }

    #[test]
    fn test_failure_in_child_array_survives_valid_siblings() {
        let value = JsonValue::Array(vec![
            JsonValue::Array(vec![JsonValue::from(1), JsonValue::Bool(true)]),
            JsonValue::Array(vec![JsonValue::from(2)]),
        ]);
        assert!(!value.is_valid());
    }

    #[derive(Default)]
    struct Counter {
        containers: usize,
        leaves: usize,
    }

    impl JsonVisitor for Counter {
        fn visit_null(&mut self) {
            self.leaves += 1;
        }
        fn visit_bool(&mut self, _: bool) {
            self.leaves += 1;
        }
        fn visit_number(&mut self, _: &JsonNumber) {
            self.leaves += 1;
        }
        fn visit_string(&mut self, _: &str) {
            self.leaves += 1;
        }
        fn visit_array(&mut self, _: &[JsonValue]) {
            self.containers += 1;
        }
        fn visit_object(&mut self, _: &JsonMap) {
            self.containers += 1;
        }
    }

    #[test]
    fn test_accept_reaches_every_node() {
        let value = JsonValue::object([
            ("a", JsonValue::array([1, 2, 3])),
            ("b", JsonValue::object([("c", JsonValue::Null)])),
        ]);
        let mut counter = Counter::default();
        value.accept(&mut counter);
        assert_eq!(counter.containers, 3);
        assert_eq!(counter.leaves, 4);
    }
}
