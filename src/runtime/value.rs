use std::fmt::Display;

/// Text used when the Undefined sentinel is printed.
pub const UNDEFINED_TEXT: &str = "undefined";

/// A runtime value.
///
/// `Undefined` is a unit variant, so every occurrence is the same value and
/// it never compares equal to a string, not even `"undefined"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Str(String),
    Undefined,
}

impl Value {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Str(value) => write!(f, "{}", value),
            Value::Undefined => write!(f, "{}", UNDEFINED_TEXT),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}
