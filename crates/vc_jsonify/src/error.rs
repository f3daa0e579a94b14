use thiserror::Error;

use crate::value::{ObjectRef, Value};

/// A failure raised by code running inside the graph.
///
/// Getters, setters, functions and overrides return it, and the converter
/// hands it back to its caller as-is: the thrown [`Value`] is never wrapped.
///
/// # Examples
///
/// ```
/// use vc_jsonify::{Exception, value::Value};
///
/// let err = Exception::error("broken getter");
/// assert!(err.value().as_object().is_some_and(|o| o.is_error()));
/// assert_eq!(err.to_string(), "uncaught Error: broken getter");
///
/// let thrown = Exception::new(42);
/// assert_eq!(thrown.value(), &Value::from(42));
/// ```
#[derive(Debug, Clone, Error)]
#[error("uncaught {value}")]
pub struct Exception {
    value: Value,
}

impl Exception {
    /// Throws an arbitrary value.
    #[inline]
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Throws a new error object carrying `message`.
    #[inline]
    pub fn error(message: &str) -> Self {
        Self::new(ObjectRef::new_error(message))
    }

    /// The thrown value.
    #[inline]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    #[inline]
    pub fn into_value(self) -> Value {
        self.value
    }
}

impl From<Value> for Exception {
    #[inline]
    fn from(value: Value) -> Self {
        Self { value }
    }
}
