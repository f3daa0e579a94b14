use alloc::borrow::Cow;
use alloc::rc::Rc;
use core::fmt;

use crate::Exception;
use crate::value::Value;

/// Signature of a native function: receiver first, then the arguments.
pub type NativeFn = dyn Fn(&Value, &[Value]) -> Result<Value, Exception>;

/// A callable value.
///
/// Functions are reference types: clones share the same body and compare
/// equal, two functions built from identical closures do not.
///
/// # Examples
///
/// ```
/// use vc_jsonify::value::{Function, Value};
///
/// let twice = Function::new("twice", |_this, args| {
///     let n = args.first().and_then(Value::as_number).unwrap_or_default();
///     Ok(Value::from(n * 2.0))
/// });
///
/// let output = twice.call(&Value::Undefined, &[Value::from(21)]).unwrap();
/// assert_eq!(output, Value::from(42));
/// ```
#[derive(Clone)]
pub struct Function {
    name: Cow<'static, str>,
    body: Rc<NativeFn>,
}

impl Function {
    /// Creates a function from a closure.
    pub fn new<F>(name: impl Into<Cow<'static, str>>, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, Exception> + 'static,
    {
        Self {
            name: name.into(),
            body: Rc::new(body),
        }
    }

    /// Creates a function that returns its receiver.
    ///
    /// Installed as `toJSON` on converted snapshots so that encoders write the
    /// snapshot itself instead of running a hook inherited from the source.
    pub fn return_this() -> Self {
        Self::new("returnThis", |this, _| Ok(this.clone()))
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the function with `this` as receiver.
    #[inline]
    pub fn call(&self, this: &Value, args: &[Value]) -> Result<Value, Exception> {
        (self.body)(this, args)
    }

    /// Returns `true` if both handles refer to the same function body.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        core::ptr::addr_eq(Rc::as_ptr(&self.body), Rc::as_ptr(&other.body))
    }

    #[inline]
    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.body) as *const () as usize
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Function: {}]", self.name)
    }
}
