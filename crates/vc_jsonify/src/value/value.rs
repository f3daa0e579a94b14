use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::value::{Function, ObjectRef, Symbol};

// -----------------------------------------------------------------------------
// Value

/// Any value reachable in an object graph.
///
/// Primitives are held inline, reference types ([`Symbol`], [`Function`],
/// [`ObjectRef`]) are shared handles.
///
/// # Equality
///
/// `PartialEq` follows *SameValueZero*: numbers compare by value with
/// `NaN == NaN` and `-0 == +0`, strings by content, reference types by identity.
///
/// # Examples
///
/// ```
/// use vc_jsonify::value::{ObjectRef, Value};
///
/// assert_eq!(Value::from(1), Value::from(1.0));
/// assert_eq!(Value::from(f64::NAN), Value::from(f64::NAN));
///
/// let obj = ObjectRef::new_plain();
/// assert_eq!(Value::from(obj.clone()), Value::from(obj));
/// assert_ne!(Value::from(ObjectRef::new_plain()), Value::from(ObjectRef::new_plain()));
/// ```
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    Symbol(Symbol),
    Function(Function),
    Object(ObjectRef),
}

impl Value {
    /// Creates a new array holding `values`.
    #[inline]
    pub fn array(values: impl IntoIterator<Item = Value>) -> Self {
        Self::Object(ObjectRef::new_array(values))
    }

    #[inline]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for `undefined` and `null`.
    #[inline]
    pub const fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    #[inline]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Symbol(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Returns `true` if both values are the same reference.
    ///
    /// Always `false` for primitives. Use `==` to compare primitives.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Symbol(a), Self::Symbol(b)) => a.ptr_eq(b),
            (Self::Function(a), Self::Function(b)) => a.ptr_eq(b),
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Name of the value's type, as reported by a `typeof` check.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null | Self::Object(_) => "object",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Symbol(_) => "symbol",
            Self::Function(_) => "function",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::String(a), Self::String(b)) => a == b,
            _ => self.ptr_eq(other),
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::Number(value as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, isize, usize);

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(Rc::from(value))
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(Rc::from(value))
    }
}

impl From<Rc<str>> for Value {
    #[inline]
    fn from(value: Rc<str>) -> Self {
        Self::String(value)
    }
}

impl From<Symbol> for Value {
    #[inline]
    fn from(value: Symbol) -> Self {
        Self::Symbol(value)
    }
}

impl From<Function> for Value {
    #[inline]
    fn from(value: Function) -> Self {
        Self::Function(value)
    }
}

impl From<ObjectRef> for Value {
    #[inline]
    fn from(value: ObjectRef) -> Self {
        Self::Object(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    /// `None` becomes `null`.
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(value: Vec<Value>) -> Self {
        Self::array(value)
    }
}

// -----------------------------------------------------------------------------
// Formatting

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => f.write_str(&number_to_string(*n)),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Symbol(s) => write!(f, "{s:?}"),
            Self::Function(func) => write!(f, "{func:?}"),
            Self::Object(o) => write!(f, "{o:?}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Object(o) => fmt::Display::fmt(o, f),
            _ => fmt::Debug::fmt(self, f),
        }
    }
}

/// Renders a number the way it reads as a property key.
///
/// Integral values print without fraction, non-finite values print as
/// `NaN`, `Infinity` and `-Infinity`.
pub(crate) fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e21 {
        return alloc::format!("{n:.0}");
    }
    n.to_string()
}
