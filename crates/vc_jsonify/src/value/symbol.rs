use alloc::borrow::Cow;
use alloc::rc::Rc;
use core::fmt;

/// A unique value with an optional description.
///
/// Two symbols are equal only if they are clones of the same symbol,
/// descriptions play no part in equality.
///
/// # Examples
///
/// ```
/// use vc_jsonify::value::Symbol;
///
/// let a = Symbol::new("tag");
/// let b = Symbol::new("tag");
///
/// assert!(a.ptr_eq(&a.clone()));
/// assert!(!a.ptr_eq(&b));
/// ```
#[derive(Clone)]
pub struct Symbol(Rc<Option<Cow<'static, str>>>);

impl Symbol {
    /// Creates a symbol with a description.
    #[inline]
    pub fn new(description: impl Into<Cow<'static, str>>) -> Self {
        Self(Rc::new(Some(description.into())))
    }

    /// Creates a symbol without description.
    #[inline]
    pub fn anonymous() -> Self {
        Self(Rc::new(None))
    }

    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Returns `true` if both handles refer to the same symbol.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    #[inline]
    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or_default())
    }
}
