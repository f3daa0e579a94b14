use alloc::rc::Rc;
use core::fmt;

use crate::Exception;
use crate::convert::Converter;
use crate::value::{ObjectRef, Value};

/// Reads an accessor member.
///
/// Receives the object the read started from, and the running [`Converter`]
/// when the read happens while that converter captures members. Passing it on
/// to [`convert`](crate::convert()) keeps nested conversions in the same call.
pub type Getter = Rc<dyn Fn(&ObjectRef, Option<&mut Converter>) -> Result<Value, Exception>>;

/// Writes an accessor member. Receives the object the write started from.
pub type Setter = Rc<dyn Fn(&ObjectRef, Value) -> Result<(), Exception>>;

// -----------------------------------------------------------------------------
// Slot

/// Storage of a member.
#[derive(Clone)]
pub enum Slot {
    /// A directly held value.
    Data(Value),
    /// A computed member. A missing getter reads as `undefined`.
    Accessor {
        get: Option<Getter>,
        set: Option<Setter>,
    },
}

// -----------------------------------------------------------------------------
// Property

/// An own member of an [`Object`](crate::value::Object).
///
/// Only enumerable members are written by JSON encoders, the rest stay
/// readable through [`ObjectRef::get`].
#[derive(Clone)]
pub struct Property {
    slot: Slot,
    enumerable: bool,
}

impl Property {
    /// Creates a data member.
    #[inline]
    pub const fn data(value: Value, enumerable: bool) -> Self {
        Self {
            slot: Slot::Data(value),
            enumerable,
        }
    }

    /// Creates a non-enumerable read-only accessor, as classes declare getters.
    pub fn getter<F>(get: F) -> Self
    where
        F: Fn(&ObjectRef, Option<&mut Converter>) -> Result<Value, Exception> + 'static,
    {
        Self {
            slot: Slot::Accessor {
                get: Some(Rc::new(get)),
                set: None,
            },
            enumerable: false,
        }
    }

    /// Creates a non-enumerable accessor from optional halves.
    #[inline]
    pub const fn accessor(get: Option<Getter>, set: Option<Setter>) -> Self {
        Self {
            slot: Slot::Accessor { get, set },
            enumerable: false,
        }
    }

    /// Returns the member with its enumerability replaced.
    #[inline]
    pub fn with_enumerable(mut self, enumerable: bool) -> Self {
        self.enumerable = enumerable;
        self
    }

    #[inline]
    pub const fn is_enumerable(&self) -> bool {
        self.enumerable
    }

    #[inline]
    pub const fn is_accessor(&self) -> bool {
        matches!(self.slot, Slot::Accessor { .. })
    }

    #[inline]
    pub const fn slot(&self) -> &Slot {
        &self.slot
    }

    /// Returns the held value of a data member, without running any code.
    #[inline]
    pub const fn data_value(&self) -> Option<&Value> {
        match &self.slot {
            Slot::Data(value) => Some(value),
            Slot::Accessor { .. } => None,
        }
    }

    /// Reads the member on behalf of `receiver`.
    ///
    /// `receiver` is the object the lookup started from, which differs from
    /// the owner when the member is inherited.
    pub fn read(&self, receiver: &ObjectRef) -> Result<Value, Exception> {
        self.read_in(receiver, None)
    }

    /// Reads the member on behalf of `receiver` during a conversion.
    ///
    /// A getter receives `cx`, so what it converts shares identity and cycle
    /// state with the conversion that reads it.
    pub fn read_with(&self, receiver: &ObjectRef, cx: &mut Converter) -> Result<Value, Exception> {
        self.read_in(receiver, Some(cx))
    }

    fn read_in(
        &self,
        receiver: &ObjectRef,
        cx: Option<&mut Converter>,
    ) -> Result<Value, Exception> {
        match &self.slot {
            Slot::Data(value) => Ok(value.clone()),
            Slot::Accessor { get: Some(get), .. } => get(receiver, cx),
            Slot::Accessor { get: None, .. } => Ok(Value::Undefined),
        }
    }

    pub(crate) fn set_data(&mut self, value: Value) {
        self.slot = Slot::Data(value);
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            Slot::Data(value) => write!(f, "{value:?}")?,
            Slot::Accessor { get, set } => {
                f.write_str("[")?;
                match (get.is_some(), set.is_some()) {
                    (true, true) => f.write_str("Getter/Setter")?,
                    (true, false) => f.write_str("Getter")?,
                    (false, true) => f.write_str("Setter")?,
                    (false, false) => f.write_str("Accessor")?,
                }
                f.write_str("]")?;
            }
        }
        if !self.enumerable {
            f.write_str(" (hidden)")?;
        }
        Ok(())
    }
}
