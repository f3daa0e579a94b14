use alloc::rc::Rc;

use crate::Exception;
use crate::convert::Converter;
use crate::value::{ObjectRef, Value};

/// A custom conversion, replacing the default walk of an object.
///
/// Installed on an object or on a prototype with
/// [`ObjectRef::set_custom_serializer`] or [`ClassBuilder::custom`], and
/// inherited through delegates like any member. The converter calls it with
/// the object being converted and the running [`Converter`]. The returned
/// value is cached for the object and used as is.
///
/// An override that needs the default conversion of `this` may ask the
/// converter for it: while an override runs, the converter skips it for that
/// same object.
///
/// Closures taking `(&ObjectRef, &mut Converter)` implement this trait.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use vc_jsonify::{Converter, Exception, convert, value::{ObjectRef, Value}};
///
/// let point = ObjectRef::new_plain();
/// point.set("x", 1);
/// point.set("y", 2);
/// point.set_custom_serializer(Some(Rc::new(
///     |this: &ObjectRef, _: &mut Converter| -> Result<Value, Exception> {
///         let x = this.get("x")?;
///         let y = this.get("y")?;
///         Ok(Value::array([x, y]))
///     },
/// )));
///
/// let converted = convert(&Value::from(point), None).unwrap();
/// let pair = converted.as_object().unwrap().elements().unwrap();
/// assert_eq!(pair, [Value::from(1), Value::from(2)]);
/// ```
///
/// [`ObjectRef::set_custom_serializer`]: crate::value::ObjectRef::set_custom_serializer
/// [`ClassBuilder::custom`]: crate::ClassBuilder::custom
pub trait CustomSerializable {
    /// Produces the representation of `this`.
    fn to_serializable(&self, this: &ObjectRef, cx: &mut Converter) -> Result<Value, Exception>;
}

impl<F> CustomSerializable for F
where
    F: Fn(&ObjectRef, &mut Converter) -> Result<Value, Exception>,
{
    #[inline]
    fn to_serializable(&self, this: &ObjectRef, cx: &mut Converter) -> Result<Value, Exception> {
        self(this, cx)
    }
}

/// The override carried by every converted result: converting a result
/// again yields the result itself.
pub(super) struct ReturnSelf;

impl ReturnSelf {
    pub(super) fn shared() -> Rc<dyn CustomSerializable> {
        std::thread_local! {
            static RETURN_SELF: Rc<dyn CustomSerializable> = Rc::new(ReturnSelf);
        }
        RETURN_SELF.with(Rc::clone)
    }
}

impl CustomSerializable for ReturnSelf {
    #[inline]
    fn to_serializable(&self, this: &ObjectRef, _: &mut Converter) -> Result<Value, Exception> {
        Ok(Value::Object(this.clone()))
    }
}
