use core::cell::RefCell;

use serde_core::{Serialize, Serializer};
use vc_utils::hash::HashSet;

use super::array_serializer::ArraySerializer;
use super::error_utils::make_custom_error;
use super::object_serializer::{ObjectSerializer, TypedArraySerializer};
use super::to_json::{Key, resolve};

crate::cfg::debug! {
    use super::error_utils::MEMBER_PATH;
}

use crate::value::{ObjectId, ObjectKind, ObjectRef, Value};

/// Largest integer that `f64` represents exactly, together with all smaller ones.
const MAX_SAFE_INTEGER: f64 = 9007199254740991.0;

// -----------------------------------------------------------------------------
// JsonDriver

/// Serializer for a [`Value`] graph, following the rules of a JSON text encoder.
///
/// # Serialization Rules
///
/// 1. **Hooks**: An object whose `toJSON` member (own or inherited) is a
///    function is replaced by what the function returns. It receives the
///    member name or index it is stored under, `""` at the root.
///
/// 2. **Built-in hooks**: Without a `toJSON` member, dates encode as ISO-8601
///    strings (`null` when invalid), buffers as `{"type":"Buffer","data":[..]}`,
///    set adapters as arrays and map adapters as objects.
///
/// 3. **Values**: `undefined`, symbols and functions are left out of objects
///    and encode as `null` in arrays and at the root. Numbers that are not
///    finite encode as `null`, integers up to 2^53 as integers.
///
/// 4. **Objects**: Arrays encode as sequences, typed arrays as maps from
///    indices to elements, other objects as maps of their own enumerable
///    members in definition order. Getters run on the object being encoded.
///
/// Encoding an object that is already being encoded is an error, as is a
/// failing getter or hook. When the `debug` configuration is on, the error
/// message names the path of the failing member.
///
/// Converted snapshots (see [`convert`](crate::convert())) encode every member
/// they captured, getters and inherited members included.
///
/// # Examples
///
/// ```
/// use vc_jsonify::{JsonDriver, value::{ObjectRef, Value}};
///
/// let obj = ObjectRef::new_plain();
/// obj.set("list", Value::array([Value::from(1), Value::Undefined]));
/// obj.set("skipped", Value::Undefined);
/// obj.set("ratio", 0.5);
///
/// let value = Value::from(obj);
/// let driver = JsonDriver::new(&value);
/// let output = serde_json::to_string(&driver).unwrap();
///
/// assert_eq!(output, r#"{"list":[1,null],"ratio":0.5}"#);
/// ```
pub struct JsonDriver<'a> {
    value: &'a Value,
}

impl<'a> JsonDriver<'a> {
    #[inline]
    pub const fn new(value: &'a Value) -> Self {
        Self { value }
    }
}

impl Serialize for JsonDriver<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::cfg::debug! {
            MEMBER_PATH.with_borrow_mut(|path| path.clear());
        }

        let encoding = Encoding::new();
        match resolve(self.value, Key::Root)? {
            Some(resolved) => ValueSerializer {
                value: &resolved.value,
                origin: resolved.origin.as_ref(),
                encoding: &encoding,
            }
            .serialize(serializer),
            None => serializer.serialize_unit(),
        }
    }
}

// -----------------------------------------------------------------------------
// Encoding

/// The objects being encoded, innermost last.
pub(super) struct Encoding {
    stack: RefCell<HashSet<ObjectId>>,
}

impl Encoding {
    fn new() -> Self {
        Self {
            stack: RefCell::new(HashSet::default()),
        }
    }

    /// Returns `false` if `object` is already being encoded.
    fn enter(&self, object: &ObjectRef) -> bool {
        self.stack.borrow_mut().insert(object.id())
    }

    fn leave(&self, object: &ObjectRef) {
        self.stack.borrow_mut().remove(&object.id());
    }
}

// -----------------------------------------------------------------------------
// ValueSerializer

/// A serializer for values whose hooks already ran.
pub(super) struct ValueSerializer<'a> {
    pub value: &'a Value,
    pub origin: Option<&'a ObjectRef>,
    pub encoding: &'a Encoding,
}

impl Serialize for ValueSerializer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value {
            Value::Undefined | Value::Null | Value::Symbol(_) | Value::Function(_) => {
                serializer.serialize_unit()
            }
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => JsonNumber(*n).serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Object(object) => {
                let origin = self.origin.filter(|o| !o.ptr_eq(object));
                if !self.encoding.enter(object) || origin.is_some_and(|o| !self.encoding.enter(o)) {
                    return Err(make_custom_error("converting circular structure to JSON"));
                }

                let output = self.serialize_object(object, serializer);

                self.encoding.leave(object);
                if let Some(origin) = origin {
                    self.encoding.leave(origin);
                }
                output
            }
        }
    }
}

impl ValueSerializer<'_> {
    fn serialize_object<S: Serializer>(
        &self,
        object: &ObjectRef,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        if let Some(elements) = object.elements() {
            return ArraySerializer {
                elements: &elements,
                encoding: self.encoding,
            }
            .serialize(serializer);
        }

        if let ObjectKind::TypedArray(view) = object.borrow().kind() {
            return TypedArraySerializer { view }.serialize(serializer);
        }

        ObjectSerializer {
            object,
            encoding: self.encoding,
        }
        .serialize(serializer)
    }
}

// -----------------------------------------------------------------------------
// JsonNumber

/// A number as a JSON encoder writes it.
pub(super) struct JsonNumber(pub f64);

impl Serialize for JsonNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let n = self.0;
        if !n.is_finite() {
            serializer.serialize_unit()
        } else if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
            serializer.serialize_i64(n as i64)
        } else {
            serializer.serialize_f64(n)
        }
    }
}

