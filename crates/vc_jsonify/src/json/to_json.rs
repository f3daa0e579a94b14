use alloc::format;
use alloc::rc::Rc;
use alloc::string::ToString;

use serde_core::ser::Error;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use super::error_utils::make_custom_error;

use crate::value::{Collection, ObjectKind, ObjectRef, TypedArray, Value, number_to_string};

/// Everything after the year of an ISO-8601 date.
const DATE_TAIL: &[BorrowedFormatItem<'_>] =
    format_description!("[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

/// Where a value sits in its container, handed to `toJSON` hooks.
#[derive(Clone, Copy)]
pub(super) enum Key<'a> {
    Root,
    Index(usize),
    Member(&'a str),
}

impl Key<'_> {
    fn to_value(self) -> Value {
        match self {
            Key::Root => Value::from(""),
            Key::Index(index) => Value::from(index.to_string()),
            Key::Member(name) => Value::from(name),
        }
    }
}

/// A value after its `toJSON` hook ran.
pub(super) struct Resolved {
    pub value: Value,
    /// The object whose hook produced `value`, when it differs from `value`.
    pub origin: Option<ObjectRef>,
}

/// Applies the `toJSON` hook of `value`, if any.
///
/// A `toJSON` function found through the delegate chain wins. Without one,
/// dates, buffers and the converter's set and map adapters use their
/// built-in form. Returns `None` for values that are left out of objects:
/// `undefined`, symbols and functions.
pub(super) fn resolve<E: Error>(value: &Value, key: Key<'_>) -> Result<Option<Resolved>, E> {
    let resolved = match value {
        Value::Object(object) => {
            let output = apply_hook(object, key)?;
            let origin = match &output {
                Value::Object(o) if o.ptr_eq(object) => None,
                _ => Some(object.clone()),
            };
            Resolved {
                value: output,
                origin,
            }
        }
        _ => Resolved {
            value: value.clone(),
            origin: None,
        },
    };

    Ok(match resolved.value {
        Value::Undefined | Value::Symbol(_) | Value::Function(_) => None,
        _ => Some(resolved),
    })
}

fn apply_hook<E: Error>(object: &ObjectRef, key: Key<'_>) -> Result<Value, E> {
    if let Value::Function(hook) = object.get("toJSON").map_err(make_custom_error)? {
        return hook
            .call(&Value::Object(object.clone()), &[key.to_value()])
            .map_err(make_custom_error);
    }

    let builtin = match object.borrow().kind() {
        ObjectKind::Date(millis) => Some(date_to_json(*millis)?),
        ObjectKind::TypedArray(TypedArray::Buffer(bytes)) => Some(buffer_to_json(bytes)),
        ObjectKind::SerializableSet(members) => Some(Value::array(members.values().cloned())),
        ObjectKind::SerializableMap(entries) => Some(map_to_json(entries)),
        _ => None,
    };
    Ok(builtin.unwrap_or_else(|| Value::Object(object.clone())))
}

/// `YYYY-MM-DDTHH:mm:ss.sssZ`, years outside `0..=9999` as `±YYYYYY`.
/// Invalid dates become `null`.
fn date_to_json<E: Error>(millis: f64) -> Result<Value, E> {
    if millis.is_nan() {
        return Ok(Value::Null);
    }

    let nanos = millis as i128 * 1_000_000;
    let datetime = OffsetDateTime::from_unix_timestamp_nanos(nanos).map_err(make_custom_error)?;
    let tail = datetime.format(DATE_TAIL).map_err(make_custom_error)?;

    let year = datetime.year();
    let text = if (0..=9999).contains(&year) {
        format!("{year:04}-{tail}")
    } else {
        let sign = if year < 0 { '-' } else { '+' };
        format!("{sign}{:06}-{tail}", year.unsigned_abs())
    };
    Ok(Value::from(text))
}

/// `{"type":"Buffer","data":[..]}`.
fn buffer_to_json(bytes: &[u8]) -> Value {
    let json = ObjectRef::new_plain();
    json.set("type", "Buffer");
    json.set("data", Value::array(bytes.iter().map(|&b| Value::from(b))));
    Value::Object(json)
}

/// An object with one member per entry. Keys that have no member name
/// (symbols, functions and objects) are skipped.
fn map_to_json(entries: &Collection) -> Value {
    let json = ObjectRef::new_plain();
    for (key, value) in entries.iter() {
        let name: Rc<str> = match key {
            Value::String(s) => s.clone(),
            Value::Number(n) => Rc::from(number_to_string(*n)),
            Value::Bool(true) => Rc::from("true"),
            Value::Bool(false) => Rc::from("false"),
            Value::Null => Rc::from("null"),
            Value::Undefined => Rc::from("undefined"),
            Value::Symbol(_) | Value::Function(_) | Value::Object(_) => {
                log::debug!("skipping map key {key:?}: not a member name");
                continue;
            }
        };
        json.set(name, value.clone());
    }
    Value::Object(json)
}

#[cfg(test)]
mod tests {
    use super::date_to_json;
    use crate::value::Value;

    fn iso(millis: f64) -> Value {
        date_to_json::<serde_json::Error>(millis).unwrap()
    }

    #[test]
    fn iso_dates() {
        assert_eq!(iso(0.0), Value::from("1970-01-01T00:00:00.000Z"));
        assert_eq!(iso(1_700_000_000_123.0), Value::from("2023-11-14T22:13:20.123Z"));
        assert_eq!(iso(-1.0), Value::from("1969-12-31T23:59:59.999Z"));
        assert_eq!(iso(8.64e15), Value::from("+275760-09-13T00:00:00.000Z"));
        assert_eq!(iso(-62_198_755_200_000.0), Value::from("-000001-01-01T00:00:00.000Z"));
        assert!(iso(f64::NAN).is_null());
    }
}
