use crate::class::Class;
use crate::convert;

std::thread_local! {
    static SERIALIZABLE_CLASS: Class = Class::builder("SerializableClass")
        .method("toJSON", |this, _| convert(this, None))
        .build();
}

/// Base class for types that encode through the converter.
///
/// Its prototype holds a hidden `toJSON()` method that returns
/// `convert(this)`. A JSON encoder calls it and writes the converted
/// snapshot, so getters and inherited members show up while members named
/// `_like_this` stay out.
///
/// # Examples
///
/// ```
/// use vc_jsonify::{Class, JsonDriver, SerializableClass, value::Value};
///
/// let class = Class::builder("Temperature")
///     .extends(&SerializableClass::class())
///     .getter("celsius", |this, _| {
///         let kelvin = this.get("_kelvin")?.as_number().unwrap_or_default();
///         Ok(Value::from(kelvin - 273.0))
///     })
///     .build();
///
/// let reading = class.instantiate();
/// reading.set("_kelvin", 300);
///
/// let text = serde_json::to_string(&JsonDriver::new(&Value::from(reading))).unwrap();
/// assert_eq!(text, r#"{"celsius":27}"#);
/// ```
pub struct SerializableClass;

impl SerializableClass {
    /// The base class, shared by all callers of the current thread.
    pub fn class() -> Class {
        SERIALIZABLE_CLASS.with(Class::clone)
    }
}
