use alloc::string::String;

use crate::value::{Function, ObjectRef, Property, Value};

std::thread_local! {
    static ERROR_PROTOTYPE: ObjectRef = build_error_prototype();
}

/// The prototype shared by all error objects of the current thread.
///
/// Holds the hidden members `constructor`, `name` (`"Error"`),
/// `message` (`""`) and `toString()`.
///
/// # Examples
///
/// ```
/// use vc_jsonify::{class::error_prototype, value::ObjectRef};
///
/// let error = ObjectRef::new_error("oops");
/// assert!(error.instance_of(&error_prototype()));
/// ```
pub fn error_prototype() -> ObjectRef {
    ERROR_PROTOTYPE.with(ObjectRef::clone)
}

fn build_error_prototype() -> ObjectRef {
    let prototype = ObjectRef::new_plain();

    let constructor = Function::new("Error", |_, args| {
        let message = match args.first() {
            None | Some(Value::Undefined) => String::new(),
            Some(message) => alloc::format!("{message}"),
        };
        Ok(Value::from(ObjectRef::new_error(&message)))
    });
    let to_string = Function::new("toString", |this, _| match this {
        Value::Object(error) => Ok(Value::from(alloc::format!("{error}"))),
        _ => Ok(Value::from("Error")),
    });

    prototype.define("constructor", Property::data(Value::from(constructor), false));
    prototype.define("name", Property::data(Value::from("Error"), false));
    prototype.define("message", Property::data(Value::from(""), false));
    prototype.define("toString", Property::data(Value::from(to_string), false));
    prototype
}
