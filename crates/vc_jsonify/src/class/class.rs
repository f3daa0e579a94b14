use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use crate::Exception;
use crate::convert::{Converter, CustomSerializable};
use crate::value::{Delegate, Function, Getter, Setter};
use crate::value::{Object, ObjectKind, ObjectRef, Property, Value};

// -----------------------------------------------------------------------------
// Class

/// A named prototype.
///
/// Instances delegate to the prototype, so they inherit its getters and
/// methods without owning them. Cloning a `Class` shares the prototype.
///
/// # Examples
///
/// ```
/// use vc_jsonify::{Class, value::Value};
///
/// let base = Class::builder("Base")
///     .getter("kind", |_, _| Ok(Value::from("base")))
///     .build();
///
/// let derived = Class::builder("Derived")
///     .extends(&base)
///     .getter("size", |this, _| this.get("n"))
///     .build();
///
/// let obj = derived.instantiate();
/// obj.set("n", 3);
///
/// assert_eq!(obj.get("size").unwrap(), Value::from(3));
/// assert_eq!(obj.get("kind").unwrap(), Value::from("base"));
/// assert!(base.is_instance(&obj));
/// ```
#[derive(Clone)]
pub struct Class {
    name: Rc<str>,
    prototype: ObjectRef,
}

impl Class {
    /// Starts declaring a class.
    #[inline]
    pub fn builder(name: &str) -> ClassBuilder {
        ClassBuilder::new(name)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub const fn prototype(&self) -> &ObjectRef {
        &self.prototype
    }

    /// Creates an instance without own members.
    #[inline]
    pub fn instantiate(&self) -> ObjectRef {
        ObjectRef::new(
            Object::new(ObjectKind::Plain).with_delegate(Delegate::Object(self.prototype.clone())),
        )
    }

    /// Returns `true` if `object` delegates to this class' prototype.
    #[inline]
    pub fn is_instance(&self, object: &ObjectRef) -> bool {
        object.instance_of(&self.prototype)
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[class {}]", self.name)
    }
}

// -----------------------------------------------------------------------------
// ClassBuilder

/// Declares the members of a [`Class`] prototype.
///
/// Getters, accessors and methods are non-enumerable, as are the prototype
/// members a class declaration produces. Every prototype also carries a
/// `constructor` function.
pub struct ClassBuilder {
    name: Rc<str>,
    prototype: Object,
}

impl ClassBuilder {
    fn new(name: &str) -> Self {
        let name: Rc<str> = Rc::from(name);
        let mut prototype = Object::new(ObjectKind::Plain);

        let class_name = name.clone();
        let constructor = Function::new(String::from(&*name), move |_, _| {
            Err(Exception::error(&alloc::format!(
                "class constructor {class_name} cannot be invoked without 'new'"
            )))
        });
        prototype.define("constructor", Property::data(Value::from(constructor), false));

        Self { name, prototype }
    }

    /// Delegates the prototype to `parent`'s prototype.
    pub fn extends(mut self, parent: &Class) -> Self {
        self.prototype = self
            .prototype
            .with_delegate(Delegate::Object(parent.prototype.clone()));
        self
    }

    /// Declares a getter.
    pub fn getter<F>(mut self, name: &str, get: F) -> Self
    where
        F: Fn(&ObjectRef, Option<&mut Converter>) -> Result<Value, Exception> + 'static,
    {
        self.prototype.define(name, Property::getter(get));
        self
    }

    /// Declares an accessor pair.
    pub fn accessor(mut self, name: &str, get: Option<Getter>, set: Option<Setter>) -> Self {
        self.prototype.define(name, Property::accessor(get, set));
        self
    }

    /// Declares a method.
    pub fn method<F>(mut self, name: &str, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, Exception> + 'static,
    {
        let function = Function::new(String::from(name), body);
        self.prototype.define(name, Property::data(Value::from(function), false));
        self
    }

    /// Declares a non-enumerable data member shared by all instances.
    pub fn member(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.prototype.define(name, Property::data(value.into(), false));
        self
    }

    /// Declares an override inherited by all instances.
    pub fn custom<C: CustomSerializable + 'static>(self, custom: C) -> Self {
        self.custom_rc(Rc::new(custom))
    }

    /// Declares an already shared override.
    pub fn custom_rc(mut self, custom: Rc<dyn CustomSerializable>) -> Self {
        self.prototype.set_custom_serializer(Some(custom));
        self
    }

    pub fn build(self) -> Class {
        Class {
            name: self.name,
            prototype: ObjectRef::new(self.prototype),
        }
    }
}
