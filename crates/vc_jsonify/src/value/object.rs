use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Ref, RefCell, RefMut};
use core::fmt;

use vc_utils::hash::HashMap;

use crate::Exception;
use crate::convert::{Converter, CustomSerializable};
use crate::value::{Collection, Property, TypedArray, Value};

// -----------------------------------------------------------------------------
// Delegate

/// Where member lookups continue after an object's own members.
#[derive(Clone, Default)]
pub enum Delegate {
    /// No delegate.
    Null,
    /// The generic base object, which contributes no members.
    #[default]
    Base,
    /// Another object.
    Object(ObjectRef),
}

impl Delegate {
    /// Returns the delegate object, if any.
    #[inline]
    pub const fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl fmt::Debug for Delegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Base => f.write_str("Base"),
            Self::Object(o) => write!(f, "{o:?}"),
        }
    }
}

// -----------------------------------------------------------------------------
// ObjectKind

/// The built-in behavior of an object, beyond its members.
#[derive(Clone, Debug)]
pub enum ObjectKind {
    /// An ordinary object: members only.
    Plain,
    Array(Vec<Value>),
    Set(Collection),
    Map(Collection),
    /// A set produced by the converter, encodes as an array of its members.
    SerializableSet(Collection),
    /// A map produced by the converter, encodes as an object of its entries.
    SerializableMap(Collection),
    /// Milliseconds since the Unix epoch, `NaN` for an invalid date.
    Date(f64),
    TypedArray(TypedArray),
    RegExp {
        source: Rc<str>,
        flags: Rc<str>,
    },
    /// Error data, the members live on the object and its delegates.
    Error,
    Promise,
    WeakSet,
    WeakMap,
}

impl ObjectKind {
    /// Tag used when the object is printed, e.g. `[object Map]`.
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Plain => "Object",
            Self::Array(_) => "Array",
            Self::Set(_) => "Set",
            Self::Map(_) => "Map",
            Self::SerializableSet(_) => "SerializableSet",
            Self::SerializableMap(_) => "SerializableMap",
            Self::Date(_) => "Date",
            Self::TypedArray(view) => view.name(),
            Self::RegExp { .. } => "RegExp",
            Self::Error => "Error",
            Self::Promise => "Promise",
            Self::WeakSet => "WeakSet",
            Self::WeakMap => "WeakMap",
        }
    }
}

// -----------------------------------------------------------------------------
// Object

/// An object: its kind, ordered own members and delegate.
///
/// Objects are shared through [`ObjectRef`], which is what the rest of the
/// graph holds.
pub struct Object {
    kind: ObjectKind,
    delegate: Delegate,
    custom: Option<Rc<dyn CustomSerializable>>,
    names: Vec<Rc<str>>,
    properties: Vec<Property>,
    indices: HashMap<Rc<str>, usize>,
}

impl Object {
    /// Creates an object without members, delegating to [`Delegate::Base`].
    #[inline]
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            delegate: Delegate::Base,
            custom: None,
            names: Vec::new(),
            properties: Vec::new(),
            indices: HashMap::default(),
        }
    }

    /// Returns the object with its delegate replaced.
    #[inline]
    pub fn with_delegate(mut self, delegate: Delegate) -> Self {
        self.delegate = delegate;
        self
    }

    #[inline]
    pub const fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    #[inline]
    pub const fn kind_mut(&mut self) -> &mut ObjectKind {
        &mut self.kind
    }

    #[inline]
    pub const fn delegate(&self) -> &Delegate {
        &self.delegate
    }

    /// Returns the own override, ignoring delegates.
    #[inline]
    pub fn custom_serializer(&self) -> Option<&Rc<dyn CustomSerializable>> {
        self.custom.as_ref()
    }

    /// Installs or removes the own override.
    #[inline]
    pub fn set_custom_serializer(&mut self, custom: Option<Rc<dyn CustomSerializable>>) {
        self.custom = custom;
    }

    /// Number of own members.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.indices.get(name).map(|&i| &self.properties[i])
    }

    #[inline]
    pub fn property_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.indices.get(name).map(|&i| &mut self.properties[i])
    }

    /// Own member names in definition order.
    #[inline]
    pub fn property_names(&self) -> &[Rc<str>] {
        &self.names
    }

    /// Own members in definition order.
    #[inline]
    pub fn properties(&self) -> impl ExactSizeIterator<Item = (&Rc<str>, &Property)> {
        self.names.iter().zip(self.properties.iter())
    }

    /// Defines an own member, replacing an existing one in place.
    pub fn define(&mut self, name: impl Into<Rc<str>>, property: Property) {
        let name = name.into();
        if let Some(&index) = self.indices.get(&name) {
            self.properties[index] = property;
            return;
        }
        self.indices.insert(name.clone(), self.names.len());
        self.names.push(name);
        self.properties.push(property);
    }

    /// Removes an own member, preserving the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<Property> {
        let index = self.indices.remove(name)?;
        self.names.remove(index);
        for i in self.indices.values_mut() {
            if *i > index {
                *i -= 1;
            }
        }
        Some(self.properties.remove(index))
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("kind", &self.kind)
            .field("delegate", &self.delegate)
            .field("custom", &self.custom.is_some())
            .field("properties", &DebugProperties(self))
            .finish()
    }
}

struct DebugProperties<'a>(&'a Object);

impl fmt::Debug for DebugProperties<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.properties()).finish()
    }
}

// -----------------------------------------------------------------------------
// ObjectId

/// Identity handle of a live object.
///
/// Derived from the object's address, so it stays unique only while the
/// object is alive. Holders that outlive the graph must keep the
/// [`ObjectRef`] alongside the id.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ObjectId(usize);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}

// -----------------------------------------------------------------------------
// ObjectRef

/// A shared handle to an [`Object`].
///
/// Clones refer to the same object, `==` compares identity.
///
/// Borrows taken through [`borrow`](Self::borrow) and
/// [`borrow_mut`](Self::borrow_mut) must not be held across calls that may run
/// user code, such as [`get`](Self::get).
///
/// # Examples
///
/// ```
/// use vc_jsonify::value::{ObjectRef, Value};
///
/// let obj = ObjectRef::new_plain();
/// obj.set("a", 1);
/// obj.define_getter("twice", |this, _| {
///     let a = this.get("a")?.as_number().unwrap_or_default();
///     Ok(Value::from(a * 2.0))
/// });
///
/// assert_eq!(obj.get("a").unwrap(), Value::from(1));
/// assert_eq!(obj.get("twice").unwrap(), Value::from(2));
/// assert!(obj.get("missing").unwrap().is_undefined());
/// ```
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<Object>>);

impl ObjectRef {
    #[inline]
    pub fn new(object: Object) -> Self {
        Self(Rc::new(RefCell::new(object)))
    }

    #[inline]
    fn with_kind(kind: ObjectKind) -> Self {
        Self::new(Object::new(kind))
    }

    /// Creates an empty plain object.
    #[inline]
    pub fn new_plain() -> Self {
        Self::with_kind(ObjectKind::Plain)
    }

    /// Creates an empty object without delegate.
    #[inline]
    pub fn new_bare() -> Self {
        Self::new(Object::new(ObjectKind::Plain).with_delegate(Delegate::Null))
    }

    #[inline]
    pub fn new_array(values: impl IntoIterator<Item = Value>) -> Self {
        Self::with_kind(ObjectKind::Array(values.into_iter().collect()))
    }

    #[inline]
    pub fn new_set(members: impl IntoIterator<Item = Value>) -> Self {
        Self::with_kind(ObjectKind::Set(members.into_iter().collect()))
    }

    #[inline]
    pub fn new_map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Self::with_kind(ObjectKind::Map(entries.into_iter().collect()))
    }

    /// Creates a date from milliseconds since the Unix epoch.
    ///
    /// The time value is truncated to whole milliseconds, values outside
    /// ±8.64e15 make an invalid date.
    pub fn new_date(millis: f64) -> Self {
        let millis = if millis.is_finite() && millis.abs() <= 8.64e15 {
            millis.trunc() + 0.0
        } else {
            f64::NAN
        };
        Self::with_kind(ObjectKind::Date(millis))
    }

    #[inline]
    pub fn new_typed_array(view: TypedArray) -> Self {
        Self::with_kind(ObjectKind::TypedArray(view))
    }

    #[inline]
    pub fn new_regexp(source: &str, flags: &str) -> Self {
        Self::with_kind(ObjectKind::RegExp {
            source: Rc::from(source),
            flags: Rc::from(flags),
        })
    }

    #[inline]
    pub fn new_promise() -> Self {
        Self::with_kind(ObjectKind::Promise)
    }

    #[inline]
    pub fn new_weak_set() -> Self {
        Self::with_kind(ObjectKind::WeakSet)
    }

    #[inline]
    pub fn new_weak_map() -> Self {
        Self::with_kind(ObjectKind::WeakMap)
    }

    /// Creates an error delegating to the built-in error prototype.
    ///
    /// `message` and `stack` are hidden own members, `name` is inherited.
    pub fn new_error(message: &str) -> Self {
        let error = Self::new(
            Object::new(ObjectKind::Error)
                .with_delegate(Delegate::Object(crate::class::error_prototype())),
        );
        let stack = alloc::format!("Error: {message}");
        error.define("stack", Property::data(Value::from(stack), false));
        error.define("message", Property::data(Value::from(message), false));
        error
    }

    // -------------------------------------------------------------------------
    // Identity

    #[inline]
    pub fn id(&self) -> ObjectId {
        ObjectId(Rc::as_ptr(&self.0) as *const () as usize)
    }

    /// Returns `true` if both handles refer to the same object.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    #[inline]
    pub fn borrow(&self) -> Ref<'_, Object> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, Object> {
        self.0.borrow_mut()
    }

    // -------------------------------------------------------------------------
    // Delegates

    #[inline]
    pub fn delegate(&self) -> Delegate {
        self.borrow().delegate.clone()
    }

    #[inline]
    pub fn set_delegate(&self, delegate: Delegate) {
        self.borrow_mut().delegate = delegate;
    }

    /// The delegate object, `None` for [`Delegate::Base`] and [`Delegate::Null`].
    #[inline]
    pub fn parent(&self) -> Option<ObjectRef> {
        self.borrow().delegate.as_object().cloned()
    }

    /// Iterates over this object followed by its delegate objects.
    #[inline]
    pub fn chain(&self) -> impl Iterator<Item = ObjectRef> {
        core::iter::successors(Some(self.clone()), ObjectRef::parent)
    }

    /// Returns `true` if `prototype` is one of this object's delegates.
    pub fn instance_of(&self, prototype: &ObjectRef) -> bool {
        self.chain().skip(1).any(|o| o.ptr_eq(prototype))
    }

    /// Returns `true` if this object or one of its delegates carries error data.
    ///
    /// Converted snapshots of errors answer `true` through their source.
    pub fn is_error(&self) -> bool {
        self.chain().any(|o| matches!(o.borrow().kind, ObjectKind::Error))
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self.borrow().kind, ObjectKind::Array(_))
    }

    /// Returns `true` for sets, converted sets included.
    #[inline]
    pub fn is_set(&self) -> bool {
        matches!(
            self.borrow().kind,
            ObjectKind::Set(_) | ObjectKind::SerializableSet(_)
        )
    }

    /// Returns `true` for maps, converted maps included.
    #[inline]
    pub fn is_map(&self) -> bool {
        matches!(
            self.borrow().kind,
            ObjectKind::Map(_) | ObjectKind::SerializableMap(_)
        )
    }

    /// Returns `true` for the set and map adapters produced by the converter.
    #[inline]
    pub fn is_collection_adapter(&self) -> bool {
        matches!(
            self.borrow().kind,
            ObjectKind::SerializableSet(_) | ObjectKind::SerializableMap(_)
        )
    }

    /// Copies the elements out of an array.
    pub fn elements(&self) -> Option<Vec<Value>> {
        match &self.borrow().kind {
            ObjectKind::Array(values) => Some(values.clone()),
            _ => None,
        }
    }

    /// Copies the entries out of a set or map, sets yield `(member, member)`.
    pub fn entries(&self) -> Option<Vec<(Value, Value)>> {
        match &self.borrow().kind {
            ObjectKind::Set(c)
            | ObjectKind::Map(c)
            | ObjectKind::SerializableSet(c)
            | ObjectKind::SerializableMap(c) => {
                Some(c.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            }
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Members

    /// Defines an own member, see [`Object::define`].
    #[inline]
    pub fn define(&self, name: impl Into<Rc<str>>, property: Property) {
        self.borrow_mut().define(name, property);
    }

    /// Stores an own data member.
    ///
    /// An existing own data member keeps its enumerability, a new one
    /// (or one replacing an accessor) is enumerable.
    pub fn set(&self, name: impl Into<Rc<str>>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        let mut this = self.borrow_mut();
        match this.property_mut(&name) {
            Some(property) if !property.is_accessor() => property.set_data(value),
            _ => this.define(name, Property::data(value, true)),
        }
    }

    /// Defines a non-enumerable own getter.
    pub fn define_getter<F>(&self, name: impl Into<Rc<str>>, get: F)
    where
        F: Fn(&ObjectRef, Option<&mut Converter>) -> Result<Value, Exception> + 'static,
    {
        self.define(name, Property::getter(get));
    }

    /// Removes an own member.
    #[inline]
    pub fn delete(&self, name: &str) -> Option<Property> {
        self.borrow_mut().remove(name)
    }

    /// Copies an own member out.
    #[inline]
    pub fn own_property(&self, name: &str) -> Option<Property> {
        self.borrow().property(name).cloned()
    }

    /// Copies all own members out, in definition order.
    pub fn own_properties(&self) -> Vec<(Rc<str>, Property)> {
        self.borrow()
            .properties()
            .map(|(name, property)| (name.clone(), property.clone()))
            .collect()
    }

    #[inline]
    pub fn own_property_names(&self) -> Vec<Rc<str>> {
        self.borrow().names.clone()
    }

    #[inline]
    pub fn has_own(&self, name: &str) -> bool {
        self.borrow().indices.contains_key(name)
    }

    /// Returns `true` if the member is found on this object or a delegate.
    pub fn has(&self, name: &str) -> bool {
        self.chain().any(|o| o.has_own(name))
    }

    /// Finds a member on this object or its delegates.
    pub fn find_property(&self, name: &str) -> Option<Property> {
        self.chain().find_map(|o| o.own_property(name))
    }

    /// Reads a member through the delegate chain.
    ///
    /// Accessors run with this object as receiver. Missing members read as
    /// `undefined`.
    pub fn get(&self, name: &str) -> Result<Value, Exception> {
        match self.find_property(name) {
            Some(property) => property.read(self),
            None => Ok(Value::Undefined),
        }
    }

    /// Reads a data member through the delegate chain without running code.
    ///
    /// Stops at the first member with that name, accessors yield `None`.
    pub fn peek(&self, name: &str) -> Option<Value> {
        self.find_property(name)
            .and_then(|property| property.data_value().cloned())
    }

    /// Calls the function stored under `name` with this object as receiver.
    pub fn call_method(&self, name: &str, args: &[Value]) -> Result<Value, Exception> {
        match self.get(name)? {
            Value::Function(f) => f.call(&Value::Object(self.clone()), args),
            other => Err(Exception::error(&alloc::format!(
                "`{name}` is not a function but {}",
                other.type_name()
            ))),
        }
    }

    // -------------------------------------------------------------------------
    // Override

    /// Finds the override on this object or its delegates.
    pub fn custom_serializer(&self) -> Option<Rc<dyn CustomSerializable>> {
        self.chain().find_map(|o| o.borrow().custom.clone())
    }

    /// Installs or removes the own override.
    #[inline]
    pub fn set_custom_serializer(&self, custom: Option<Rc<dyn CustomSerializable>>) {
        self.borrow_mut().set_custom_serializer(custom);
    }
}

impl PartialEq for ObjectRef {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ObjectRef {}

impl fmt::Debug for ObjectRef {
    /// Shallow: prints identity and kind, never the members, so cyclic
    /// graphs print fine.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(object) => write!(f, "{} {}", object.kind.tag(), self.id()),
            Err(_) => write!(f, "Object {}", self.id()),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_error() {
            let name = self.peek("name").unwrap_or(Value::from("Error"));
            return match self.peek("message") {
                Some(message) if message.as_str().is_some_and(|m| !m.is_empty()) => {
                    write!(f, "{name}: {message}")
                }
                _ => write!(f, "{name}"),
            };
        }
        match self.0.try_borrow() {
            Ok(object) => write!(f, "[object {}]", object.kind.tag()),
            Err(_) => f.write_str("[object Object]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Delegate, ObjectKind, ObjectRef};
    use crate::value::{Property, Value};
    use alloc::rc::Rc;
    use alloc::string::ToString;
    use core::cell::Cell;

    #[test]
    fn members_keep_definition_order() {
        let obj = ObjectRef::new_plain();
        obj.set("b", 1);
        obj.set("a", 2);
        obj.set("b", 3);
        obj.define("c", Property::data(Value::Null, false));

        let names = obj.own_property_names();
        assert_eq!(names.len(), 3);
        assert_eq!(&*names[0], "b");
        assert_eq!(&*names[2], "c");
        assert_eq!(obj.get("b").unwrap(), Value::from(3));

        assert!(obj.delete("b").is_some());
        assert_eq!(&*obj.own_property_names()[0], "a");
        assert!(!obj.own_property("c").unwrap().is_enumerable());
    }

    #[test]
    fn inherited_getter_sees_receiver() {
        let proto = ObjectRef::new_plain();
        proto.define_getter("who", |this, _| this.get("name"));

        let obj = ObjectRef::new_plain();
        obj.set_delegate(Delegate::Object(proto.clone()));
        obj.set("name", "child");

        assert_eq!(obj.get("who").unwrap(), Value::from("child"));
        assert!(obj.instance_of(&proto));
        assert!(!proto.instance_of(&obj));
        assert!(obj.has("who"));
        assert!(!obj.has_own("who"));
    }

    #[test]
    fn getters_run_on_every_read() {
        let counter = Rc::new(Cell::new(0));
        let obj = ObjectRef::new_plain();
        let c = counter.clone();
        obj.define_getter("n", move |_, _| {
            c.set(c.get() + 1);
            Ok(Value::from(c.get()))
        });

        assert_eq!(obj.get("n").unwrap(), Value::from(1));
        assert_eq!(obj.get("n").unwrap(), Value::from(2));
        assert_eq!(obj.peek("n"), None);
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn errors_are_recognized_through_delegates() {
        let error = ObjectRef::new_error("boom");
        assert!(error.is_error());
        assert_eq!(error.get("name").unwrap(), Value::from("Error"));
        assert_eq!(error.to_string(), "Error: boom");

        let snapshot = ObjectRef::new_plain();
        snapshot.set_delegate(Delegate::Object(error.clone()));
        assert!(snapshot.is_error());
        assert!(!ObjectRef::new_plain().is_error());
    }

    #[test]
    fn date_time_clip() {
        let date = ObjectRef::new_date(1.9);
        assert!(matches!(date.borrow().kind(), ObjectKind::Date(ms) if *ms == 1.0));

        let invalid = ObjectRef::new_date(9e15);
        assert!(matches!(invalid.borrow().kind(), ObjectKind::Date(ms) if ms.is_nan()));
    }

    #[test]
    fn call_method_requires_function() {
        let obj = ObjectRef::new_plain();
        obj.set("x", 1);
        assert!(obj.call_method("x", &[]).is_err());
    }
}
