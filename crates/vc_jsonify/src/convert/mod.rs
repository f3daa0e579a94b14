//! Conversion of object graphs into encodable snapshots.
//!
//! [`convert`] turns a graph whose data hides behind getters, inherited
//! members and hidden members into a graph that a JSON encoder writes in
//! full.
//!
//! # Rules
//!
//! Each value is handled by the first rule that applies:
//!
//! 1. Values other than objects are returned unchanged.
//! 2. Objects already converted during this call return their result, so
//!    shared references stay shared.
//! 3. Objects with a [`CustomSerializable`] override (own or inherited) return
//!    what the override produces. The override is skipped for the object it
//!    is running for, and for set and map adapters.
//! 4. Promises, weak sets and weak maps become `null`.
//! 5. Dates, typed arrays and regular expressions are returned unchanged.
//! 6. An object reached again while it is being walked is a cycle and
//!    becomes `null`. Otherwise it is walked:
//!    - arrays convert element by element;
//!    - sets and maps become adapters holding converted members;
//!    - other objects become a snapshot of the members found on the object
//!      and its delegates, read with the object as receiver.
//!
//! # Snapshots
//!
//! A snapshot holds every member as a plain data member and delegates to its
//! source, so type checks such as [`ObjectRef::is_error`] still answer like
//! the source. Members are enumerable unless:
//!
//! - the converted value is `undefined`, a symbol or a function;
//! - the name starts with `_` and the member is inherited, or the source is
//!   a class instance (it delegates to an object rather than to the base).
//!
//! A snapshot that saw a `toJSON` member gets a hidden `toJSON` returning the
//! snapshot itself, so encoders do not run the hook of the source again.
//!
//! Every fresh result carries an override returning itself, converting a
//! result a second time is a no-op.
//!
//! [`ObjectRef::is_error`]: crate::value::ObjectRef::is_error

// -----------------------------------------------------------------------------
// Modules

mod adapter;
mod converter;
mod custom;

// -----------------------------------------------------------------------------
// Exports

pub use converter::Converter;
pub use custom::CustomSerializable;

crate::cfg::debug! {
    use converter::MEMBER_PATH;
}

use crate::Exception;
use crate::value::Value;

/// Converts `value` into an encodable snapshot.
///
/// `cx` is the running [`Converter`] when called from an override, or from a
/// getter read while members are captured. The nested conversion then shares
/// identity and cycle state with the rest of the call. Pass `None` to start
/// an independent conversion.
///
/// Failures of getters and overrides abort the whole call and are returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use vc_jsonify::{Class, JsonDriver, convert, value::{ObjectRef, Value}};
///
/// let class = Class::builder("User")
///     .getter("name", |this, _| this.get("_name"))
///     .build();
///
/// let user = class.instantiate();
/// user.set("_name", "ada");
/// user.set("friend", user.clone());
///
/// let snapshot = convert(&Value::from(user.clone()), None).unwrap();
/// let snapshot = snapshot.as_object().unwrap();
///
/// assert!(snapshot.instance_of(&user));
/// assert_eq!(snapshot.get("name").unwrap(), Value::from("ada"));
/// assert!(snapshot.get("friend").unwrap().is_null());
///
/// let json = serde_json::to_string(&JsonDriver::new(&Value::from(snapshot.clone()))).unwrap();
/// assert_eq!(json, r#"{"friend":null,"name":"ada"}"#);
/// ```
pub fn convert(value: &Value, cx: Option<&mut Converter>) -> Result<Value, Exception> {
    if let Some(cx) = cx {
        return cx.convert(value);
    }

    crate::cfg::debug! {
        let depth = MEMBER_PATH.with_borrow(|path| path.len());
    }

    let mut cx = Converter::new();
    let result = cx.convert(value);

    if let Err(err) = &result {
        crate::cfg::debug! {
            if {
                MEMBER_PATH.with_borrow(|path| log::debug!("conversion aborted at `{path}`: {err}"));
            } else {
                log::debug!("conversion aborted: {err}");
            }
        }
    }
    crate::cfg::debug! {
        MEMBER_PATH.with_borrow_mut(|path| path.truncate(depth));
    }

    result
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::Cell;

    use serde_json::json;

    use super::{Converter, convert};
    use crate::value::{Delegate, ObjectKind, ObjectRef, Property, Setter, Symbol, TypedArray, Value};
    use crate::{Class, Exception, JsonDriver, SerializableClass};

    fn run(value: &Value) -> Value {
        convert(value, None).unwrap()
    }

    fn to_json(value: &Value) -> serde_json::Value {
        serde_json::to_value(JsonDriver::new(value)).unwrap()
    }

    fn object(value: &Value) -> &ObjectRef {
        value.as_object().unwrap()
    }

    // -------------------------------------------------------------------------
    // Primitives

    #[test]
    fn primitives_pass_through() {
        assert_eq!(run(&Value::from(123)), Value::from(123));
        assert_eq!(run(&Value::from("123")), Value::from("123"));
        assert!(run(&Value::Undefined).is_undefined());
        assert!(run(&Value::Null).is_null());

        let symbol = Value::from(Symbol::new("xxx"));
        assert!(run(&symbol).ptr_eq(&symbol));

        let function = Value::from(crate::value::Function::return_this());
        assert!(run(&function).ptr_eq(&function));
    }

    // -------------------------------------------------------------------------
    // Collections

    fn sample_members() -> Vec<Value> {
        vec![Value::from(1), Value::from(2), Value::from("a"), Value::Null]
    }

    #[test]
    fn arrays_convert_element_wise() {
        let array = Value::array(sample_members());
        let converted = run(&array);

        assert!(!converted.ptr_eq(&array));
        assert_eq!(object(&converted).elements().unwrap(), sample_members());
    }

    #[test]
    fn sets_become_adapters() {
        let set = Value::from(ObjectRef::new_set(sample_members()));
        let converted = run(&set);

        assert!(!converted.ptr_eq(&set));
        let adapter = object(&converted);
        assert!(adapter.is_set());
        assert!(adapter.is_collection_adapter());
        assert_eq!(adapter.entries(), object(&set).entries());

        assert_eq!(to_json(&converted), json!([1, 2, "a", null]));
    }

    #[test]
    fn maps_become_adapters() {
        let map = Value::from(ObjectRef::new_map([
            (Value::from(1), Value::from(1)),
            (Value::from(2), Value::from("2")),
            (Value::from("a"), Value::Null),
        ]));
        let converted = run(&map);

        assert!(!converted.ptr_eq(&map));
        assert!(object(&converted).is_map());
        assert_eq!(object(&converted).entries(), object(&map).entries());

        assert_eq!(to_json(&converted), json!({"1": 1, "2": "2", "a": null}));
    }

    #[test]
    fn collection_members_are_converted() {
        let inner = ObjectRef::new_plain();
        inner.define_getter("g", |_, _| Ok(Value::from(5)));

        let set = ObjectRef::new_set([Value::from(inner.clone())]);
        let map = ObjectRef::new_map([(Value::from("k"), Value::from(inner.clone()))]);
        let root = Value::array([Value::from(set), Value::from(map)]);

        let converted = run(&root);
        let elements = object(&converted).elements().unwrap();
        let set_members = object(&elements[0]).entries().unwrap();
        let map_entries = object(&elements[1]).entries().unwrap();

        assert!(set_members[0].0.ptr_eq(&map_entries[0].1));
        assert!(!set_members[0].0.ptr_eq(&Value::from(inner)));
        assert_eq!(to_json(&converted), json!([[{"g": 5}], {"k": {"g": 5}}]));
    }

    #[test]
    fn collection_containing_itself() {
        let set = ObjectRef::new_set([Value::from(1)]);
        if let ObjectKind::Set(members) = set.borrow_mut().kind_mut() {
            members.add(Value::from(set.clone()));
        }

        let converted = run(&Value::from(set));
        assert_eq!(to_json(&converted), json!([1, null]));
    }

    // -------------------------------------------------------------------------
    // Leaves

    #[test]
    fn views_pass_through() {
        let views = [
            TypedArray::Uint8(vec![1, 2, 3]),
            TypedArray::Uint16(vec![1, 2, 3]),
            TypedArray::Uint32(vec![1, 2, 3]),
            TypedArray::Int16(vec![1, 2, 3]),
            TypedArray::Int32(vec![1, 2, 3]),
            TypedArray::Float32(vec![1.0, 2.0, 3.0]),
            TypedArray::Float64(vec![1.0, 2.0, 3.0]),
            TypedArray::Buffer(vec![1, 2, 3]),
        ];
        for view in views {
            let view = Value::from(ObjectRef::new_typed_array(view));
            assert!(run(&view).ptr_eq(&view));
        }
    }

    #[test]
    fn dates_and_patterns_pass_through() {
        let date = Value::from(ObjectRef::new_date(0.0));
        let pattern = Value::from(ObjectRef::new_regexp("a+", "g"));
        assert!(run(&date).ptr_eq(&date));
        assert!(run(&pattern).ptr_eq(&pattern));
    }

    #[test]
    fn opaque_values_become_null() {
        let root = ObjectRef::new_plain();
        root.set("p", ObjectRef::new_promise());
        root.set("ws", ObjectRef::new_weak_set());
        root.set("wm", ObjectRef::new_weak_map());

        let converted = run(&Value::from(root));
        assert_eq!(to_json(&converted), json!({"p": null, "ws": null, "wm": null}));
    }

    // -------------------------------------------------------------------------
    // Plain objects

    fn sample_object() -> ObjectRef {
        let c = ObjectRef::new_plain();
        c.set("x", 1);
        c.set("y", 2);

        let nested = ObjectRef::new_plain();
        nested.set("a", 1);
        nested.set("b", 2);

        let o = ObjectRef::new_plain();
        o.set("a", 123);
        o.set("b", "hello");
        o.set("c", c);
        o.set("d", Value::array([Value::from(1), Value::from(2), Value::from(nested)]));
        o
    }

    #[test]
    fn copies_plain_objects() {
        let source = sample_object();
        let converted = run(&Value::from(source.clone()));
        let snapshot = object(&converted);

        assert!(!snapshot.get("c").unwrap().ptr_eq(&source.get("c").unwrap()));
        assert!(!snapshot.get("d").unwrap().ptr_eq(&source.get("d").unwrap()));

        let expected = serde_json::to_string(&JsonDriver::new(&Value::from(source))).unwrap();
        let actual = serde_json::to_string(&JsonDriver::new(&converted)).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn source_becomes_delegate() {
        let source = ObjectRef::new_plain();
        source.set("x", 1);

        let converted = run(&Value::from(source.clone()));
        let delegate = object(&converted).parent().unwrap();
        assert!(delegate.ptr_eq(&source));
    }

    #[test]
    fn plain_underscore_members_stay_visible() {
        let plain = ObjectRef::new_plain();
        plain.set("_id", 7);
        let bare = ObjectRef::new_bare();
        bare.set("_id", 8);

        assert_eq!(to_json(&run(&Value::from(plain))), json!({"_id": 7}));
        assert_eq!(to_json(&run(&Value::from(bare))), json!({"_id": 8}));
    }

    #[test]
    fn inherited_underscore_members_are_hidden() {
        let proto = ObjectRef::new_plain();
        proto.set("_secret", 1);
        proto.set("shared", 2);

        let child = ObjectRef::new_plain();
        child.set_delegate(Delegate::Object(proto));
        child.set("own", 3);

        let converted = run(&Value::from(child));
        assert_eq!(to_json(&converted), json!({"own": 3, "shared": 2}));
        assert_eq!(object(&converted).get("_secret").unwrap(), Value::from(1));
    }

    #[test]
    fn hidden_values_are_kept_but_not_encoded() {
        let source = ObjectRef::new_plain();
        source.set("u", Value::Undefined);
        source.set("s", Symbol::new("s"));
        source.set("f", crate::value::Function::return_this());
        source.set("n", 1);

        let converted = run(&Value::from(source));
        let snapshot = object(&converted);
        assert!(!snapshot.own_property("s").unwrap().is_enumerable());
        assert!(snapshot.has_own("u"));
        assert_eq!(to_json(&converted), json!({"n": 1}));
    }

    #[test]
    fn shadowed_members_use_the_nearest() {
        let proto = ObjectRef::new_plain();
        proto.set("a", "proto");
        proto.define_getter("b", |_, _| Ok(Value::from("proto getter")));

        let child = ObjectRef::new_plain();
        child.set_delegate(Delegate::Object(proto));
        child.set("a", "own");

        let converted = run(&Value::from(child));
        assert_eq!(to_json(&converted), json!({"a": "own", "b": "proto getter"}));
    }

    #[test]
    fn setter_only_members_read_as_undefined() {
        let source = ObjectRef::new_plain();
        let setter: Setter = Rc::new(|_: &ObjectRef, _: Value| -> Result<(), Exception> { Ok(()) });
        source.define("w", Property::accessor(None, Some(setter)));
        source.set("v", 1);

        let converted = run(&Value::from(source));
        assert!(object(&converted).get("w").unwrap().is_undefined());
        assert_eq!(to_json(&converted), json!({"v": 1}));
    }

    #[test]
    fn shared_references_stay_shared() {
        let shared = ObjectRef::new_plain();
        shared.set("v", 1);

        let root = ObjectRef::new_plain();
        root.set("left", shared.clone());
        root.set("right", shared.clone());
        root.set("list", Value::array([Value::from(shared)]));

        let converted = run(&Value::from(root));
        let snapshot = object(&converted);
        let left = snapshot.get("left").unwrap();
        let right = snapshot.get("right").unwrap();
        let listed = object(&snapshot.get("list").unwrap()).elements().unwrap();

        assert!(left.ptr_eq(&right));
        assert!(left.ptr_eq(&listed[0]));
    }

    #[test]
    fn converting_a_result_returns_it() {
        let source = sample_object();
        let converted = run(&Value::from(source));

        let again = run(&converted);
        assert!(again.ptr_eq(&converted));

        let root = ObjectRef::new_plain();
        root.set("old", converted.clone());
        let wrapped = run(&Value::from(root));
        assert!(object(&wrapped).get("old").unwrap().ptr_eq(&converted));
    }

    #[test]
    fn identity_is_scoped_to_one_call() {
        let source = ObjectRef::new_plain();
        source.set("x", 1);
        let value = Value::from(source);

        let first = run(&value);
        let second = run(&value);
        assert!(!first.ptr_eq(&second));
    }

    // -------------------------------------------------------------------------
    // Errors

    fn sample_error() -> ObjectRef {
        let error = ObjectRef::new_error("hello world");
        error.set("code", "code");
        error
    }

    #[test]
    fn errors_stay_errors() {
        let error = sample_error();
        let converted = run(&Value::from(error.clone()));
        let snapshot = object(&converted);

        assert!(snapshot.is_error());
        assert!(!snapshot.ptr_eq(&error));
        assert!(snapshot.parent().unwrap().ptr_eq(&error));
    }

    #[test]
    fn errors_encode_their_members() {
        let error = sample_error();
        let encoded = to_json(&run(&Value::from(error.clone())));

        assert_eq!(encoded["code"], json!("code"));
        assert_eq!(encoded["message"], json!("hello world"));
        assert_eq!(encoded["name"], json!("Error"));
        let stack = error.get("stack").unwrap();
        assert_eq!(encoded["stack"], json!(stack.as_str().unwrap()));

        assert_eq!(to_json(&Value::from(error)), json!({"code": "code"}));
    }

    // -------------------------------------------------------------------------
    // Classes

    #[test]
    fn captures_getters_at_conversion_time() {
        let n_value = Rc::new(Cell::new(123));

        let base = Class::builder("B")
            .getter("x", |_, _| Ok(Value::from("hello")))
            .build();

        let n = n_value.clone();
        let derived = Class::builder("C")
            .extends(&base)
            .getter("n", move |_, _| Ok(Value::from(n.get())))
            .getter("y", |_, _| {
                let y = ObjectRef::new_plain();
                y.define("a", Property::getter(|_, _| Ok(Value::from(1))).with_enumerable(true));
                Ok(Value::from(y))
            })
            .build();

        let o = derived.instantiate();
        o.set("z", 444);

        let converted = run(&Value::from(o.clone()));
        let t = object(&converted);

        assert!(!t.ptr_eq(&o));
        assert!(t.parent().unwrap().ptr_eq(&o));
        assert_eq!(t.get("n").unwrap(), Value::from(123));
        assert_eq!(t.get("x").unwrap(), Value::from("hello"));
        assert_eq!(object(&t.get("y").unwrap()).get("a").unwrap(), Value::from(1));
        assert_eq!(t.get("z").unwrap(), Value::from(444));

        let expected = json!({"z": 444, "n": 123, "y": {"a": 1}, "x": "hello"});
        assert_eq!(to_json(&converted), expected);

        n_value.set(999);
        assert_eq!(t.get("n").unwrap(), Value::from(123));
        assert_eq!(o.get("n").unwrap(), Value::from(999));
    }

    #[test]
    fn cycles_become_null() {
        let class = Class::builder("C")
            .getter("self", |this, _| Ok(Value::from(this.clone())))
            .getter("www", |this, _| {
                let www = ObjectRef::new_plain();
                www.set("x", this.clone());
                Ok(Value::from(www))
            })
            .build();

        let o = class.instantiate();
        o.set("z", 444);

        let converted = run(&Value::from(o.clone()));
        let t = object(&converted);

        assert!(!t.ptr_eq(&o));
        assert!(t.parent().unwrap().ptr_eq(&o));
        assert_eq!(t.get("z").unwrap(), Value::from(444));
        assert_eq!(to_json(&converted), json!({"self": null, "z": 444, "www": {"x": null}}));
    }

    #[test]
    fn cycle_null_is_not_cached() {
        let a = ObjectRef::new_plain();
        let b = ObjectRef::new_plain();
        a.set("b", b.clone());
        b.set("a", a.clone());

        let root = Value::array([Value::from(a.clone()), Value::from(b.clone())]);
        let converted = run(&root);
        let elements = object(&converted).elements().unwrap();

        let a_snapshot = object(&elements[0]);
        assert!(a_snapshot.get("b").unwrap().ptr_eq(&elements[1]));
        assert!(object(&elements[1]).get("a").unwrap().is_null());
    }

    #[test]
    fn getters_convert_within_the_running_call() {
        let class = Class::builder("Node")
            .getter("me", |this, cx| convert(&Value::from(this.clone()), cx))
            .getter("in_call", |_, cx| Ok(Value::from(cx.is_some())))
            .build();
        let node = class.instantiate();
        node.set("id", 1);

        let converted = run(&Value::from(node.clone()));
        let t = object(&converted);

        assert!(t.get("me").unwrap().is_null());
        assert_eq!(t.get("in_call").unwrap(), Value::from(true));
        assert_eq!(node.get("in_call").unwrap(), Value::from(false));
        assert_eq!(to_json(&converted), json!({"id": 1, "me": null, "in_call": true}));
    }

    #[test]
    fn getters_share_identity_with_the_running_call() {
        let class = Class::builder("Holder")
            .getter("peer", |this, cx| convert(&this.get("_peer")?, cx))
            .build();
        let shared = ObjectRef::new_plain();
        shared.set("v", 7);

        let holder = class.instantiate();
        holder.set("_peer", shared.clone());

        let root = Value::array([Value::from(holder), Value::from(shared.clone())]);
        let converted = run(&root);
        let elements = object(&converted).elements().unwrap();

        let peer = object(&elements[0]).get("peer").unwrap();
        assert!(peer.ptr_eq(&elements[1]));
        assert!(object(&peer).instance_of(&shared));
        assert_eq!(to_json(&converted), json!([{"peer": {"v": 7}}, {"v": 7}]));
    }

    #[test]
    fn class_instances_hide_underscore_members() {
        let class = Class::builder("C")
            .getter("x", |_, _| Ok(Value::from(909)))
            .build();
        let o = class.instantiate();
        o.set("_n", 123);

        let converted = run(&Value::from(o));
        assert_eq!(to_json(&converted), json!({"x": 909}));
        assert_eq!(object(&converted).get("_n").unwrap(), Value::from(123));
    }

    #[test]
    fn to_json_members_are_replaced() {
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let class = Class::builder("C")
            .method("toJSON", move |_, _| {
                c.set(c.get() + 1);
                Ok(Value::from("stale"))
            })
            .build();

        let o = class.instantiate();
        o.set("v", 1);

        let converted = run(&Value::from(o));
        let to_json_member = object(&converted).own_property("toJSON").unwrap();
        assert!(!to_json_member.is_enumerable());

        assert_eq!(to_json(&converted), json!({"v": 1}));
        assert_eq!(calls.get(), 0);
    }

    // -------------------------------------------------------------------------
    // Overrides

    #[test]
    fn override_result_is_used_and_cached() {
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let class = Class::builder("Money")
            .custom(move |this: &ObjectRef, _: &mut Converter| -> Result<Value, Exception> {
                c.set(c.get() + 1);
                let cents = this.get("cents")?.as_number().unwrap_or_default();
                Ok(Value::from(alloc::format!("{:.2}", cents / 100.0)))
            })
            .build();

        let price = class.instantiate();
        price.set("cents", 1250);

        let root = Value::array([Value::from(price.clone()), Value::from(price)]);
        let converted = run(&root);

        assert_eq!(to_json(&converted), json!(["12.50", "12.50"]));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn override_may_convert_itself() {
        let class = Class::builder("Tagged")
            .custom(|this: &ObjectRef, cx: &mut Converter| -> Result<Value, Exception> {
                let snapshot = cx.convert(&Value::from(this.clone()))?;
                let wrapper = ObjectRef::new_plain();
                wrapper.set("tag", "tagged");
                wrapper.set("data", snapshot);
                Ok(Value::from(wrapper))
            })
            .build();

        let o = class.instantiate();
        o.set("v", 1);
        o.set("me", o.clone());

        let converted = run(&Value::from(o));
        assert_eq!(
            to_json(&converted),
            json!({"tag": "tagged", "data": {"v": 1, "me": null}})
        );
    }

    #[test]
    fn nested_conversion_shares_identity() {
        let shared = ObjectRef::new_plain();
        shared.set("v", 1);

        let holder = ObjectRef::new_plain();
        let inner = shared.clone();
        holder.set_custom_serializer(Some(Rc::new(
            move |_: &ObjectRef, cx: &mut Converter| -> Result<Value, Exception> {
                convert(&Value::from(inner.clone()), Some(cx))
            },
        )));

        let root = Value::array([Value::from(shared), Value::from(holder)]);
        let converted = run(&root);
        let elements = object(&converted).elements().unwrap();
        assert!(elements[0].ptr_eq(&elements[1]));
    }

    #[test]
    fn override_failure_propagates_unchanged() {
        let holder = ObjectRef::new_plain();
        holder.set_custom_serializer(Some(Rc::new(
            |_: &ObjectRef, _: &mut Converter| -> Result<Value, Exception> {
                Err(Exception::new("nope"))
            },
        )));

        let root = ObjectRef::new_plain();
        root.set("inner", holder);

        let err = convert(&Value::from(root), None).unwrap_err();
        assert_eq!(err.value(), &Value::from("nope"));
    }

    #[test]
    fn getter_failure_propagates_unchanged() {
        let class = Class::builder("Broken")
            .getter("bad", |_, _| Err(Exception::error("getter failed")))
            .build();
        let o = class.instantiate();

        let err = convert(&Value::from(o), None).unwrap_err();
        let thrown = err.value().as_object().unwrap();
        assert!(thrown.is_error());
        assert_eq!(thrown.get("message").unwrap(), Value::from("getter failed"));
    }

    #[test]
    fn failed_override_can_be_recovered() {
        let failing = ObjectRef::new_plain();
        failing.set_custom_serializer(Some(Rc::new(
            |_: &ObjectRef, _: &mut Converter| -> Result<Value, Exception> {
                Err(Exception::new(0))
            },
        )));

        let holder = ObjectRef::new_plain();
        let target = failing.clone();
        holder.set_custom_serializer(Some(Rc::new(
            move |_: &ObjectRef, cx: &mut Converter| -> Result<Value, Exception> {
                let target = Value::from(target.clone());
                assert!(cx.convert(&target).is_err());
                assert!(cx.convert(&target).is_err());
                Ok(Value::from("recovered"))
            },
        )));

        assert_eq!(run(&Value::from(holder)), Value::from("recovered"));
    }

    #[test]
    fn adapters_skip_overrides() {
        let set = ObjectRef::new_set([Value::from(1)]);
        let adapter = run(&Value::from(set));
        assert!(object(&adapter).custom_serializer().is_some());

        let again = run(&adapter);
        assert!(!again.ptr_eq(&adapter));
        assert!(object(&again).is_collection_adapter());
        assert_eq!(object(&again).entries(), object(&adapter).entries());
    }

    #[test]
    fn converter_reports_progress() {
        let mut cx = Converter::new();
        let source = ObjectRef::new_plain();
        source.set("v", 1);

        let converted = cx.convert(&Value::from(source.clone())).unwrap();
        assert_eq!(cx.len(), 1);
        assert!(cx.converted(&source).unwrap().ptr_eq(&converted));
        assert!(!cx.is_visiting(&source));
    }

    // -------------------------------------------------------------------------
    // SerializableClass

    fn serializable_sample(with_private: bool) -> ObjectRef {
        let class = Class::builder("C")
            .extends(&SerializableClass::class())
            .getter("x", |_, _| Ok(Value::from(909)))
            .build();
        let instance = class.instantiate();
        if with_private {
            instance.set("_n", 123);
        }
        instance
    }

    #[test]
    fn serializable_class_through_convert() {
        let converted = run(&Value::from(serializable_sample(false)));
        assert_eq!(to_json(&converted), json!({"x": 909}));
    }

    #[test]
    fn serializable_class_through_to_json() {
        let encoded = to_json(&Value::from(serializable_sample(false)));
        assert_eq!(encoded, json!({"x": 909}));
    }

    #[test]
    fn serializable_class_hides_private_members() {
        let encoded = to_json(&Value::from(serializable_sample(true)));
        assert_eq!(encoded, json!({"x": 909}));

        let text: String = serde_json::to_string(&JsonDriver::new(&Value::from(
            serializable_sample(true),
        )))
        .unwrap();
        assert_eq!(text, r#"{"x":909}"#);
    }
}
