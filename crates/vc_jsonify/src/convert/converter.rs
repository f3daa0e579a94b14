use alloc::rc::Rc;
use alloc::vec::Vec;

use vc_utils::hash::{HashMap, HashSet};

use super::adapter::{serializable_map, serializable_set};
use super::custom::ReturnSelf;

crate::cfg::debug! {
    use crate::path::{MemberPath, Segment};
}

use crate::Exception;
use crate::value::{Delegate, Function, ObjectId, ObjectKind, ObjectRef, Property, Value};

crate::cfg::debug! {
    std::thread_local! {
        pub(super) static MEMBER_PATH: core::cell::RefCell<MemberPath> =
            const { core::cell::RefCell::new(MemberPath::new()) };
    }
}

/// A result produced during the current call.
///
/// Holds the source so its address, and with it the [`ObjectId`], cannot be
/// reused before the call ends.
struct Converted {
    _source: ObjectRef,
    result: Value,
}

/// Call-scoped conversion state.
///
/// A `Converter` lives for one top-level [`convert`](super::convert) call and
/// is handed to every override and captured getter that runs during it.
/// Nested conversions that go through it resolve shared objects and cycles
/// against the same state as the rest of the graph.
///
/// The state has three parts:
///
/// - the identity map from source objects to their results, which makes two
///   references to one object convert to one result;
/// - the objects whose override is running, which are walked by default when
///   their override converts them again;
/// - the objects being walked, a reference back to one of them is a cycle and
///   converts to `null`.
pub struct Converter {
    converted: HashMap<ObjectId, Converted>,
    customizing: HashSet<ObjectId>,
    visiting: HashSet<ObjectId>,
}

impl Converter {
    /// Creates a converter without state.
    #[inline]
    pub fn new() -> Self {
        Self {
            converted: HashMap::default(),
            customizing: HashSet::default(),
            visiting: HashSet::default(),
        }
    }

    /// Converts a value within this call.
    ///
    /// Values other than objects are returned unchanged.
    pub fn convert(&mut self, value: &Value) -> Result<Value, Exception> {
        match value {
            Value::Object(object) => self.convert_object(object),
            _ => Ok(value.clone()),
        }
    }

    /// Returns the result already produced for `object` during this call.
    #[inline]
    pub fn converted(&self, object: &ObjectRef) -> Option<&Value> {
        self.converted.get(&object.id()).map(|c| &c.result)
    }

    /// Returns `true` while `object` is being walked.
    #[inline]
    pub fn is_visiting(&self, object: &ObjectRef) -> bool {
        self.visiting.contains(&object.id())
    }

    /// Number of objects converted so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.converted.len()
    }

    fn convert_object(&mut self, input: &ObjectRef) -> Result<Value, Exception> {
        let id = input.id();
        if let Some(done) = self.converted.get(&id) {
            return Ok(done.result.clone());
        }

        if !self.customizing.contains(&id)
            && !input.is_collection_adapter()
            && let Some(custom) = input.custom_serializer()
        {
            log::trace!("running the override of {input:?}");
            self.customizing.insert(id);
            let result = custom.to_serializable(input, self);
            self.customizing.remove(&id);

            let result = result?;
            self.remember(input, result.clone());
            return Ok(result);
        }

        let leaf = match input.borrow().kind() {
            ObjectKind::Promise | ObjectKind::WeakSet | ObjectKind::WeakMap => Some(Value::Null),
            ObjectKind::Date(_) | ObjectKind::TypedArray(_) | ObjectKind::RegExp { .. } => {
                Some(Value::Object(input.clone()))
            }
            _ => None,
        };
        if let Some(leaf) = leaf {
            return Ok(leaf);
        }

        if !self.visiting.insert(id) {
            log::trace!("closing the cycle at {input:?}");
            return Ok(Value::Null);
        }
        let result = self.walk(input);
        self.visiting.remove(&id);

        let result = result?;
        result.set_custom_serializer(Some(ReturnSelf::shared()));
        let result = Value::Object(result);
        self.remember(input, result.clone());
        Ok(result)
    }

    #[inline]
    fn remember(&mut self, source: &ObjectRef, result: Value) {
        let converted = Converted {
            _source: source.clone(),
            result,
        };
        self.converted.insert(source.id(), converted);
    }

    fn walk(&mut self, input: &ObjectRef) -> Result<ObjectRef, Exception> {
        if let Some(elements) = input.elements() {
            let mut converted = Vec::with_capacity(elements.len());
            for (index, element) in elements.iter().enumerate() {
                converted.push(self.convert_element(index, element)?);
            }
            return Ok(ObjectRef::new_array(converted));
        }
        if input.is_set() {
            return serializable_set(input, self);
        }
        if input.is_map() {
            return serializable_map(input, self);
        }
        self.capture_members(input)
    }

    /// Captures the members of `input` and of its delegates into a snapshot
    /// delegating to `input`.
    fn capture_members(&mut self, input: &ObjectRef) -> Result<ObjectRef, Exception> {
        let is_instance = matches!(input.delegate(), Delegate::Object(_));
        let snapshot = ObjectRef::new_bare();
        let mut seen = HashSet::<Rc<str>>::default();

        for holder in input.chain() {
            let is_own = holder.ptr_eq(input);
            for (name, property) in holder.own_properties() {
                if !seen.insert(name.clone()) {
                    continue;
                }

                crate::cfg::debug! {
                    MEMBER_PATH.with_borrow_mut(|path| path.push(Segment::Member(name.clone())));
                }
                let value = property.read_with(input, self)?;
                let value = self.convert(&value)?;
                crate::cfg::debug! {
                    MEMBER_PATH.with_borrow_mut(MemberPath::pop);
                }

                let enumerable = is_visible(&name, &value, is_own, is_instance);
                snapshot.define(name, Property::data(value, enumerable));
            }
        }

        if seen.contains("toJSON") {
            let to_json = Value::from(Function::return_this());
            snapshot.define("toJSON", Property::data(to_json, false));
        }

        snapshot.set_delegate(Delegate::Object(input.clone()));
        Ok(snapshot)
    }

    pub(super) fn convert_element(
        &mut self,
        index: usize,
        element: &Value,
    ) -> Result<Value, Exception> {
        crate::cfg::debug! {
            if {
                MEMBER_PATH.with_borrow_mut(|path| path.push(Segment::Index(index)));
                let converted = self.convert(element)?;
                MEMBER_PATH.with_borrow_mut(MemberPath::pop);
                Ok(converted)
            } else {
                let _ = index;
                self.convert(element)
            }
        }
    }
}

impl Default for Converter {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Decides whether a captured member shows up when the snapshot is encoded.
///
/// `undefined`, symbols and functions never do. Members named `_like_this`
/// are hidden when inherited, and on class instances also when owned.
fn is_visible(name: &str, value: &Value, is_own: bool, is_instance: bool) -> bool {
    if matches!(value, Value::Undefined | Value::Symbol(_) | Value::Function(_)) {
        return false;
    }
    !(name.starts_with('_') && (!is_own || is_instance))
}

#[cfg(test)]
mod tests {
    use super::is_visible;
    use crate::value::{Function, Symbol, Value};

    #[test]
    fn visibility_policy() {
        let n = Value::from(1);
        assert!(is_visible("a", &n, true, true));
        assert!(is_visible("a", &n, false, true));
        assert!(is_visible("_a", &n, true, false));
        assert!(!is_visible("_a", &n, false, false));
        assert!(!is_visible("_a", &n, true, true));

        assert!(!is_visible("a", &Value::Undefined, true, false));
        assert!(!is_visible("a", &Value::from(Symbol::new("s")), true, false));
        assert!(!is_visible("a", &Value::from(Function::return_this()), true, false));
        assert!(is_visible("a", &Value::Null, true, false));
    }
}
