use serde_core::ser::SerializeMap;
use serde_core::{Serialize, Serializer};

use super::driver::{Encoding, JsonNumber, ValueSerializer};
use super::error_utils::make_custom_error;
use super::to_json::{Key, resolve};

crate::cfg::debug! {
    use super::error_utils::MEMBER_PATH;
    use crate::path::Segment;
}

use crate::value::{ObjectRef, TypedArray};

/// A serializer for the own enumerable members of an object.
pub(super) struct ObjectSerializer<'a> {
    pub object: &'a ObjectRef,
    pub encoding: &'a Encoding,
}

impl Serialize for ObjectSerializer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let members = self.object.own_properties();

        let mut state = serializer.serialize_map(None)?;
        for (name, property) in members {
            if !property.is_enumerable() {
                continue;
            }

            crate::cfg::debug! {
                MEMBER_PATH.with_borrow_mut(|path| path.push(Segment::Member(name.clone())));
            }

            let value = property.read(self.object).map_err(make_custom_error)?;
            if let Some(resolved) = resolve(&value, Key::Member(&name))? {
                state.serialize_entry(
                    &*name,
                    &ValueSerializer {
                        value: &resolved.value,
                        origin: resolved.origin.as_ref(),
                        encoding: self.encoding,
                    },
                )?;
            }

            crate::cfg::debug! {
                MEMBER_PATH.with_borrow_mut(|path| path.pop());
            }
        }
        state.end()
    }
}

/// A serializer for typed array elements, keyed by index.
pub(super) struct TypedArraySerializer<'a> {
    pub view: &'a TypedArray,
}

impl Serialize for TypedArraySerializer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(Some(self.view.len()))?;
        for (index, element) in self.view.iter().enumerate() {
            state.serialize_entry(&index, &JsonNumber(element))?;
        }
        state.end()
    }
}
