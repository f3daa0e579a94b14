use serde_core::{Serialize, Serializer, ser::SerializeSeq};

use super::driver::{Encoding, ValueSerializer};
use super::to_json::{Key, resolve};

crate::cfg::debug! {
    use super::error_utils::MEMBER_PATH;
    use crate::path::Segment;
}

use crate::value::Value;

/// A serializer for array elements.
pub(super) struct ArraySerializer<'a> {
    pub elements: &'a [Value],
    pub encoding: &'a Encoding,
}

impl Serialize for ArraySerializer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_seq(Some(self.elements.len()))?;
        for (index, element) in self.elements.iter().enumerate() {
            crate::cfg::debug! {
                MEMBER_PATH.with_borrow_mut(|path| path.push(Segment::Index(index)));
            }

            match resolve(element, Key::Index(index))? {
                Some(resolved) => state.serialize_element(&ValueSerializer {
                    value: &resolved.value,
                    origin: resolved.origin.as_ref(),
                    encoding: self.encoding,
                })?,
                None => state.serialize_element(&())?,
            }

            crate::cfg::debug! {
                MEMBER_PATH.with_borrow_mut(|path| path.pop());
            }
        }
        state.end()
    }
}
