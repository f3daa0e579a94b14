//! Converted forms of sets and maps.
//!
//! Adapters keep the membership rules of the collection they replace. Set
//! members are converted, map keys are kept as they are and map values are
//! converted. Encoders render a set adapter as an array and a map adapter as
//! an object, see [`JsonDriver`](crate::JsonDriver).

use crate::Exception;
use crate::convert::Converter;
use crate::value::{Collection, Object, ObjectKind, ObjectRef};

pub(super) fn serializable_set(
    source: &ObjectRef,
    cx: &mut Converter,
) -> Result<ObjectRef, Exception> {
    let mut members = Collection::new();
    let members_in = source.entries().unwrap_or_default();
    for (index, (member, _)) in members_in.into_iter().enumerate() {
        members.add(cx.convert_element(index, &member)?);
    }
    Ok(ObjectRef::new(Object::new(ObjectKind::SerializableSet(members))))
}

pub(super) fn serializable_map(
    source: &ObjectRef,
    cx: &mut Converter,
) -> Result<ObjectRef, Exception> {
    let mut entries = Collection::new();
    let entries_in = source.entries().unwrap_or_default();
    for (index, (key, value)) in entries_in.into_iter().enumerate() {
        let value = cx.convert_element(index, &value)?;
        entries.insert(key, value);
    }
    Ok(ObjectRef::new(Object::new(ObjectKind::SerializableMap(entries))))
}
