use alloc::vec::Vec;

/// A fixed-width numeric view over binary data.
///
/// Views are leaf values: the converter hands them through unchanged.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedArray {
    Int8(Vec<i8>),
    Uint8(Vec<u8>),
    Uint8Clamped(Vec<u8>),
    Int16(Vec<i16>),
    Uint16(Vec<u16>),
    Int32(Vec<i32>),
    Uint32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    /// A byte buffer. Encodes as `{"type":"Buffer","data":[..]}`.
    Buffer(Vec<u8>),
}

impl TypedArray {
    /// The name of the view type, e.g. `Uint8Array`.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Int8(_) => "Int8Array",
            Self::Uint8(_) => "Uint8Array",
            Self::Uint8Clamped(_) => "Uint8ClampedArray",
            Self::Int16(_) => "Int16Array",
            Self::Uint16(_) => "Uint16Array",
            Self::Int32(_) => "Int32Array",
            Self::Uint32(_) => "Uint32Array",
            Self::Float32(_) => "Float32Array",
            Self::Float64(_) => "Float64Array",
            Self::Buffer(_) => "Buffer",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Int8(v) => v.len(),
            Self::Uint8(v) | Self::Uint8Clamped(v) | Self::Buffer(v) => v.len(),
            Self::Int16(v) => v.len(),
            Self::Uint16(v) => v.len(),
            Self::Int32(v) => v.len(),
            Self::Uint32(v) => v.len(),
            Self::Float32(v) => v.len(),
            Self::Float64(v) => v.len(),
        }
    }

    /// Reads element `index` as a number.
    pub fn get(&self, index: usize) -> Option<f64> {
        match self {
            Self::Int8(v) => v.get(index).map(|&n| n as f64),
            Self::Uint8(v) | Self::Uint8Clamped(v) | Self::Buffer(v) => {
                v.get(index).map(|&n| n as f64)
            }
            Self::Int16(v) => v.get(index).map(|&n| n as f64),
            Self::Uint16(v) => v.get(index).map(|&n| n as f64),
            Self::Int32(v) => v.get(index).map(|&n| n as f64),
            Self::Uint32(v) => v.get(index).map(|&n| n as f64),
            Self::Float32(v) => v.get(index).map(|&n| n as f64),
            Self::Float64(v) => v.get(index).copied(),
        }
    }

    /// Iterates over the elements as numbers.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).filter_map(|index| self.get(index))
    }
}
