#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Compilation config

/// Some macros used for compilation control.
pub mod cfg {
    vc_cfg::define_alias! {
        #[cfg(all(debug_assertions, feature = "debug"))] => debug,
    }
}

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;

crate::cfg::debug! {
    mod path;
}

pub mod class;
pub mod convert;
pub mod json;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use class::{Class, ClassBuilder, SerializableClass};
pub use convert::{Converter, CustomSerializable, convert};
pub use error::Exception;
pub use json::JsonDriver;
