#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use vc_cfg as cfg;
pub use vc_jsonify as jsonify;
pub use vc_utils as utils;
