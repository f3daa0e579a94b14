use core::fmt::Display;
use serde_core::ser::Error;

crate::cfg::debug! {
    std::thread_local! {
        pub(super) static MEMBER_PATH: core::cell::RefCell<crate::path::MemberPath> =
            const { core::cell::RefCell::new(crate::path::MemberPath::new()) };
    }
}

/// A helper function for generating a custom serialization error message.
///
/// This function should be preferred over [`Error::custom`] as it will include
/// the path of the member being encoded when the `debug` configuration is on.
#[inline]
pub(super) fn make_custom_error<E: Error>(msg: impl Display) -> E {
    crate::cfg::debug! {
        if {
            MEMBER_PATH.with_borrow(|path|
                E::custom(format_args!("{msg} (at `{path}`)"))
            )
        } else {
            E::custom(msg)
        }
    }
}
