#![doc = include_str!("../README.md")]
#![no_std]

/// Defines configuration aliases as macros.
///
/// Each alias becomes a macro that expands its input when the predicate holds
/// and drops it otherwise. Call it inside a dedicated module so the aliases can
/// be used through a path, e.g. `crate::cfg::debug! { ... }`.
///
/// # Examples
///
/// ```
/// pub mod cfg {
///     vc_cfg::define_alias! {
///         #[cfg(debug_assertions)] => debug,
///         #[cfg(all())] => always,
///     }
/// }
///
/// cfg::always! {
///     fn present() -> u32 { 7 }
/// }
///
/// assert_eq!(present(), 7);
/// assert!(cfg::always!());
///
/// let label = cfg::debug! {
///     if { "debug" } else { "release" }
/// };
/// # let _ = label;
/// ```
#[macro_export]
macro_rules! define_alias {
    ($(#[cfg($meta:meta)] => $alias:ident),* $(,)?) => {
        $(
            #[cfg($meta)]
            #[doc(inline)]
            pub use $crate::enabled as $alias;

            #[cfg(not($meta))]
            #[doc(inline)]
            pub use $crate::disabled as $alias;
        )*
    };
}

/// Expansion of an alias whose predicate holds.
///
/// - `alias!()` evaluates to `true`.
/// - `alias! { if { a } else { b } }` evaluates to `a`.
/// - `alias! { tokens }` expands to `tokens`.
#[doc(hidden)]
#[macro_export]
macro_rules! enabled {
    () => { true };
    (if { $($p:tt)* } else { $($n:tt)* }) => { { $($p)* } };
    ($($p:tt)*) => { $($p)* };
}

/// Expansion of an alias whose predicate does not hold.
///
/// - `alias!()` evaluates to `false`.
/// - `alias! { if { a } else { b } }` evaluates to `b`.
/// - `alias! { tokens }` expands to nothing.
#[doc(hidden)]
#[macro_export]
macro_rules! disabled {
    () => { false };
    (if { $($p:tt)* } else { $($n:tt)* }) => { { $($n)* } };
    ($($p:tt)*) => {};
}
