// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Label wiring macros
//!
//! With the `profiling` feature disabled every macro expands to nothing.
//!
//! ```rust,ignore
//! fn parse(input: &str) -> Result<Ast, Error> {
//!     scopetime::timed_fn!();            // label "parse", global registry
//!     scopetime::timed_scope!("lexing"); // custom label
//!     // ...
//! }
//!
//! fn main() {
//!     scopetime::profile_run!();         // report printed when main returns
//!     // ...
//! }
//! ```

/// Reduce a `type_name` path of a marker item to the enclosing function name
#[doc(hidden)]
pub fn __function_label(path: &'static str) -> &'static str {
    let mut path = path.strip_suffix("::__scopetime_marker").unwrap_or(path);
    while let Some(outer) = path.strip_suffix("::{{closure}}") {
        path = outer;
    }
    path.rsplit("::").next().unwrap_or(path)
}

/// Name of the enclosing function as a `&'static str`
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn __scopetime_marker() {}
        $crate::__function_label(::std::any::type_name_of_val(&__scopetime_marker))
    }};
}

/// Time the rest of the enclosing block under a custom label
///
/// `timed_scope!("label")` uses the global registry,
/// `timed_scope!(registry, "label")` an explicit one.
#[cfg(feature = "profiling")]
#[macro_export]
macro_rules! timed_scope {
    ($name:expr) => {
        let _scopetime_scope = $crate::global::timer($name);
    };
    ($registry:expr, $name:expr) => {
        let _scopetime_scope = $registry.timer($name);
    };
}

/// Time the rest of the enclosing function under its own name
#[cfg(feature = "profiling")]
#[macro_export]
macro_rules! timed_fn {
    () => {
        let _scopetime_fn = $crate::global::timer($crate::__function_name!());
    };
    ($registry:expr) => {
        let _scopetime_fn = $registry.timer($crate::__function_name!());
    };
}

/// Start the global registry until the end of the enclosing block
///
/// # Panics
///
/// Panics if a registry is already live.
#[cfg(feature = "profiling")]
#[macro_export]
macro_rules! profile_run {
    () => {
        let _scopetime_run = $crate::global::run()
            .unwrap_or_else(|err| panic!("cannot start profiling run: {err}"));
    };
    ($config:expr) => {
        let _scopetime_run = $crate::global::run_with($config)
            .unwrap_or_else(|err| panic!("cannot start profiling run: {err}"));
    };
}

// When profiling is disabled, provide no-op macros
#[cfg(not(feature = "profiling"))]
#[macro_export]
macro_rules! timed_scope {
    ($($args:tt)*) => {
        // Compiles to nothing - zero runtime overhead
    };
}

#[cfg(not(feature = "profiling"))]
#[macro_export]
macro_rules! timed_fn {
    ($($args:tt)*) => {};
}

#[cfg(not(feature = "profiling"))]
#[macro_export]
macro_rules! profile_run {
    ($($args:tt)*) => {};
}
