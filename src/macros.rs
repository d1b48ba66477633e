// src/macros.rs

/// `s!()` → empty `String`, `s!(x)` → `String::from(x)`.
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Compile a regex literal once and hand out a `&'static Regex`.
///
/// Only literals are accepted, so the pattern is fixed at compile time and the
/// `expect` can fire only on a typo in source. Each call site's module has unit
/// tests that run its pattern, which turns such a typo into a test failure.
#[macro_export]
macro_rules! re {
    ($pat:literal) => {{
        static RE: ::std::sync::OnceLock<::regex::Regex> = ::std::sync::OnceLock::new();
        RE.get_or_init(|| ::regex::Regex::new($pat).expect(concat!("bad regex: ", $pat)))
    }};
}
