// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // s!() is an empty String
    () => {
        ::std::string::String::new()
    };
    // Any single expression: literals, consts, borrowed strings
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}
