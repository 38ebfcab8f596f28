//! Scalar wrapper types.
//!
//! These are boundary collaborators of the collection core: `Str` is what
//! [`join`](crate::Collection::join) produces and what the `Text`
//! restriction normalizes raw strings into; `Number` plays the same role
//! for numeric restrictions. Neither carries manipulation helpers beyond
//! what the collection needs.

pub mod number;
pub mod text;

pub use number::Number;
pub use text::Str;
