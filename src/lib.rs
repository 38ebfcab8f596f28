#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(clippy::all)]

//! Typed, restrictable primitive wrappers.
//!
//! The core of this crate is [`Collection`], an insertion-ordered
//! map/sequence hybrid with pluggable key/value normalization, validation,
//! optional single-kind restriction, key allow-lists and merge-policy
//! driven combination. [`Str`] and [`Number`] are thin boundary wrappers
//! the collection consumes (through kind restriction) and produces
//! (through [`Collection::join`]).
//!
//! ```
//! use orderly::{Collection, ValueKind, Value};
//!
//! let mut tags = Collection::new();
//! tags.restrict_to(ValueKind::Text)?;
//! tags.set("env", "prod")?;
//! tags.append([42])?; // auto-normalized into a Str
//!
//! assert_eq!(tags.join(","), "prod,42");
//! assert_eq!(tags.search("PROD", false), Some("env".into()));
//! # Ok::<(), orderly::PrimitiveError>(())
//! ```

pub mod collection;
pub mod error;
pub mod key;
pub mod kind;
pub mod scalar;
pub mod value;

pub use collection::{
    Collection, IntoIter, Iter, KeyNormalizer, MergePolicy, Normalizer, Validator, ValueMerger,
};
pub use error::{PrimitiveError, Result};
pub use key::Key;
pub use kind::ValueKind;
pub use scalar::{Number, Str};
pub use value::Value;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{Collection, Key, MergePolicy, PrimitiveError, Result, ValueMerger};
    pub use crate::{Number, Str, Value, ValueKind};
}
