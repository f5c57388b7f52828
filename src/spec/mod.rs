// src/spec/mod.rs

//! Job specifications.
//!
//! - [`value`] defines [`SpecValue`], the dynamically shaped input.
//! - [`validate`] turns a `SpecValue` into normalized [`JobEntry`]s or fails
//!   with `InvalidJobObject`.

pub mod validate;
pub mod value;

pub use validate::{AFTER_KEY, JOB_KEY, JobEntry, Jobs, normalize};
pub use value::SpecValue;
