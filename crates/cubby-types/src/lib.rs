//! Foundation types for the cubby object depot.
//!
//! This crate provides the core record type shared by every other cubby
//! crate: the stored [`Object`] and its [`ObjectKey`] identifier.

pub mod object;

pub use object::{Object, ObjectKey};
