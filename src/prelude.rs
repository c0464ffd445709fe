//! Derive macros shared by the value types.

pub use derive_more::{Deref, Display};
