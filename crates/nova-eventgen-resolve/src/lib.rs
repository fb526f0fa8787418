//! Property resolution.
//!
//! An event interface only declares getter/setter-shaped methods, frequently re-declaring the
//! same logical property in several ancestors with narrower return types. This crate collapses
//! that into one [`Property`] per name: the narrowest override becomes the canonical
//! (constructor/accessor) type and the widest one the storage type.

#![forbid(unsafe_code)]

mod classify;
mod property;
mod resolver;

pub use crate::classify::{classify, MethodRole};
pub use crate::property::Property;
pub use crate::resolver::{resolve_properties, PropertyResolution};
