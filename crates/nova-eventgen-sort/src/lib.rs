//! Property ordering.
//!
//! The order produced here drives constructor parameters, factory parameters and member
//! emission alike, so it has to be a pure function of the property set and the policy.

#![forbid(unsafe_code)]

mod policy;
mod sorter;

pub use crate::policy::{SortPolicy, SortPolicyError, DEFAULT_PAIRED_PREFIX};
pub use crate::sorter::{sort_properties, sort_position};
