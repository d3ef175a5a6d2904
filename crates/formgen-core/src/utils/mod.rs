//! Utility types and functions.
//!
//! This module provides:
//! - [`MultiValueDict`]: A dictionary that can hold multiple values per key.
//! - [`text`]: String utility functions (humanize, capfirst, etc.).

mod multi_value_dict;
pub mod text;

pub use multi_value_dict::{FormData, MultiValueDict};
