//! Schema resolution for heterogeneous survey exports.
//!
//! Survey forms are revised between deployments, so the same logical concept
//! ("the LGA", "the household head's age") appears under several literal
//! field names. This crate keeps the candidate names for every concept in one
//! place ([`fields`]), lets a deployment override them ([`FieldCatalog`]), and
//! resolves a concept against the fields actually present in a record set
//! ([`SchemaResolver`]).

pub mod catalog;
pub mod error;
pub mod fields;
pub mod resolver;
pub mod utils;

pub use catalog::FieldCatalog;
pub use error::{MapError, Result};
pub use fields::LogicalField;
pub use resolver::{FieldSuggestion, SchemaResolver};
pub use utils::{contains_ignore_case, normalize_text, title_case};
