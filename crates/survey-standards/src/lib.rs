#![deny(unsafe_code)]

//! Reference Data Provider.
//!
//! The community table is compiled into the binary and parsed once at
//! startup. A deployment may point at its own tab-separated file with the same
//! header instead.

pub mod error;
pub mod loader;
pub mod table;

pub use crate::error::{Result, StandardsError};
pub use crate::loader::{
    COL_COMMUNITY_CODE, COL_COMMUNITY_NAME, COL_PLANNED, COL_REGION, COL_WARD, EMBEDDED_TABLE,
    load_embedded, load_from_path, parse_table,
};
pub use crate::table::ReferenceTable;
