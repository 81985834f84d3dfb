//! Quality-control rule engine.
//!
//! Each rule lives in its own module under `checks` and is a pure function of
//! the record sets it inspects. A rule whose required fields do not resolve
//! contributes no issues. [`QcEngine`] runs the enabled rules in declaration
//! order and concatenates their output.

mod checks;
pub mod context;
pub mod engine;
pub mod rules;
pub mod summary;
pub mod values;

pub use context::{Location, QcContext};
pub use engine::QcEngine;
pub use rules::{ResidencyAgeBasis, RuleId, RuleSet, RuleSetError};
pub use summary::{IssueFilter, QcSummary};
pub use values::{is_affirmative, is_absent_or_no};
