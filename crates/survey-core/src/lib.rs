//! Aggregates derived from household submissions.
//!
//! Everything here is recomputed from a record set on demand and never
//! mutates its input.

pub mod access;
pub mod alerts;
pub mod coverage;
pub mod distribution;
pub mod error;
pub mod filter;
pub mod metrics;

pub use access::AccessTable;
pub use alerts::{AlertLevel, QualityAlert, data_quality_alerts};
pub use coverage::{aggregate_coverage, canonical_code, coverage_for};
pub use distribution::{
    Tally, TOP_WARDS, region_distribution, status_distribution, tally_field, timeline,
    ward_distribution,
};
pub use error::{CoreError, Result};
pub use filter::{ALL_OPTION, FilterOptions, RecordFilter, apply_scope};
pub use metrics::compute_metrics;
