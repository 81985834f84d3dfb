pub mod access;
pub mod coverage;
pub mod issue;
pub mod metrics;
pub mod reference;

pub use access::AccessScope;
pub use coverage::{CoverageRow, CoverageStatus, CoverageSummary, coverage_percentage};
pub use issue::{IssueKind, IssueSeverity, QcIssue, SourceRow};
pub use metrics::{SubmissionMetrics, ValidationStatus};
pub use reference::CommunityEntry;
