//! Planned-versus-actual coverage types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reference::CommunityEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageStatus {
    Complete,
    Partial,
    NotStarted,
}

impl CoverageStatus {
    /// Classify a community: complete once the plan is met, not started with
    /// zero submissions, partial otherwise.
    pub fn classify(actual: u32, planned: u32) -> Self {
        if actual >= planned {
            Self::Complete
        } else if actual > 0 {
            Self::Partial
        } else {
            Self::NotStarted
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Complete => "Complete",
            Self::Partial => "Partial",
            Self::NotStarted => "Not Started",
        }
    }
}

impl fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `actual / planned * 100`, rounded to one decimal place.
///
/// Returns 0.0 when nothing was planned.
pub fn coverage_percentage(actual: u32, planned: u32) -> f64 {
    if planned == 0 {
        return 0.0;
    }
    let raw = f64::from(actual) / f64::from(planned) * 100.0;
    (raw * 10.0).round() / 10.0
}

/// Coverage of one reference community.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageRow {
    pub community_code: String,
    pub community_name: String,
    pub region: String,
    pub ward: String,
    pub planned_households: u32,
    pub actual_households: u32,
    pub coverage_percentage: f64,
    pub status: CoverageStatus,
}

impl CoverageRow {
    pub fn from_entry(entry: &CommunityEntry, actual_households: u32) -> Self {
        Self {
            community_code: entry.community_code.clone(),
            community_name: entry.community_name.clone(),
            region: entry.region.clone(),
            ward: entry.ward.clone(),
            planned_households: entry.planned_households,
            actual_households,
            coverage_percentage: coverage_percentage(
                actual_households,
                entry.planned_households,
            ),
            status: CoverageStatus::classify(actual_households, entry.planned_households),
        }
    }
}

/// Status tallies over a set of coverage rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageSummary {
    pub total_communities: usize,
    pub complete: usize,
    pub partial: usize,
    pub not_started: usize,
}

impl CoverageSummary {
    pub fn from_rows(rows: &[CoverageRow]) -> Self {
        let mut summary = Self {
            total_communities: rows.len(),
            ..Self::default()
        };
        for row in rows {
            match row.status {
                CoverageStatus::Complete => summary.complete += 1,
                CoverageStatus::Partial => summary.partial += 1,
                CoverageStatus::NotStarted => summary.not_started += 1,
            }
        }
        summary
    }

    /// Share of `count` in the total, in percent with one decimal.
    pub fn share(&self, count: usize) -> f64 {
        if self.total_communities == 0 {
            return 0.0;
        }
        let raw = count as f64 / self.total_communities as f64 * 100.0;
        (raw * 10.0).round() / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_boundaries() {
        assert_eq!(CoverageStatus::classify(57, 57), CoverageStatus::Complete);
        assert_eq!(CoverageStatus::classify(60, 57), CoverageStatus::Complete);
        assert_eq!(CoverageStatus::classify(30, 57), CoverageStatus::Partial);
        assert_eq!(CoverageStatus::classify(0, 57), CoverageStatus::NotStarted);
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        assert_eq!(coverage_percentage(57, 57), 100.0);
        assert_eq!(coverage_percentage(30, 57), 52.6);
        assert_eq!(coverage_percentage(0, 57), 0.0);
        assert_eq!(coverage_percentage(1, 3), 33.3);
    }

    #[test]
    fn summary_counts_statuses() {
        let entry = |code: &str, planned| CommunityEntry {
            region: "kiru".to_string(),
            ward: "baawa".to_string(),
            community_code: code.to_string(),
            community_name: code.to_string(),
            planned_households: planned,
        };
        let rows = vec![
            CoverageRow::from_entry(&entry("1", 10), 10),
            CoverageRow::from_entry(&entry("2", 10), 4),
            CoverageRow::from_entry(&entry("3", 10), 0),
            CoverageRow::from_entry(&entry("4", 10), 0),
        ];
        let summary = CoverageSummary::from_rows(&rows);
        assert_eq!(summary.total_communities, 4);
        assert_eq!(summary.complete, 1);
        assert_eq!(summary.partial, 1);
        assert_eq!(summary.not_started, 2);
        assert_eq!(summary.share(summary.not_started), 50.0);
    }
}
