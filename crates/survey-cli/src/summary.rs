use chrono::NaiveDate;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use survey_core::{AlertLevel, FilterOptions, QualityAlert, Tally};
use survey_model::{
    CommunityEntry, CoverageRow, CoverageStatus, CoverageSummary, IssueSeverity, QcIssue,
    SubmissionMetrics,
};
use survey_validate::QcSummary;

pub fn print_coverage(rows: &[CoverageRow]) {
    let summary = CoverageSummary::from_rows(rows);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("LGA"),
        header_cell("Ward"),
        header_cell("Code"),
        header_cell("Community"),
        header_cell("Planned"),
        header_cell("Actual"),
        header_cell("Coverage %"),
        header_cell("Status"),
    ]);
    apply_wide_table_style(&mut table, 160);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);
    align_column(&mut table, 7, CellAlignment::Center);
    let mut planned = 0u64;
    let mut actual = 0u64;
    for row in rows {
        planned += u64::from(row.planned_households);
        actual += u64::from(row.actual_households);
        table.add_row(vec![
            Cell::new(&row.region),
            Cell::new(&row.ward),
            Cell::new(&row.community_code).fg(Color::Blue),
            Cell::new(&row.community_name),
            Cell::new(row.planned_households),
            Cell::new(row.actual_households),
            Cell::new(format!("{:.1}", row.coverage_percentage)),
            status_cell(row.status),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(format!("{} communities", summary.total_communities))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(planned).add_attribute(Attribute::Bold),
        Cell::new(actual).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
    println!(
        "Complete: {} ({:.1}%)  Partial: {} ({:.1}%)  Not started: {} ({:.1}%)",
        summary.complete,
        summary.share(summary.complete),
        summary.partial,
        summary.share(summary.partial),
        summary.not_started,
        summary.share(summary.not_started),
    );
}

pub fn print_qc(issues: &[QcIssue], summary: &QcSummary, limit: usize) {
    if issues.is_empty() {
        println!("No QC issues found.");
        return;
    }
    println!("{} issues flagged across LGA, Ward and Community", summary.total);
    println!(
        "Age inconsistencies: {}  Duplicates: {}  Other: {}",
        summary.age_inconsistencies, summary.duplicates, summary.other
    );
    println!(
        "Priority  High: {}  Medium: {}  Low: {}",
        summary.high, summary.medium, summary.low
    );

    let mut kinds = Table::new();
    kinds.set_header(vec![header_cell("Issue Type"), header_cell("Count")]);
    apply_table_style(&mut kinds);
    align_column(&mut kinds, 1, CellAlignment::Right);
    for (label, count) in &summary.by_kind {
        kinds.add_row(vec![Cell::new(label), Cell::new(count)]);
    }
    println!("{kinds}");

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("LGA"),
        header_cell("Ward"),
        header_cell("Community"),
        header_cell("Household ID"),
        header_cell("Status"),
        header_cell("Priority"),
        header_cell("Issue Type"),
        header_cell("Description"),
    ]);
    apply_wide_table_style(&mut table, 200);
    align_column(&mut table, 5, CellAlignment::Center);
    for issue in issues.iter().take(limit) {
        table.add_row(vec![
            optional_cell(issue.region.as_deref()),
            optional_cell(issue.ward.as_deref()),
            optional_cell(issue.community.as_deref()),
            optional_cell(issue.household_id.as_deref()),
            optional_cell(issue.validation_status.as_deref()),
            severity_cell(issue.severity()),
            Cell::new(issue.kind.label()),
            Cell::new(&issue.description),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
    if issues.len() > limit {
        println!("... {} more (raise --limit or use --export)", issues.len() - limit);
    }
}

pub fn print_metrics(metrics: &SubmissionMetrics, alerts: &[QualityAlert]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows: [(&str, String); 9] = [
        ("Total submissions", metrics.total_submissions.to_string()),
        ("LGAs covered", metrics.distinct_regions.to_string()),
        ("Wards covered", metrics.distinct_wards.to_string()),
        ("Communities covered", metrics.distinct_communities.to_string()),
        ("Enumerators", metrics.distinct_enumerators.to_string()),
        ("Approved", metrics.approved.to_string()),
        ("Pending", metrics.pending.to_string()),
        ("Rejected", metrics.rejected.to_string()),
        ("Total eligible children", metrics.total_eligible.to_string()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    println!("{table}");

    if alerts.is_empty() {
        return;
    }
    println!();
    let mut table = Table::new();
    table.set_header(vec![header_cell("Level"), header_cell("Alert")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for alert in alerts {
        let level = match alert.level {
            AlertLevel::Warning => Cell::new("WARN").fg(Color::Yellow),
            AlertLevel::Danger => Cell::new("DANGER")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        };
        table.add_row(vec![level, Cell::new(&alert.message)]);
    }
    println!("{table}");
}

pub fn print_tallies(title: &str, tallies: &[Tally]) {
    if tallies.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell(title), header_cell("Submissions")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for tally in tallies {
        table.add_row(vec![Cell::new(&tally.label), Cell::new(tally.count)]);
    }
    println!();
    println!("{table}");
}

pub fn print_timeline(days: &[(NaiveDate, usize)]) {
    if days.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Date"), header_cell("Submissions")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (day, count) in days {
        table.add_row(vec![Cell::new(day.format("%Y-%m-%d")), Cell::new(count)]);
    }
    println!();
    println!("{table}");
}

pub fn print_communities(entries: &[&CommunityEntry]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("LGA"),
        header_cell("Ward"),
        header_cell("Code"),
        header_cell("Community"),
        header_cell("Planned HH"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    let mut planned = 0u64;
    for entry in entries {
        planned += u64::from(entry.planned_households);
        table.add_row(vec![
            Cell::new(&entry.region),
            Cell::new(&entry.ward),
            Cell::new(&entry.community_code).fg(Color::Blue),
            Cell::new(&entry.community_name),
            Cell::new(entry.planned_households),
        ]);
    }
    println!("{table}");
    println!("{} communities, {planned} planned households", entries.len());
}

/// One row per concept: resolved field, or near misses when unresolved.
pub fn print_columns(sheet: &str, rows: &[(String, Option<String>, Vec<String>)]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Concept"),
        header_cell("Field"),
        header_cell("Did you mean"),
    ]);
    apply_table_style(&mut table);
    for (concept, field, suggestions) in rows {
        let field_cell = match field {
            Some(name) => Cell::new(name).fg(Color::Green),
            None => Cell::new("not found").fg(Color::Red),
        };
        let suggestion_cell = if suggestions.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(suggestions.join(", ")).fg(Color::Yellow)
        };
        table.add_row(vec![Cell::new(concept), field_cell, suggestion_cell]);
    }
    println!("Sheet: {sheet}");
    println!("{table}");
}

/// Values the record filters accept for the loaded export.
pub fn print_filter_options(options: &FilterOptions) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Filter"), header_cell("Values")]);
    apply_table_style(&mut table);
    let listed = |values: &[String]| {
        if values.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(values.join(", "))
        }
    };
    table.add_row(vec![Cell::new("--region"), listed(&options.regions)]);
    table.add_row(vec![Cell::new("--ward"), listed(&options.wards)]);
    table.add_row(vec![Cell::new("--community"), listed(&options.communities)]);
    table.add_row(vec![Cell::new("--status"), listed(&options.statuses)]);
    let dates = match options.date_range {
        Some((first, last)) => Cell::new(format!(
            "{} to {}",
            first.format("%Y-%m-%d"),
            last.format("%Y-%m-%d")
        )),
        None => dim_cell("-"),
    };
    table.add_row(vec![Cell::new("--from / --to"), dates]);
    println!();
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_wide_table_style(table: &mut Table, width: u16) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(width);
    if table.column_count() >= 8 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(14)),
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::UpperBoundary(Width::Fixed(24)),
            ColumnConstraint::UpperBoundary(Width::Fixed(28)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Fixed(30)),
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: CoverageStatus) -> Cell {
    let color = match status {
        CoverageStatus::Complete => Color::Green,
        CoverageStatus::Partial => Color::Yellow,
        CoverageStatus::NotStarted => Color::Red,
    };
    Cell::new(status.label()).fg(color)
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::High => Cell::new("HIGH")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        IssueSeverity::Medium => Cell::new("MEDIUM").fg(Color::Yellow),
        IssueSeverity::Low => Cell::new("LOW").fg(Color::DarkGrey),
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(text) => Cell::new(text),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
