//! CLI argument definitions for the survey QC tool.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "survey-qc",
    version,
    about = "Household survey coverage and quality-control reports",
    long_about = "Coverage, quality-control and monitoring reports for household survey exports.\n\n\
                  Reads CSV or spreadsheet exports, compares submissions against the planned\n\
                  community targets and flags records that need field verification."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow respondent-level values (identities, codes) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Household coverage per reference community.
    Coverage(DataArgs),

    /// Run the quality-control rules and list flagged records.
    Qc(QcArgs),

    /// Submission metrics, data-quality alerts and distributions.
    Metrics(DataArgs),

    /// List the reference communities and their planned households.
    Communities(CommunitiesArgs),

    /// Show which export field each survey concept resolves to.
    Columns(ColumnsArgs),
}

/// Input selection and record filters shared by the data commands.
#[derive(Args)]
pub struct DataArgs {
    /// Survey export (.csv, .xlsx, .xls, .ods); overrides the profile's source path.
    #[arg(long = "input", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Deployment profile (TOML). Falls back to $SURVEY_QC_CONFIG.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Name of the household sheet in a spreadsheet export.
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Identity from the access table; omitted means unrestricted.
    #[arg(long = "user", value_name = "IDENTITY")]
    pub user: Option<String>,

    /// Only records of this region (LGA).
    #[arg(long = "region")]
    pub region: Option<String>,

    /// Only records of this ward.
    #[arg(long = "ward")]
    pub ward: Option<String>,

    /// Only records of this community name.
    #[arg(long = "community")]
    pub community: Option<String>,

    /// Only records with this validation status.
    #[arg(long = "status")]
    pub status: Option<String>,

    /// Earliest submission date (YYYY-MM-DD).
    #[arg(long = "from", value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Latest submission date (YYYY-MM-DD).
    #[arg(long = "to", value_name = "DATE")]
    pub to: Option<NaiveDate>,
}

#[derive(Args)]
pub struct QcArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Write the (filtered) issue list as CSV; without a path the file is
    /// `qc_report_<date>.csv` in the working directory.
    #[arg(long = "export", value_name = "PATH", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,

    /// Write `qc_report.json` into this directory.
    #[arg(long = "json", value_name = "DIR")]
    pub json: Option<PathBuf>,

    /// Only issues of these types, by label (e.g. "HH Duplicate").
    #[arg(long = "issue-type", value_name = "LABEL")]
    pub issue_types: Vec<String>,

    /// Maximum issues printed in the terminal table.
    #[arg(long = "limit", default_value_t = 50)]
    pub limit: usize,

    /// Exit with status 1 when any high-priority issue is found.
    #[arg(long = "fail-on-issues")]
    pub fail_on_issues: bool,
}

#[derive(Args)]
pub struct CommunitiesArgs {
    /// Deployment profile (TOML). Falls back to $SURVEY_QC_CONFIG.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only communities of this region (LGA).
    #[arg(long = "region")]
    pub region: Option<String>,
}

#[derive(Args)]
pub struct ColumnsArgs {
    /// Survey export; overrides the profile's source path.
    #[arg(long = "input", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Deployment profile (TOML). Falls back to $SURVEY_QC_CONFIG.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Name of the household sheet in a spreadsheet export.
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
