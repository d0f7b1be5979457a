use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use common::{Granularity, ViewRequest};

pub mod commands;

use commands::{export, report};

#[derive(Parser)]
#[command(name = "mizan")]
#[command(about = "Bookkeeping pivot reports: bank balances, card limits, KMH risk, incomes and expenses")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute a pivot report and print it as JSON
    ///
    /// The report carries the row hierarchy plus per-cell presentation
    /// attributes (editability, heat intensity) for the rendering side.
    Report {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Compute a pivot report and write it as a CSV sheet
    ///
    /// One row per leaf, the parent name only on its first child, and a
    /// trailing grand-total row.
    Export {
        #[command(flatten)]
        view: ViewArgs,

        /// Path of the CSV file to write
        #[arg(short, long)]
        output: String,
    },
}

/// Which source table a pivot is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Table {
    /// Balance/limit/risk snapshots, gap-filled by carry-forward
    Balances,
    /// Income/expense transaction lines, summed per day
    Ledger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GranularityArg {
    Monthly,
    Weekly,
    Yearly,
}

impl From<GranularityArg> for Granularity {
    fn from(granularity: GranularityArg) -> Self {
        match granularity {
            GranularityArg::Monthly => Granularity::Monthly,
            GranularityArg::Weekly => Granularity::Weekly,
            GranularityArg::Yearly => Granularity::Yearly,
        }
    }
}

#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Path to the JSON dataset file
    ///
    /// The dataset holds subjects, status periods, snapshot entries and
    /// transaction records, as dumped by the bookkeeping backend.
    #[arg(short, long, env = "MIZAN_DATASET", default_value = "mizan.json")]
    pub dataset: String,

    /// Which table to pivot
    #[arg(short, long, value_enum, default_value = "balances")]
    pub table: Table,

    /// View granularity
    #[arg(short, long, value_enum, default_value = "monthly")]
    pub granularity: GranularityArg,

    /// Selected year
    #[arg(short, long)]
    pub year: i32,

    /// Selected month (1-12); required for monthly and weekly views
    #[arg(short, long)]
    pub month: Option<u32>,

    /// 1-based week slice within the month; weekly views only
    #[arg(short, long)]
    pub week: Option<u32>,

    /// Case-insensitive text filter over row labels
    #[arg(short, long)]
    pub search: Option<String>,

    /// Override "today" (YYYY-MM-DD), mainly for reproducible runs
    #[arg(long, env = "MIZAN_TODAY")]
    pub today: Option<NaiveDate>,
}

impl ViewArgs {
    pub fn to_request(&self) -> ViewRequest {
        ViewRequest {
            granularity: self.granularity.into(),
            year: self.year,
            month: self.month,
            week_index: self.week,
            search_text: self.search.clone(),
        }
    }

    /// The reference date for future locking and carry-forward capping.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Report { view } => {
                report::report(&view)?;
            }
            Commands::Export { view, output } => {
                export::export(&view, &output)?;
            }
        }
        Ok(())
    }
}
