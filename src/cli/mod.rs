use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::report;
use crate::sheet::XlsxSink;
use crate::sources::{CalendarHistoryWindow, JsonCostSource};

/// Cost-variation spreadsheet reports for cloud billing accounts
#[derive(Parser)]
#[command(name = "costsheet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the cost-variation workbook from a cost-diff document
    Generate {
        /// Cost-diff JSON document (accounts + per-granularity costs)
        #[arg(short, long)]
        input: PathBuf,

        /// Output xlsx path
        #[arg(short, long)]
        output: PathBuf,

        /// Anchor date; omitted means the default history window
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Generate {
                input,
                output,
                date,
            } => {
                let source = JsonCostSource::from_path(&input)?;
                let accounts = source.accounts().to_vec();
                let modules = report::default_modules();
                let mut sink = XlsxSink::new();
                report::generate(
                    &modules,
                    &accounts,
                    date,
                    &source,
                    &CalendarHistoryWindow::new(),
                    &mut sink,
                )?;
                sink.save(&output)?;
                println!(
                    "Wrote {} sheets for {} accounts to {}",
                    modules.len(),
                    accounts.len(),
                    output.display()
                );
                Ok(())
            }
        }
    }
}
