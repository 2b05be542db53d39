mod display;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use regiostat_classify::{ProcessedLawData, normalize_laws};
use regiostat_core::{DeputyCategory, colors_for};
use regiostat_store::{
    ProcessedData, Selection, SortDirection, SortKey, aggregate, compare_selection,
    normalize_statistics, read_parquet, sort_and_filter, summarize, write_parquet,
};
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(name = "regiostat", version, about = "Regional deputy and legislative statistics")]
struct Cli {
    /// Regional statistics feed (JSON array of periods).
    #[arg(long, global = true, env = "REGIOSTAT_STATS")]
    stats: Option<PathBuf>,

    /// Legislative statistics feed (JSON array of region records).
    #[arg(long, global = true, env = "REGIOSTAT_LAWS")]
    laws: Option<PathBuf>,

    /// Print results as JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summary card for the selection across all selected regions.
    Summary(SelectionArgs),
    /// Per-region metrics, sorted and filtered.
    Regions {
        #[command(flatten)]
        selection: SelectionArgs,
        #[command(flatten)]
        order: OrderArgs,
    },
    /// Change against the previous period for a single selected date.
    Compare {
        #[command(flatten)]
        selection: SelectionArgs,
        #[command(flatten)]
        order: OrderArgs,
    },
    /// Model-law status totals, or one law's breakdown by region.
    Laws {
        /// Restrict totals to these regions.
        #[arg(long)]
        region: Vec<String>,
        /// Show the status of this law in every region.
        #[arg(long)]
        law: Option<String>,
    },
    /// Display colours for appeal topics (all catalogue topics if none given).
    Colors {
        topics: Vec<String>,
    },
    /// Write per-region metrics to a Parquet file.
    Export {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Output Parquet path.
        #[arg(long)]
        out: PathBuf,
        /// Read the file back and print it.
        #[arg(long)]
        preview: bool,
    },
}

#[derive(Args, Debug)]
struct SelectionArgs {
    /// Period key (dd.mm.yyyy). Repeatable; defaults to the latest period.
    #[arg(long)]
    date: Vec<String>,
    /// Deputy category: zs, acs or omsu. Repeatable; defaults to all.
    #[arg(long)]
    category: Vec<DeputyCategory>,
    /// Region name. Repeatable; defaults to all regions.
    #[arg(long)]
    region: Vec<String>,
}

impl SelectionArgs {
    fn resolve(&self, store: &ProcessedData) -> anyhow::Result<Selection> {
        let mut selection = Selection::new().with_regions(self.region.iter().cloned());
        selection = if self.category.is_empty() {
            selection.with_all_categories()
        } else {
            selection.with_categories(self.category.iter().copied())
        };
        if self.date.is_empty() {
            let latest = store
                .latest_date()
                .context("regional statistics feed has no periods")?;
            selection = selection.with_dates([latest]);
        } else {
            for date in &self.date {
                if store.period(date).is_none() {
                    tracing::warn!(date = %date, "period not in feed, ignoring");
                }
            }
            selection = selection.with_dates(self.date.iter().cloned());
        }
        Ok(selection)
    }
}

#[derive(Args, Debug)]
struct OrderArgs {
    /// Sort key: total, interacting, reception, engagement, totalCitizens, region.
    #[arg(long, default_value = "total")]
    sort: SortKey,
    /// Sort descending.
    #[arg(long)]
    desc: bool,
    /// Case-insensitive region name filter.
    #[arg(long, default_value = "")]
    search: String,
}

impl OrderArgs {
    fn direction(&self) -> SortDirection {
        if self.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays machine-readable under --json.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    tracing::info!("regiostat v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match &cli.command {
        Command::Summary(args) => {
            let store = load_stats(cli.stats.as_deref())?;
            let selection = args.resolve(&store)?;
            let summary = summarize(&store, &selection);
            if cli.json {
                print_json(&summary)?;
            } else {
                display::print_summary(&selection, &summary);
            }
        }
        Command::Regions { selection, order } => {
            let store = load_stats(cli.stats.as_deref())?;
            let selection = selection.resolve(&store)?;
            let records = aggregate(&store, &selection);
            let records = sort_and_filter(&records, order.sort, order.direction(), &order.search);
            if cli.json {
                print_json(&records)?;
            } else {
                display::print_regions(&records, selection.spans_multiple_periods());
            }
        }
        Command::Compare { selection, order } => {
            let store = load_stats(cli.stats.as_deref())?;
            let selection = selection.resolve(&store)?;
            if selection.spans_multiple_periods() {
                bail!("comparison needs exactly one --date");
            }
            let Some(mut report) = compare_selection(&store, &selection) else {
                if cli.json {
                    println!("null");
                } else {
                    println!("No previous period to compare with.");
                }
                return Ok(());
            };
            report.regions =
                sort_and_filter(&report.regions, order.sort, order.direction(), &order.search);
            if cli.json {
                print_json(&report)?;
            } else {
                display::print_comparison(&report);
            }
        }
        Command::Laws { region, law } => {
            let laws = load_laws(cli.laws.as_deref())?;
            match law {
                Some(title) => {
                    if !laws.law_list.contains(title) {
                        bail!("unknown law: {title}");
                    }
                    if cli.json {
                        print_json(&laws.totals_for_law(title))?;
                    } else {
                        display::print_law_breakdown(&laws, title);
                    }
                }
                None => {
                    let totals = if region.is_empty() {
                        laws.law_totals()
                    } else {
                        laws.totals_over(region.iter().map(String::as_str))
                    };
                    if cli.json {
                        print_json(&totals)?;
                    } else {
                        display::print_law_totals(&laws, &totals);
                    }
                }
            }
        }
        Command::Colors { topics } => {
            let colors = if topics.is_empty() {
                let store = load_stats(cli.stats.as_deref())?;
                colors_for(store.appeal_topics())
            } else {
                colors_for(topics)
            };
            if cli.json {
                print_json(&colors)?;
            } else {
                display::print_colors(&colors);
            }
        }
        Command::Export {
            selection,
            out,
            preview,
        } => {
            let store = load_stats(cli.stats.as_deref())?;
            let selection = selection.resolve(&store)?;
            let records = aggregate(&store, &selection);
            write_parquet(out, &records)
                .with_context(|| format!("failed to export to {}", out.display()))?;
            println!("Wrote {} regions to {}", records.len(), out.display());
            if *preview {
                let batches = read_parquet(out)?;
                println!("{}", arrow::util::pretty::pretty_format_batches(&batches)?);
            }
        }
    }
    Ok(())
}

fn read_feed(path: Option<&Path>, flag: &str) -> anyhow::Result<Value> {
    let Some(path) = path else {
        bail!("missing --{flag} (or its environment variable)");
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn load_stats(path: Option<&Path>) -> anyhow::Result<ProcessedData> {
    let raw = read_feed(path, "stats")?;
    Ok(normalize_statistics(&raw)?)
}

fn load_laws(path: Option<&Path>) -> anyhow::Result<ProcessedLawData> {
    let raw = read_feed(path, "laws")?;
    Ok(normalize_laws(&raw)?)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

