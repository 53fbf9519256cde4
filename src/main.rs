use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use labeled_hrv::config::AnalysisConfig;
use labeled_hrv::dataset::loader;
use labeled_hrv::analysis::rolling::RollingColumn;
use labeled_hrv::report::{CellRef, Report};

#[derive(Parser)]
#[command(author, version, about = "HRV statistics for labeled RR interval recordings", long_about = None)]
struct Cli {
    /// Labeled RRI dataset (JSON)
    #[arg(default_value = "labeled_data_RRI.json")]
    data: PathBuf,
    /// Analysis configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Rolling window size, overrides the configuration
    #[arg(short, long)]
    window: Option<usize>,
    /// Replace a cell with the mean of its neighbors, e.g. collect2:ex1:28
    #[arg(long = "correct", value_name = "COLLECTION:CONDITION:ROW")]
    corrections: Vec<CellRef>,
    /// Emit the full report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(window) = cli.window {
        config.window = window;
    }

    let dataset = loader::load(&cli.data)
        .with_context(|| format!("loading dataset {}", cli.data.display()))?;
    let report = Report::build(&dataset, &config, &cli.corrections).context("analysing dataset")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        print_report(&mut out, &report)?;
    }
    Ok(())
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

fn print_report(out: &mut impl Write, report: &Report) -> io::Result<()> {
    writeln!(
        out,
        "{:<10} {:<10} {:<10} {:<10} {:<10}",
        "collect #", "condition", "length", "minimum", "maximum"
    )?;
    for s in &report.summary {
        writeln!(
            out,
            "{:<10} {:<10} {:<10} {:<10} {:<10}",
            s.collection, s.condition, s.length, s.min, s.max
        )?;
    }

    for c in &report.corrections {
        writeln!(
            out,
            "\ncorrected {}/{} row {}: {} -> {}",
            c.cell.collection, c.cell.condition, c.cell.row, c.original, c.replacement
        )?;
    }

    for collection in &report.collections {
        writeln!(out, "\n{} ({} rows)", collection.collection, collection.rows)?;
        writeln!(
            out,
            "{:<8} {:>6} {:>9} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
            "", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
        )?;
        for d in &collection.description {
            writeln!(
                out,
                "{:<8} {:>6} {:>9.2} {:>8.2} {:>8.1} {:>8.1} {:>8.1} {:>8.1} {:>8.1}",
                d.condition, d.count, d.mean, d.std, d.min, d.q25, d.median, d.q75, d.max
            )?;
        }

        writeln!(
            out,
            "{:<8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>10} {:>12}",
            "", "sdrr", "rmssd", "sd1", "sd2", "min@", "max@", "sdrr(w)", "rmssd(w)"
        )?;
        for (i, t) in collection.time_domain.iter().enumerate() {
            let poincare = collection.poincare[i].metrics;
            let extremes = &collection.extremes[i];
            let last = |column: &RollingColumn| column.last_valid().map(|(_, v)| v);
            writeln!(
                out,
                "{:<8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>10} {:>12}",
                t.condition,
                fmt_opt(t.sdrr),
                fmt_opt(t.rmssd),
                fmt_opt(poincare.map(|m| m.sd1)),
                fmt_opt(poincare.map(|m| m.sd2)),
                extremes.min_row,
                extremes.max_row,
                fmt_opt(last(&collection.rolling_std[i])),
                fmt_opt(last(&collection.rolling_rmssd[i])),
            )?;
        }
    }
    Ok(())
}
