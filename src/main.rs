use clap::{Parser, Subcommand};

mod dataset;
mod model;
mod render;

pub type Result<T> = anyhow::Result<T>;

use dataset::LoadOutcome;
use render::ChartStyle;

#[derive(Parser)]
#[command(name = "icmp-probe-viz")]
#[command(about = "ICMP probe measurement visualizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the estimated-bandwidth-per-payload-size bar chart.
    Bandwidth {
        #[arg(long, default_value = "data/bandwidth_data.csv")]
        data: String,

        #[arg(short = 'o', long, default_value = "bandwidth.png")]
        out: String,
    },

    /// Render the two-panel RTT / jitter chart.
    Quality {
        #[arg(long, default_value = "data/jitter_data.csv")]
        data: String,

        #[arg(short = 'o', long, default_value = "quality.png")]
        out: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Bandwidth { data, out } => run_bandwidth(&data, &out),
        Commands::Quality { data, out } => run_quality(&data, &out),
    }
}

fn run_bandwidth(data: &str, out: &str) -> Result<()> {
    // 1) Load rows.
    let rows = match dataset::load_bandwidth_file(data)? {
        LoadOutcome::Loaded(rows) => rows,
        LoadOutcome::SourceMissing => {
            eprintln!("{}: dataset not found, no chart produced", data);
            return Ok(());
        }
    };
    if rows.is_empty() {
        eprintln!("{}: dataset is empty, no chart produced", data);
        return Ok(());
    }

    // 2) Derive bars.
    let bars = model::bandwidth_bars(&rows);

    // 3) Render PNG.
    render::bandwidth_chart(&bars, out, &ChartStyle::default())?;
    println!("Wrote {}", out);
    Ok(())
}

fn run_quality(data: &str, out: &str) -> Result<()> {
    // 1) Load rows.
    let rows = match dataset::load_rtt_file(data)? {
        LoadOutcome::Loaded(rows) => rows,
        LoadOutcome::SourceMissing => {
            eprintln!("{}: dataset not found, no chart produced", data);
            return Ok(());
        }
    };

    // 2) Derive mean RTT + jitter series. One probe is not enough to talk
    // about variation, so that case ends the pipeline like a missing file.
    let report = match model::derive_quality(&rows) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("{}: {}, no chart produced", data, err);
            return Ok(());
        }
    };

    // 3) Render the stacked panels.
    let style = ChartStyle {
        width: 1000,
        height: 800,
        ..ChartStyle::default()
    };
    render::quality_chart(&rows, &report, out, &style)?;
    println!("Wrote {}", out);
    Ok(())
}
