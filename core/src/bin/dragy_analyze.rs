use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use dragy_core::client::DragyClient;
use dragy_core::metrics::Metrics;
use dragy_core::{analyze_record, decode_envelope, load_config, parse_run_url};

#[derive(Parser, Debug)]
#[command(name = "dragy-analyze")]
#[command(about = "Acceleration and GPS anomaly analysis for Dragy runs", long_about = None)]
struct Args {
    /// Raw API response saved to disk
    #[arg(long, conflicts_with_all = ["url", "id"])]
    file: Option<PathBuf>,

    /// Shareable leaderboard URL (…/leaderboards/<brand>/<name>-<id>/)
    #[arg(long, conflicts_with = "id")]
    url: Option<String>,

    /// Run id
    #[arg(long)]
    id: Option<String>,

    /// Analyzer config (JSON); defaults are used when the file is missing
    #[arg(long, default_value = "dragy.json")]
    config: PathBuf,

    /// Override the rolling window width in seconds
    #[arg(long)]
    window: Option<f64>,

    /// Print Prometheus metrics after the report
    #[arg(long, default_value_t = false)]
    metrics: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut cfg = load_config(&args.config)
        .with_context(|| format!("loading config {}", args.config.display()))?;
    if let Some(w) = args.window {
        if !(w.is_finite() && w > 0.0) {
            bail!("--window must be a positive number of seconds");
        }
        cfg.window_secs = w;
    }

    let record = if let Some(path) = &args.file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        decode_envelope(&text)?
    } else {
        let id = match (&args.url, &args.id) {
            (Some(url), _) => parse_run_url(url)?,
            (None, Some(id)) => id.clone(),
            (None, None) => bail!("one of --file, --url or --id is required"),
        };
        DragyClient::new().fetch_run(&id)?.record
    };

    let analysis = analyze_record(&record, &cfg);
    println!("{}", serde_json::to_string_pretty(&analysis)?);

    if args.metrics {
        let metrics = Metrics::new()?;
        metrics.observe(&analysis.report);
        print!("{}", metrics.render());
    }

    Ok(())
}
