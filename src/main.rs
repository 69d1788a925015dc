use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use trade_cache::config::{LogConfig, LogFormat, Settings};
use trade_cache::metrics::install_recorder;

#[derive(Parser, Debug)]
#[command(name = "trade-cache", about = "Runs scripted order book scenarios")]
struct Args {
    #[arg(long, default_value = "config/demo.yaml")]
    config: String,
    /// Run only the scenario with this name.
    #[arg(long)]
    scenario: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Print Prometheus metrics after the run.
    #[arg(long)]
    metrics: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Yaml,
}

fn init_logging(cfg: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.filter));
    match cfg.format {
        LogFormat::Json => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
        LogFormat::Compact => tracing_subscriber::fmt().with_env_filter(filter).compact().init(),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = Settings::load(&args.config)?;
    init_logging(&settings.log);
    let prom = if args.metrics { Some(install_recorder()?) } else { None };

    let scenarios: Vec<_> = match &args.scenario {
        Some(name) => vec![
            settings
                .scenario(name)
                .ok_or_else(|| anyhow::anyhow!("scenario {name} not found in {}", args.config))?,
        ],
        None => settings.scenarios.iter().collect(),
    };
    if scenarios.is_empty() {
        warn!(config = %args.config, "no scenarios configured");
    }

    for scenario in scenarios {
        info!(name = %scenario.name, orders = scenario.orders.len(), "running scenario");
        let report = scenario.run()?;
        match args.format {
            OutputFormat::Text => println!("{report}"),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&report)?),
        }
    }

    if let Some(handle) = prom {
        println!("{}", handle.render());
    }
    Ok(())
}
