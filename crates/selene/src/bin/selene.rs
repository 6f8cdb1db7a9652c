use anyhow::Context;
use clap::{Parser, Subcommand};
use selene::calendar::CosmicEventScanner;
use selene::chart::{BirthChartAssembler, ChartRequest};
use selene::config::SeleneConfig;
use selene::ephemeris::SwissEphemerisAdapter;
use selene::time::{Observer, ResolveOptions};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "configs/selene.toml";

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Config file (default: $SELENE_CONFIG, then configs/selene.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a birth chart as JSON.
    Chart {
        /// Local date, YYYY-MM-DD.
        date: String,

        /// Local 24-hour time, HH:MM (default 12:00).
        #[arg(long)]
        time: Option<String>,

        /// IANA zone, UTC or a ±HH:MM offset (default UTC).
        #[arg(long)]
        tz: Option<String>,

        /// Observer latitude in degrees north (default from config).
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Observer longitude in degrees east.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Include whole-sign houses.
        #[arg(long, default_value_t = false)]
        houses: bool,
    },
    /// Scan a year and write it as an iCalendar file.
    Calendar {
        year: i32,

        /// Output file (default: stdout).
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let adapter = SwissEphemerisAdapter::new(config.ephemeris.path.clone())
        .context("Failed to initialise the Swiss Ephemeris")?;

    match args.command {
        Command::Chart {
            date,
            time,
            tz,
            lat,
            lon,
            houses,
        } => {
            let observer = match (lat, lon) {
                (Some(lat), Some(lon)) => Observer::new(lat, lon, 0.0)?,
                _ => config.observer,
            };
            let mut options = ResolveOptions::new().with_observer(observer);
            options.time = time;
            options.timezone = tz;
            let request = ChartRequest::new(date, options);

            let assembler = BirthChartAssembler::new(&adapter);
            let json = if houses {
                let chart = assembler.generate_birth_chart_with_houses(&request)?;
                serde_json::to_string_pretty(&chart)?
            } else {
                serde_json::to_string_pretty(&assembler.generate_birth_chart(&request)?)?
            };
            println!("{}", json);
        }
        Command::Calendar { year, out } => {
            let scanner = CosmicEventScanner::new(&adapter, &config.calendar, config.observer);
            let calendar = scanner.generate_cosmic_calendar(year)?;
            for warning in &calendar.warnings {
                eprintln!("warning: {}: {}", warning.date, warning.message);
            }
            match out {
                Some(path) => {
                    fs::write(&path, &calendar.serialized)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    log::info!("wrote {} events to {}", calendar.events.len(), path.display());
                }
                None => println!("{}", calendar.serialized),
            }
        }
    }

    Ok(())
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<SeleneConfig> {
    let path = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os("SELENE_CONFIG").map(PathBuf::from));

    if let Some(path) = path {
        return SeleneConfig::load_from_file(&path)
            .with_context(|| format!("Failed to load {}", path.display()));
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        return SeleneConfig::load_from_file(default_path)
            .with_context(|| format!("Failed to load {}", default_path.display()));
    }

    log::debug!("no config file found, using defaults");
    Ok(SeleneConfig::default())
}
