use anyhow::Context;
use chrono::NaiveDateTime;
use clap::Parser;
use natal_chart::{BirthData, ChartEngine, HouseSystem, SwissEphemerisAdapter, ZodiacMode};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute a natal chart and print it as JSON")]
struct Args {
    /// Local birth time, e.g. 1990-06-15T14:30:00
    #[arg(long)]
    date: NaiveDateTime,

    /// UTC offset of the local time, in hours
    #[arg(long, allow_hyphen_values = true)]
    offset: f64,

    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Overrides [chart].zodiac
    #[arg(long)]
    zodiac: Option<ZodiacMode>,

    /// Overrides [chart].house_system
    #[arg(long)]
    house_system: Option<HouseSystem>,

    /// Config file (defaults to configs/chart.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a short text summary instead of JSON
    #[arg(long)]
    describe: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => natal_config::load_app_config_from(path)?,
        None => natal_config::load_app_config().unwrap_or_else(|e| {
            log::warn!("{e}; using defaults");
            natal_config::AppConfig::default()
        }),
    };
    if let Some(zodiac) = args.zodiac {
        config.chart.zodiac = zodiac;
    }
    if let Some(house_system) = args.house_system {
        config.chart.house_system = house_system;
    }

    natal_config::validate_ephemeris_dir(&config.ephemeris.path)?;
    let adapter = SwissEphemerisAdapter::new(Some(config.ephemeris.path.clone()))?
        .with_valid_range(config.ephemeris.valid_from_jd, config.ephemeris.valid_to_jd);
    let mut engine = ChartEngine::new(adapter, config.chart);

    let birth = BirthData::new(args.date, args.lat, args.lon, args.offset)?;
    let chart = engine
        .compute_chart(&birth)
        .context("chart computation failed")?;

    if args.describe {
        println!("{}", engine.describe_calculation_system());
        for position in chart.bodies() {
            println!("{}", engine.describe_body(position));
        }
        for cusp in chart.houses() {
            println!("House {:>2} {:.2} {}", cusp.house, cusp.longitude, cusp.sign);
        }
        println!("Ascendant {:.2} {}", chart.ascendant().longitude, chart.ascendant().sign);
        println!("Midheaven {:.2} {}", chart.midheaven().longitude, chart.midheaven().sign);
    } else {
        println!("{}", chart.to_json_pretty()?);
    }
    Ok(())
}
