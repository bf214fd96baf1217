use natal_chart::ChartConfig;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// JD of 1800-01-01 00:00 UT.
pub const DEFAULT_VALID_FROM_JD: f64 = 2_378_496.5;
/// JD of 2400-01-01 00:00 UT.
pub const DEFAULT_VALID_TO_JD: f64 = 2_597_641.5;

const DEFAULT_EPHEMERIS_DIR: &str = "/usr/local/share/swisseph";
const CONFIG_PATHS: [&str; 2] = ["configs/chart.toml", "../../configs/chart.toml"];

#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisSettings {
    pub path: PathBuf,
    pub valid_from_jd: f64,
    pub valid_to_jd: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub chart: ChartConfig,
    pub ephemeris: EphemerisSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chart: ChartConfig::default(),
            ephemeris: EphemerisSettings {
                path: resolve_ephemeris_path(None),
                valid_from_jd: DEFAULT_VALID_FROM_JD,
                valid_to_jd: DEFAULT_VALID_TO_JD,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default = "default_valid_from")]
    valid_from_jd: f64,
    #[serde(default = "default_valid_to")]
    valid_to_jd: f64,
}

fn default_valid_from() -> f64 {
    DEFAULT_VALID_FROM_JD
}

fn default_valid_to() -> f64 {
    DEFAULT_VALID_TO_JD
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    chart: Option<ChartConfig>,
    #[serde(default)]
    ephemeris: Option<EphemerisToml>,
}

/// Try the usual relative locations of `configs/chart.toml`.
pub fn read_chart_toml_text() -> anyhow::Result<String> {
    for p in &CONFIG_PATHS {
        if let Ok(c) = fs::read_to_string(p) {
            log::debug!("Loaded chart config from {}", p);
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load chart.toml from {:?}", CONFIG_PATHS);
}

/// Explicit path, then `SWISS_EPHEMERIS_PATH`, then the system default.
pub fn resolve_ephemeris_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        env::var("SWISS_EPHEMERIS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_DIR))
    })
}

/// Check the ephemeris directory exists and holds `.se1` data files.
pub fn validate_ephemeris_dir(path: &Path) -> anyhow::Result<()> {
    if !path.is_dir() {
        anyhow::bail!("ephemeris.path is not a directory: {}", path.display());
    }
    let has_data = fs::read_dir(path)?
        .filter_map(Result::ok)
        .any(|entry| entry.path().extension().is_some_and(|ext| ext == "se1"));
    if !has_data {
        log::warn!(
            "No .se1 files in {}; the ephemeris will fall back to its analytical model",
            path.display()
        );
    }
    Ok(())
}

pub fn parse_app_config(text: &str) -> anyhow::Result<AppConfig> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse chart.toml: {e}"))?;
    let chart = root.chart.unwrap_or_default();
    let EphemerisToml {
        path,
        valid_from_jd,
        valid_to_jd,
    } = root.ephemeris.unwrap_or_else(|| EphemerisToml {
        path: None,
        valid_from_jd: DEFAULT_VALID_FROM_JD,
        valid_to_jd: DEFAULT_VALID_TO_JD,
    });
    if !valid_from_jd.is_finite() || !valid_to_jd.is_finite() || valid_from_jd >= valid_to_jd {
        anyhow::bail!(
            "ephemeris.valid_from_jd ({}) must be below ephemeris.valid_to_jd ({})",
            valid_from_jd,
            valid_to_jd
        );
    }
    Ok(AppConfig {
        chart,
        ephemeris: EphemerisSettings {
            path: resolve_ephemeris_path(path),
            valid_from_jd,
            valid_to_jd,
        },
    })
}

pub fn load_app_config_from(path: &Path) -> anyhow::Result<AppConfig> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    parse_app_config(&text)
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let text = read_chart_toml_text()?;
    parse_app_config(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use natal_chart::chart::AyanamsaYear;
    use natal_chart::{HouseSystem, ZodiacMode};

    #[test]
    fn test_full_config() {
        let config = parse_app_config(
            r#"
            [chart]
            zodiac = "sidereal"
            house_system = "equal"
            ayanamsa_year = "birth"

            [ephemeris]
            path = "/opt/ephe"
            valid_from_jd = 2400000.5
            valid_to_jd = 2500000.5
            "#,
        )
        .unwrap();
        assert_eq!(config.chart.zodiac, ZodiacMode::Sidereal);
        assert_eq!(config.chart.house_system, HouseSystem::Equal);
        assert_eq!(config.chart.ayanamsa_year, AyanamsaYear::Birth);
        assert_eq!(config.ephemeris.path, PathBuf::from("/opt/ephe"));
        assert_eq!(config.ephemeris.valid_from_jd, 2400000.5);
    }

    #[test]
    fn test_missing_tables_use_defaults() {
        let config = parse_app_config("").unwrap();
        assert_eq!(config.chart, ChartConfig::default());
        assert_eq!(config.ephemeris.valid_from_jd, DEFAULT_VALID_FROM_JD);
        assert_eq!(config.ephemeris.valid_to_jd, DEFAULT_VALID_TO_JD);
    }

    #[test]
    fn test_fixed_ayanamsa_year() {
        let config = parse_app_config("[chart]\nayanamsa_year = 1950\n").unwrap();
        assert_eq!(config.chart.ayanamsa_year, AyanamsaYear::Fixed(1950));
        assert_eq!(config.chart.zodiac, ZodiacMode::Tropical);
    }

    #[test]
    fn test_rejects_unknown_house_system() {
        let err = parse_app_config("[chart]\nhouse_system = \"topocentric\"\n").unwrap_err();
        assert!(err.to_string().contains("chart.toml"));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = parse_app_config("[ephemeris]\nvalid_from_jd = 2.0\nvalid_to_jd = 1.0\n").unwrap_err();
        assert!(err.to_string().contains("valid_from_jd"));
    }

    #[test]
    fn test_rejects_non_finite_range() {
        assert!(parse_app_config("[ephemeris]\nvalid_from_jd = nan\nvalid_to_jd = 1.0\n").is_err());
        assert!(parse_app_config("[ephemeris]\nvalid_from_jd = 1.0\nvalid_to_jd = inf\n").is_err());
    }

    #[test]
    fn test_explicit_ephemeris_path_wins() {
        let path = resolve_ephemeris_path(Some(PathBuf::from("/data/ephe")));
        assert_eq!(path, PathBuf::from("/data/ephe"));
    }

    #[test]
    fn test_missing_ephemeris_dir() {
        assert!(validate_ephemeris_dir(Path::new("/nonexistent/ephe")).is_err());
    }
}
