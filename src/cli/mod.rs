//! Command-line front end
//! - Loads a distribution request and config from disk
//! - Prints the resulting calendar as JSON or a text table

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::warn;

use crate::config::DistributionConfig;
use crate::engine::{self, grid};
use crate::models::{DistributionRequest, DistributionResult, Money};

pub mod report;
pub mod util;


#[derive(Debug, Parser)]
#[command(name = "spending-calendar", version, about = "Spread monthly budgets across calendar days")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Distribute a request file's categories over its month
    Distribute {
        /// JSON file with user_id, year, month and categories
        #[arg(long)]
        request: PathBuf,
        /// JSON config file; defaults plus SPENDING_CALENDAR_* variables otherwise
        #[arg(long)]
        config: Option<PathBuf>,
        /// Overrides the configured daily floor
        #[arg(long)]
        floor: Option<Money>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Print the day grid of a month
    Grid {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Distribute { request, config, floor, format } => {
            let output = distribute_file(&request, config.as_deref(), floor, format)?;
            println!("{output}");
        }
        Command::Grid { year, month } => {
            let days = grid::build(year, month)?;
            print!("{}", report::render_grid(&days));
        }
    }
    Ok(())
}

/// An explicit config file wins outright; `SPENDING_CALENDAR_*` variables only
/// adjust the defaults.
pub fn load_config(path: Option<&Path>) -> Result<DistributionConfig> {
    load_config_with(path, DistributionConfig::from_env)
}

fn load_config_with<F>(path: Option<&Path>, from_env: F) -> Result<DistributionConfig>
where
    F: FnOnce() -> crate::error::Result<DistributionConfig>,
{
    match path {
        Some(p) => Ok(DistributionConfig::from_json_file(p)?),
        None => Ok(from_env()?),
    }
}

pub fn load_request(path: &Path) -> Result<DistributionRequest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read request {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse request {}", path.display()))
}

/// Runs one request file end to end and returns the rendered output.
pub fn distribute_file(
    request: &Path,
    config: Option<&Path>,
    floor: Option<Money>,
    format: OutputFormat,
) -> Result<String> {
    let mut config = load_config(config)?;
    if let Some(floor) = floor {
        config.floor_amount = floor;
    }
    let request = load_request(request)?;
    let result = engine::distribute_request(&request, &config)?;
    if let Some(s) = &result.shortfall {
        warn!(missing = %s.total_missing, days = s.days.len(), "floor not met on every day");
    }
    render(&result, format)
}

pub fn render(result: &DistributionResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Table => Ok(report::render_result(result)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn request_file(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_distribute_args() {
        let cli = Cli::try_parse_from([
            "spending-calendar",
            "distribute",
            "--request",
            "req.json",
            "--floor",
            "40.00",
            "--format",
            "table",
        ])
        .unwrap();
        match cli.command {
            Command::Distribute { floor, format, config, .. } => {
                assert_eq!(floor, Some(Money::from_cents(4000)));
                assert_eq!(format, OutputFormat::Table);
                assert!(config.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn distributes_a_request_file() {
        let file = request_file(
            r#"{"user_id": "u-7", "year": 2025, "month": 9,
                "categories": [{"category_id": "rent", "monthly_total": "1500", "frequency": 1}]}"#,
        );
        let out = distribute_file(file.path(), None, None, OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["calendar"]["user_id"], "u-7");
        assert_eq!(json["calendar"]["days"][0]["categories"]["rent"], "1500.00");
    }

    #[test]
    fn config_file_ignores_env_overrides() {
        let file = request_file(r#"{"floor_amount": "12.00", "cluster_cap": 3}"#);
        let from_env = || -> crate::error::Result<DistributionConfig> {
            let mut config = DistributionConfig::default();
            config.apply_overrides(|key| match key {
                crate::config::ENV_FLOOR => Some("99.00".to_string()),
                crate::config::ENV_CLUSTER_CAP => Some("9".to_string()),
                _ => None,
            })?;
            Ok(config)
        };

        let config = load_config_with(Some(file.path()), from_env).unwrap();
        assert_eq!(config.floor_amount, Money::from_cents(1200));
        assert_eq!(config.cluster_cap, 3);

        let config = load_config_with(None, from_env).unwrap();
        assert_eq!(config.floor_amount, Money::from_cents(9900));
        assert_eq!(config.cluster_cap, 9);
    }

    #[test]
    fn invalid_request_is_an_error() {
        let file = request_file(
            r#"{"user_id": "u-7", "year": 2025, "month": 14, "categories": []}"#,
        );
        assert!(distribute_file(file.path(), None, None, OutputFormat::Json).is_err());
        assert!(load_request(Path::new("/nonexistent/request.json")).is_err());
    }
}
