//! Depscope CLI - Command line interface
//!
//! Loads a JSON manifest of components, directives, pipes and modules and
//! prints what each selected unit can see.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use depscope_config::LogLevel;
use depscope_core::{Manifest, Project, UnitId};
use depscope_log::Logger;

mod config;
mod error;
mod logging;
mod report;

use crate::config::{LogConfig, CLI_TARGET};
use crate::error::CliError;
use crate::logging::{LogFormat, TracingSink};
use crate::report::{render_text, unit_report, UnitReport};

/// 报告输出格式
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "depscope",
    about = "Resolve compilation scopes and component dependencies from a manifest",
    version
)]
struct Cli {
    /// Manifest file path
    #[arg(value_name = "MANIFEST")]
    manifest: PathBuf,

    /// Only report these units (repeatable; default: every unit)
    #[arg(long = "unit", value_name = "NAME")]
    units: Vec<String>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log level: error, warn, info, debug, trace (default: from manifest)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Separate level for resolver records (default: same as --log-level)
    #[arg(long, value_name = "LEVEL")]
    core_log_level: Option<String>,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Also append logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let mut manifest = read_manifest(&cli.manifest)?;

    let (level, core_level) = log_levels(cli, manifest.config.log_level)?;
    manifest.config.log_level = level;
    let log_config = LogConfig::from_level(level).with_core(core_level);
    logging::init_with_file(&log_config, cli.log_format, cli.log_file.as_ref())?;
    tracing::debug!(target: CLI_TARGET, manifest = %cli.manifest.display(), "loading manifest");

    let log = Logger::new(core_level.unwrap_or(level).into()).with_sink(TracingSink);
    let mut project = manifest.load_with_logger(log)?;

    let selected = select_units(&project, &cli.units)?;
    let reports = selected
        .into_iter()
        .map(|unit| unit_report(&mut project, unit))
        .collect::<Result<Vec<UnitReport>, _>>()?;

    let stats = project.tracker.cache_stats();
    tracing::info!(
        target: CLI_TARGET,
        units = reports.len(),
        scopes = stats.entries,
        hits = stats.hits,
        misses = stats.misses,
        "resolution finished"
    );

    match cli.format {
        OutputFormat::Text => Ok(render_text(&reports)),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&reports)?)),
    }
}

fn parse_level(name: &str) -> Result<LogLevel, CliError> {
    LogLevel::parse(name).ok_or_else(|| CliError::UnknownLogLevel(name.to_string()))
}

/// 全局级别（命令行优先于清单）与可选的解析器级别
fn log_levels(cli: &Cli, configured: LogLevel) -> Result<(LogLevel, Option<LogLevel>), CliError> {
    let level = match &cli.log_level {
        Some(name) => parse_level(name)?,
        None => configured,
    };
    let core = cli.core_log_level.as_deref().map(parse_level).transpose()?;
    Ok((level, core))
}

fn read_manifest(path: &Path) -> Result<Manifest, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Manifest::from_json(&content)?)
}

/// Units named on the command line, or every unit in declaration order
fn select_units(project: &Project, names: &[String]) -> Result<Vec<UnitId>, CliError> {
    let registry = project.tracker.registry();
    if names.is_empty() {
        return Ok(registry.iter().map(|def| def.id).collect());
    }
    names
        .iter()
        .map(|name| {
            registry
                .lookup(name)
                .ok_or_else(|| CliError::UnknownUnit(name.clone()))
        })
        .collect()
}
