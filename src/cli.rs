//! CLI definition and dispatch.

use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_catalog_adapter::CsvCatalogAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report::JsonReportAdapter;
use crate::adapters::moneycontrol_adapter::MoneyControlAdapter;
use crate::adapters::nse_adapter::NseAdapter;
use crate::adapters::text_report::TextReportAdapter;
use crate::domain::catalog::SymbolCatalog;
use crate::domain::classify::Classifier;
use crate::domain::error::TechdashError;
use crate::domain::payload::IndicatorPayload;
use crate::domain::pipeline::Pipeline;
use crate::domain::report::IndicatorReport;
use crate::domain::settings::{AppSettings, build_settings};
use crate::domain::symbol::strip_exchange_suffix;
use crate::ports::aggregator_port::AggregatorPort;
use crate::ports::catalog_port::CatalogPort;
use crate::ports::exchange_port::ExchangePort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "techdash",
    about = "Weekly technical indicators for NSE-listed stocks"
)]
pub struct Cli {
    /// Log progress of each pipeline stage
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the symbols in the catalog
    Symbols {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Override the catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Fetch and show technical indicators for one or more symbols
    Indicators {
        #[arg(short, long = "symbol", required = true)]
        symbols: Vec<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Include the raw aggregator payload
        #[arg(long)]
        raw: bool,
        /// Do not fall back to a symbol search when the ISIN search fails
        #[arg(long)]
        no_fallback: bool,
    },
    /// Resolve a symbol's ISIN and aggregator id without fetching indicators
    Resolve {
        #[arg(short, long)]
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        no_fallback: bool,
    },
    /// Classify and render a saved indicator payload
    Classify {
        #[arg(short, long)]
        payload: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Display name for the report
        #[arg(long, default_value = "Saved payload")]
        name: String,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
        #[arg(long)]
        raw: bool,
    },
}

pub const UNEXPECTED_ERROR: &str = "error: an unexpected error occurred";

/// Replace the default panic output with a generic message; the panic
/// location and payload go to the debug log only.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        log::debug!("panic: {}", panic_info);
        eprintln!("{}", UNEXPECTED_ERROR);
    }));
}

/// Run `body`, mapping a panic to exit code 1.
pub fn guarded<F>(body: F) -> ExitCode
where
    F: FnOnce() -> ExitCode + std::panic::UnwindSafe,
{
    std::panic::catch_unwind(body).unwrap_or_else(|_| ExitCode::from(1))
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Symbols { config, catalog } => run_symbols(config.as_ref(), catalog),
        Command::Indicators {
            symbols,
            config,
            catalog,
            format,
            raw,
            no_fallback,
        } => run_indicators(&symbols, config.as_ref(), catalog, format, raw, no_fallback),
        Command::Resolve {
            symbol,
            config,
            no_fallback,
        } => run_resolve(&symbol, config.as_ref(), no_fallback),
        Command::Classify {
            payload,
            config,
            name,
            format,
            raw,
        } => run_classify(&payload, config.as_ref(), &name, format, raw),
    }
}

fn fail(err: &TechdashError) -> ExitCode {
    eprintln!("error: {err}");
    err.into()
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        fail(&TechdashError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        })
    })
}

/// Settings from the optional config file, with the catalog path override.
pub fn load_settings(
    config_path: Option<&PathBuf>,
    catalog_override: Option<PathBuf>,
) -> Result<AppSettings, ExitCode> {
    let config = match config_path {
        Some(path) => {
            log::info!("loading config from {}", path.display());
            load_config(path)?
        }
        None => FileConfigAdapter::empty(),
    };
    let mut settings = build_settings(&config).map_err(|e| fail(&e))?;
    if let Some(path) = catalog_override {
        settings.catalog.path = path;
    }
    Ok(settings)
}

fn renderer(format: OutputFormat, raw: bool) -> Box<dyn ReportPort> {
    match format {
        OutputFormat::Text => Box::new(TextReportAdapter::new(raw)),
        OutputFormat::Json => Box::new(JsonReportAdapter::new(raw)),
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn run_symbols(config_path: Option<&PathBuf>, catalog_override: Option<PathBuf>) -> ExitCode {
    let settings = match load_settings(config_path, catalog_override) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let mut catalog = SymbolCatalog::new(CsvCatalogAdapter::from_settings(&settings.catalog));
    let symbols = match catalog.symbols() {
        Ok(s) => s,
        Err(e) => return fail(&e),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for symbol in symbols {
        if writeln!(out, "{}", symbol).is_err() {
            return ExitCode::from(1);
        }
    }
    eprintln!("{} symbols", symbols.len());
    ExitCode::SUCCESS
}

/// Outcome of one `indicators` invocation.
pub struct IndicatorsRun {
    pub reports: Vec<IndicatorReport>,
    pub failures: Vec<(String, TechdashError)>,
}

impl IndicatorsRun {
    pub fn exit_code(&self) -> ExitCode {
        match self.failures.first() {
            Some((_, err)) => err.into(),
            None => ExitCode::SUCCESS,
        }
    }
}

/// Check the requested symbols against the catalog, then run the pipeline
/// for each known symbol in turn. A catalog failure stops everything;
/// per-symbol failures are collected.
pub fn collect_reports<P: CatalogPort>(
    catalog: &mut SymbolCatalog<P>,
    exchange: &dyn ExchangePort,
    aggregator: &dyn AggregatorPort,
    settings: &AppSettings,
    requested: &[String],
    generated_at: NaiveDateTime,
) -> Result<IndicatorsRun, TechdashError> {
    catalog.symbols()?;

    let pipeline = Pipeline::new(exchange, aggregator, settings.pipeline);
    let classifier = Classifier::with_unmatched(settings.unmatched);
    let mut run = IndicatorsRun {
        reports: Vec::new(),
        failures: Vec::new(),
    };

    let mut known = Vec::new();
    for raw in requested {
        let symbol = strip_exchange_suffix(raw, &settings.catalog.suffix);
        if catalog.contains(&symbol) {
            known.push(symbol);
        } else {
            log::warn!("{}: not in catalog, skipping", symbol);
            run.failures
                .push((symbol.clone(), TechdashError::UnknownSymbol { symbol }));
        }
    }

    for (symbol, outcome) in pipeline.run_all(known.iter().map(String::as_str)) {
        match outcome {
            Ok(fetched) => run.reports.push(IndicatorReport::from_indicators(
                fetched,
                &classifier,
                generated_at,
            )),
            Err(e) => run.failures.push((symbol, e)),
        }
    }

    Ok(run)
}

fn run_indicators(
    symbols: &[String],
    config_path: Option<&PathBuf>,
    catalog_override: Option<PathBuf>,
    format: OutputFormat,
    raw: bool,
    no_fallback: bool,
) -> ExitCode {
    let mut settings = match load_settings(config_path, catalog_override) {
        Ok(s) => s,
        Err(code) => return code,
    };
    if no_fallback {
        settings.pipeline.symbol_fallback = false;
    }

    let exchange = match NseAdapter::new(&settings.http, &settings.endpoints) {
        Ok(a) => a,
        Err(e) => return fail(&e),
    };
    let aggregator = match MoneyControlAdapter::new(&settings.http, &settings.endpoints) {
        Ok(a) => a,
        Err(e) => return fail(&e),
    };
    let mut catalog = SymbolCatalog::new(CsvCatalogAdapter::from_settings(&settings.catalog));

    let run = match collect_reports(
        &mut catalog,
        &exchange,
        &aggregator,
        &settings,
        symbols,
        now(),
    ) {
        Ok(run) => run,
        Err(e) => return fail(&e),
    };

    for (_, err) in &run.failures {
        eprintln!("error: {err}");
    }

    if !run.reports.is_empty() {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if let Err(e) = renderer(format, raw).render_all(&run.reports, &mut out) {
            return fail(&e);
        }
    }

    eprintln!(
        "{} of {} symbols fetched",
        run.reports.len(),
        run.reports.len() + run.failures.len()
    );
    run.exit_code()
}

fn run_resolve(symbol: &str, config_path: Option<&PathBuf>, no_fallback: bool) -> ExitCode {
    let mut settings = match load_settings(config_path, None) {
        Ok(s) => s,
        Err(code) => return code,
    };
    if no_fallback {
        settings.pipeline.symbol_fallback = false;
    }

    let exchange = match NseAdapter::new(&settings.http, &settings.endpoints) {
        Ok(a) => a,
        Err(e) => return fail(&e),
    };
    let aggregator = match MoneyControlAdapter::new(&settings.http, &settings.endpoints) {
        Ok(a) => a,
        Err(e) => return fail(&e),
    };

    let symbol = strip_exchange_suffix(symbol, &settings.catalog.suffix);
    let pipeline = Pipeline::new(&exchange, &aggregator, settings.pipeline);
    match pipeline.resolve(&symbol) {
        Ok(resolved) => {
            println!("symbol:     {}", resolved.symbol);
            println!(
                "isin:       {}",
                resolved.isin.as_deref().unwrap_or("N/A")
            );
            println!("sc_id:      {}", resolved.security.sc_id);
            println!("name:       {}", resolved.display_name());
            println!("matched by: {}", resolved.matched_by);
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

/// Read a saved payload file into a report.
pub fn report_from_file(
    path: &PathBuf,
    name: &str,
    classifier: &Classifier,
    generated_at: NaiveDateTime,
) -> Result<IndicatorReport, TechdashError> {
    let body = fs::read_to_string(path)?;
    let payload = IndicatorPayload::parse(&body).map_err(|e| TechdashError::Payload {
        reason: format!("{}: {}", path.display(), e),
    })?;
    Ok(IndicatorReport::from_payload(
        name,
        name,
        payload,
        classifier,
        generated_at,
    ))
}

fn run_classify(
    payload_path: &PathBuf,
    config_path: Option<&PathBuf>,
    name: &str,
    format: OutputFormat,
    raw: bool,
) -> ExitCode {
    let settings = match load_settings(config_path, None) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let classifier = Classifier::with_unmatched(settings.unmatched);

    let report = match report_from_file(payload_path, name, &classifier, now()) {
        Ok(r) => r,
        Err(e) => return fail(&e),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match renderer(format, raw).render_all(std::slice::from_ref(&report), &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}
