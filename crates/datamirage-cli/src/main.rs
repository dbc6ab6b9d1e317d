mod logging;

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use datamirage_core::{DOCUMENT_EXTENSION, Error as CoreError, Locale, MirageConfig};
use datamirage_generate::{DataMirage, FIELD_REGISTRY, LocaleDataStore, sample_all};
use datamirage_validate::{SchemaValidator, ValidationResult, ValidationSummary};
use logging::{LogFormat, init_logging};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Core(#[from] CoreError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "datamirage",
    version,
    about = "Locale data validator and sampler",
    arg_required_else_help = true
)]
struct Cli {
    /// Configuration file (defaults to ./datamirage.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding `<locale>/<document>.yaml` files.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate every document of a locale against the reference locale.
    ValidateLocale(ValidateLocaleArgs),
    /// Validate one document of a locale against the reference locale.
    ValidateFile(ValidateFileArgs),
    /// List supported locales.
    ListLocales,
    /// Generate one value for every registered field.
    Sample(SampleArgs),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug)]
struct ValidateLocaleArgs {
    /// Locale code, e.g. en_US.
    locale: String,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct ValidateFileArgs {
    /// Document name without extension, e.g. address.
    name: String,
    /// Locale code, e.g. en_US.
    locale: String,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct SampleArgs {
    /// Locale code; falls back to the configured locale.
    #[arg(long)]
    locale: Option<String>,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Restrict output to one category.
    #[arg(long)]
    category: Option<String>,
}

#[derive(Serialize)]
struct LocaleReport<'a> {
    locale: Locale,
    reference: Locale,
    results: &'a [ValidationResult],
    summary: ValidationSummary,
}

fn main() -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let Some(cli) = parse_cli(std::env::args_os(), &mut out)? else {
        return Ok(());
    };
    init_logging(cli.log_format).map_err(CliError::Logging)?;

    let mut config = MirageConfig::discover(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    tracing::debug!(
        event = "config_resolved",
        data_dir = ?config.data_dir,
        embedded_fallback = config.embedded_fallback
    );

    match cli.command {
        Command::ValidateLocale(args) => run_validate_locale(&mut out, &config, args),
        Command::ValidateFile(args) => run_validate_file(&mut out, &config, args),
        Command::ListLocales => run_list_locales(&mut out),
        Command::Sample(args) => run_sample(&mut out, &config, args),
    }
}

/// Parse arguments. Bad input, `--help` and `--version` print their text
/// to `out` and yield `None` instead of exiting the process.
fn parse_cli<I, T>(args: I, out: &mut impl Write) -> Result<Option<Cli>, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => {
            write!(out, "{}", err.render())?;
            Ok(None)
        }
    }
}

fn run_validate_locale(
    out: &mut impl Write,
    config: &MirageConfig,
    args: ValidateLocaleArgs,
) -> Result<(), CliError> {
    let Some(locale) = parse_locale_arg(out, &args.locale)? else {
        return Ok(());
    };
    let validator = SchemaValidator::from_config(config);
    let results = validator.validate_locale(locale);
    let summary = ValidationSummary::from_results(&results);

    match args.format {
        OutputFormat::Json => {
            let report = LocaleReport {
                locale,
                reference: validator.reference(),
                results: &results,
                summary,
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            writeln!(out, "Validating all YAML files in locale: {}", locale.code())?;
            for result in &results {
                write!(out, "\n{result}")?;
            }
            write!(out, "\n{summary}")?;
        }
    }
    Ok(())
}

fn run_validate_file(
    out: &mut impl Write,
    config: &MirageConfig,
    args: ValidateFileArgs,
) -> Result<(), CliError> {
    let Some(locale) = parse_locale_arg(out, &args.locale)? else {
        return Ok(());
    };
    let validator = SchemaValidator::from_config(config);
    let result = validator.validate_file(&args.name, locale);

    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &result)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            writeln!(
                out,
                "Validating file '{}.{DOCUMENT_EXTENSION}' in locale: {}",
                args.name,
                locale.code()
            )?;
            write!(out, "{result}")?;
        }
    }
    Ok(())
}

fn run_list_locales(out: &mut impl Write) -> Result<(), CliError> {
    writeln!(out, "Supported locales:")?;
    for locale in Locale::ALL {
        writeln!(out, "- {}: {}", locale.code(), locale.name())?;
    }
    Ok(())
}

fn run_sample(
    out: &mut impl Write,
    config: &MirageConfig,
    args: SampleArgs,
) -> Result<(), CliError> {
    let locale = match args.locale.as_deref() {
        Some(code) => match parse_locale_arg(out, code)? {
            Some(locale) => locale,
            None => return Ok(()),
        },
        None => config.resolved_locale(),
    };

    if let Some(category) = args.category.as_deref()
        && !FIELD_REGISTRY.iter().any(|entry| entry.category == category)
    {
        let known: Vec<&str> = FIELD_REGISTRY.iter().map(|entry| entry.category).collect();
        writeln!(out, "Error: Unknown category '{category}'")?;
        writeln!(out, "Available categories: {}", known.join(", "))?;
        return Ok(());
    }

    let seed = args.seed.or(config.seed);
    let mut builder = DataMirage::builder()
        .locale(locale)
        .store(Arc::new(LocaleDataStore::from_config(config)));
    if let Some(seed) = seed {
        builder = builder.seed(seed);
    }
    let mirage = builder.build();

    match seed {
        Some(seed) => writeln!(out, "Sample values for locale {} (seed {seed}):", locale.code())?,
        None => writeln!(out, "Sample values for locale {}:", locale.code())?,
    }
    let samples = sample_all(&mirage, args.category.as_deref());
    let failed = samples.iter().filter(|sample| sample.outcome.is_err()).count();
    for sample in &samples {
        match &sample.outcome {
            Ok(value) => writeln!(out, "  {}.{}: {value}", sample.category, sample.field)?,
            Err(err) => writeln!(out, "  {}.{}: error: {err}", sample.category, sample.field)?,
        }
    }
    tracing::info!(
        event = "sample_finished",
        locale = %locale,
        fields = samples.len(),
        failed
    );
    Ok(())
}

/// Resolve a locale argument, printing the usual hint when it is unknown.
fn parse_locale_arg(out: &mut impl Write, code: &str) -> Result<Option<Locale>, CliError> {
    match Locale::parse(code) {
        Some(locale) => Ok(Some(locale)),
        None => {
            writeln!(out, "Error: Invalid locale code '{code}'")?;
            writeln!(out, "Run 'list-locales' to see available locales.")?;
            Ok(None)
        }
    }
}
