pub mod cli;
pub mod config;
pub mod input;
pub mod query;
pub mod schema;

use crate::cli::{FilterSource, cli_parse};
use crate::config::CompilerConfig;
use anyhow::Context;
use colored::Colorize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub use cli::{ColorMode, Commands};
pub use config::{ConfigError, load_config, load_config_from_path};
pub use input::{InputError, load_filters, parse_filters, parse_inline_filter};
pub use query::{
    FilterKey, FilterSet, InvalidFilterError, Operator, QueryDocument, QueryError, compile,
    compile_checked, deep_merge, validate,
};
pub use schema::{
    DocumentSchema, FieldDescriptor, FieldKind, FieldResolver, PathSegment, Schema,
    UnresolvableFieldError,
};

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Collect the filter set from the file and the inline `--filter` flags
///
/// Inline filters override file entries with the same key.
fn read_filters(source: &FilterSource) -> anyhow::Result<FilterSet> {
    let mut filters = match &source.file {
        Some(path) => load_filters(path)
            .with_context(|| format!("Failed to load filters from '{}'", path.display()))?,
        None => FilterSet::new(),
    };

    for inline in &source.filters {
        let (key, value) = parse_inline_filter(inline)?;
        filters.insert(key, value);
    }

    if filters.is_empty() {
        anyhow::bail!("No filters given. Pass a filter file or at least one --filter KEY=VALUE");
    }

    Ok(filters)
}

fn write_output_file(path: &std::path::Path, content: &str) -> anyhow::Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write output file '{}'", path.display()))
}

fn operator_listing() -> String {
    let mut listing = String::new();
    for operator in Operator::ALL {
        let example = operator.build_fragment("field", serde_json::json!("value"));
        let suffix = match operator {
            Operator::Equals => "(none)".to_string(),
            other => format!("__{}", other.token()),
        };
        listing.push_str(&format!(
            "{:<10} {:<12} {}\n",
            operator.to_string(),
            suffix,
            serde_json::Value::Object(example)
        ));
    }
    listing
}

fn run_compile(
    config: &CompilerConfig,
    source: &FilterSource,
    no_validate: bool,
    compact: bool,
) -> anyhow::Result<String> {
    let document = config.document(&source.document)?;
    let filters = read_filters(source)?;
    info!(document = %source.document, filters = filters.len(), "compiling filters");

    let query = if config.options.validate && !no_validate {
        compile_checked(&document, &filters)?
    } else {
        compile(&document, &filters)?
    };

    let query = serde_json::Value::Object(query);
    let rendered = if compact || !config.options.pretty {
        serde_json::to_string(&query)?
    } else {
        serde_json::to_string_pretty(&query)?
    };
    Ok(rendered)
}

fn run_validate(config: &CompilerConfig, source: &FilterSource) -> anyhow::Result<String> {
    let document = config.document(&source.document)?;
    let filters = read_filters(source)?;
    info!(document = %source.document, filters = filters.len(), "validating filters");

    validate(&document, &filters)?;
    Ok(format!(
        "OK: {} filter(s) valid for '{}'",
        filters.len(),
        source.document
    ))
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    let config = load_config(cli.config.as_deref())?;
    debug!(
        documents = config.schema.documents.len(),
        validate = config.options.validate,
        "loaded config"
    );

    let output = match &cli.command {
        Commands::Compile {
            source,
            no_validate,
            compact,
        } => {
            let rendered = run_compile(&config, source, *no_validate, *compact)?;
            println!("{rendered}");
            rendered
        }
        Commands::Validate { source } => {
            let message = run_validate(&config, source)?;
            if !cli.quiet {
                println!("{}", message.green());
            }
            message
        }
        Commands::Operators => {
            let listing = operator_listing();
            print!("{listing}");
            listing
        }
    };

    if let Some(path) = &cli.output {
        write_output_file(path, &output)?;
    }

    Ok(())
}
