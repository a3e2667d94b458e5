use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, error::ErrorKind};

use crate::codec::TableLayout;
use crate::config::ResourceConfig;
use crate::errors::SynonymError;
use crate::lint::{LintReport, lint_stop_words, lint_table_text, sort_stop_words, sort_table};
use crate::matcher::LexicalMatcher;
use crate::metadata::OntologyMetadata;
use crate::ontology::{InMemoryPrefixAuthority, write_owl_ttl};
use crate::resources::{get_grounder, get_positive_synonyms};
use crate::transport::TableSource;
use crate::transport::fs::read_text;
use crate::types::{Prefix, UriPrefix};

const DEFAULT_EXPORT_PATH: &str = "exports/biosynonyms.ttl";

#[derive(Debug, Parser)]
#[command(
    name = "biosynonyms",
    disable_help_subcommand = true,
    about = "Curate, check, and export biomedical synonyms",
    after_help = "Table locations are resolved in order by explicit flag, BIOSYNONYMS_* environment variables, then the bundled data/ defaults."
)]
struct BiosynonymsCli {
    #[arg(
        long,
        global = true,
        value_name = "PATH_OR_URL",
        help = "Positives table override"
    )]
    positives: Option<String>,
    #[arg(
        long,
        global = true,
        value_name = "PATH_OR_URL",
        help = "Negatives table override"
    )]
    negatives: Option<String>,
    #[arg(
        long = "stop-words",
        global = true,
        value_name = "PATH",
        help = "Stop-word table override"
    )]
    stop_words: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check every table for integrity and canonical order.
    Lint,
    /// Rewrite every local table in canonical order.
    Sort,
    /// Export the positives as an OWL ontology in Turtle.
    Export {
        #[arg(
            long,
            value_name = "PATH",
            default_value = DEFAULT_EXPORT_PATH,
            help = "Destination; a .gz suffix enables gzip compression"
        )]
        output: PathBuf,
        #[arg(
            long = "prefix-map",
            value_name = "JSON",
            help = "JSON object of prefix -> URI prefix overrides"
        )]
        prefix_map: Option<PathBuf>,
        #[arg(
            long,
            value_name = "JSON",
            help = "JSON ontology metadata replacing the default header"
        )]
        metadata: Option<PathBuf>,
    },
    /// Look up free text against the positives.
    Ground {
        text: String,
        #[arg(long, help = "Print matches as JSON")]
        json: bool,
    },
}

impl BiosynonymsCli {
    fn resource_config(&self) -> ResourceConfig {
        let mut config = ResourceConfig::from_env();
        if let Some(positives) = &self.positives {
            config.positives_path = positives.clone();
        }
        if let Some(negatives) = &self.negatives {
            config.negatives_path = negatives.clone();
        }
        if let Some(stop_words) = &self.stop_words {
            config.stop_words_path = stop_words.clone();
        }
        config
    }
}

/// Run the `biosynonyms` command line with `args_iter` (program name excluded).
pub fn run<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) =
        parse_cli::<BiosynonymsCli, _>(std::iter::once("biosynonyms".to_string()).chain(args_iter))?
    else {
        return Ok(());
    };
    let config = cli.resource_config();

    match cli.command {
        Command::Lint => run_lint(&config),
        Command::Sort => run_sort(&config),
        Command::Export {
            output,
            prefix_map,
            metadata,
        } => run_export(&config, &output, prefix_map.as_deref(), metadata.as_deref()),
        Command::Ground { text, json } => run_ground(&config, &text, json),
    }
}

fn run_lint(config: &ResourceConfig) -> Result<(), Box<dyn Error>> {
    let authority = InMemoryPrefixAuthority::bundled();
    let mut reports = Vec::new();
    for (location, layout) in [
        (&config.positives_path, TableLayout::Positive),
        (&config.negatives_path, TableLayout::Negative),
    ] {
        let text = TableSource::resolve(location).read_to_string(config.fetch_timeout)?;
        reports.push(LintReport {
            path: PathBuf::from(location),
            issues: lint_table_text(&text, layout, &authority),
        });
    }
    reports.push(lint_stop_words(&config.stop_words_path, &authority)?);

    let issues: Vec<String> = reports.iter().flat_map(LintReport::messages).collect();
    if issues.is_empty() {
        println!("lint passed for {} tables", reports.len());
        return Ok(());
    }
    for issue in &issues {
        println!("{issue}");
    }
    Err(SynonymError::Lint { issues }.into())
}

fn run_sort(config: &ResourceConfig) -> Result<(), Box<dyn Error>> {
    for (location, layout) in [
        (&config.positives_path, TableLayout::Positive),
        (&config.negatives_path, TableLayout::Negative),
    ] {
        let TableSource::Local(path) = TableSource::resolve(location) else {
            return Err(format!("cannot sort remote table {location}").into());
        };
        let rows = sort_table(&path, layout)?;
        println!("sorted {} ({rows} rows)", path.display());
    }
    let rows = sort_stop_words(&config.stop_words_path)?;
    println!(
        "sorted {} ({rows} rows)",
        config.stop_words_path.display()
    );
    Ok(())
}

fn run_export(
    config: &ResourceConfig,
    output: &Path,
    prefix_map: Option<&Path>,
    metadata: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let overrides = prefix_map
        .map(|path| -> Result<HashMap<Prefix, UriPrefix>, SynonymError> {
            Ok(serde_json::from_str(&read_text(path)?)?)
        })
        .transpose()?;
    let metadata = match metadata {
        Some(path) => OntologyMetadata::from_json_file(path)?,
        None => OntologyMetadata::default(),
    };
    let records = get_positive_synonyms(config)?;
    write_owl_ttl(
        &records,
        output,
        &metadata,
        &InMemoryPrefixAuthority::bundled(),
        overrides.as_ref(),
    )?;
    println!("exported {} synonyms -> {}", records.len(), output.display());
    Ok(())
}

fn run_ground(config: &ResourceConfig, text: &str, json: bool) -> Result<(), Box<dyn Error>> {
    let grounder = get_grounder(config)?;
    let matches = grounder.get_matches(text);
    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }
    if matches.is_empty() {
        println!("no matches for '{text}'");
    }
    for scored in &matches {
        println!(
            "{:.3}\t{}\t{}\t{}",
            scored.score,
            scored.term.curie(),
            scored.term.name,
            scored.term.status
        );
    }
    Ok(())
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
