//! catalog-graph CLI
//!
//! Build an RDF graph from a catalog CSV, query it, or summarize it.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use catalog_graph::query::instances_of;
use catalog_graph::{
    write_graph, AudioFeature, Binding, BuildReport, CatalogQuery, ExportConfig, GraphBuilder,
    PreparedQuery, QueryEngine, QueryParser, RdfSyntax, RunConfig, SchemaConfig, TripleStore,
    VocabularyKind,
};

#[derive(Parser)]
#[command(name = "catalog-graph")]
#[command(version)]
#[command(about = "Music catalog to RDF graph, with pattern queries", long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map a CSV into a graph and optionally export it
    Build {
        #[command(flatten)]
        graph: GraphArgs,
        /// Export path (overrides spec.export.path), `-` for stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Export syntax (turtle, ntriples, rdfxml)
        #[arg(long)]
        syntax: Option<RdfSyntax>,
        /// Report format (table, json, yaml)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Map a CSV, then run a query against the graph
    Query {
        #[command(flatten)]
        graph: GraphArgs,
        #[command(flatten)]
        query: QueryArgs,
        /// Output format (table, json, yaml)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Statement counts per class and predicate
    Stats {
        #[command(flatten)]
        graph: GraphArgs,
        /// Output format (table, json, yaml)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

/// Where the graph comes from; flags override the config file
#[derive(Args)]
struct GraphArgs {
    /// Run configuration (YAML)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,
    /// Input CSV
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,
    /// Vocabulary (catalog, musicOntology)
    #[arg(long)]
    vocabulary: Option<VocabularyKind>,
    /// Emit audio-feature attributes
    #[arg(long)]
    audio_features: bool,
    /// Schema URL or path to bootstrap from
    #[arg(long)]
    schema: Option<String>,
    /// Schema syntax (rdfxml, turtle, ntriples)
    #[arg(long)]
    schema_format: Option<RdfSyntax>,
}

#[derive(Args)]
struct QueryArgs {
    /// SELECT query text
    #[arg(long, group = "kind")]
    sparql: Option<String>,
    /// File holding a SELECT query
    #[arg(long, group = "kind")]
    file: Option<PathBuf>,
    /// Album-artist name of the album with this title
    #[arg(long, group = "kind")]
    album_artist: Option<String>,
    /// Tracks by the artist with this name
    #[arg(long, group = "kind")]
    tracks_by: Option<String>,
    /// Top tracks by audio feature (e.g. liveness)
    #[arg(long, group = "kind")]
    top: Option<AudioFeature>,
    /// Track listing of the album with this title
    #[arg(long, group = "kind")]
    track_listing: Option<String>,
    /// Row limit for --top
    #[arg(long, default_value = "10")]
    limit: usize,
}

impl GraphArgs {
    fn resolve(&self) -> Result<RunConfig> {
        let mut config = match (&self.config, &self.input) {
            (Some(path), _) => RunConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            (None, Some(input)) => RunConfig::new(input.clone()),
            (None, None) => bail!("either --config or --input is required"),
        };

        if let Some(input) = &self.input {
            config.spec.input = input.clone();
        }
        if let Some(vocabulary) = self.vocabulary {
            config.spec.vocabulary = vocabulary;
        }
        if self.audio_features {
            config.spec.audio_features = true;
        }
        if let Some(url) = &self.schema {
            config.spec.schema = Some(SchemaConfig {
                url: url.clone(),
                format: self.schema_format.unwrap_or(RdfSyntax::RdfXml),
                timeout_secs: catalog_graph::schema::DEFAULT_TIMEOUT_SECS,
            });
        } else if let (Some(schema), Some(format)) = (config.spec.schema.as_mut(), self.schema_format) {
            schema.format = format;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build { graph, output, syntax, format } => {
            let mut config = graph.resolve()?;
            if output.as_deref() == Some(Path::new("-")) {
                config.spec.export = None;
                let (store, _) = build(&config)?;
                let stdout = std::io::stdout();
                let vocab = config.spec.vocabulary.vocabulary();
                let mut out = write_graph(&store, Some(vocab), syntax.unwrap_or_default(), stdout.lock())?;
                out.flush()?;
                return Ok(());
            }

            if let Some(path) = output {
                let format = syntax
                    .or_else(|| RdfSyntax::from_path(&path))
                    .unwrap_or_default();
                config.spec.export = Some(ExportConfig { path, format });
            } else if let (Some(export), Some(syntax)) = (config.spec.export.as_mut(), syntax) {
                export.format = syntax;
            }

            let (_, report) = build(&config)?;
            print_report(&report, &format)?;
        }
        Commands::Query { graph, query, format } => {
            let mut config = graph.resolve()?;
            config.spec.export = None;
            if query.top.is_some() {
                config.spec.audio_features = true;
            }
            let (store, _) = build(&config)?;

            let prepared = prepare_query(&query, config.spec.vocabulary)?;
            let rows = QueryEngine::new(&store).evaluate(&prepared);
            print_rows(&prepared, &rows, &format)?;
        }
        Commands::Stats { graph, format } => {
            let mut config = graph.resolve()?;
            config.spec.export = None;
            let (store, _) = build(&config)?;
            print_stats(&store, config.spec.vocabulary, &format)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build(config: &RunConfig) -> Result<(TripleStore, BuildReport)> {
    GraphBuilder::from_config(config)
        .build_from_csv(&config.spec.input)
        .with_context(|| format!("Failed to build graph from {}", config.spec.input.display()))
}

fn prepare_query(args: &QueryArgs, vocabulary: VocabularyKind) -> Result<PreparedQuery> {
    let vocab = vocabulary.vocabulary();

    let query = if let Some(text) = &args.sparql {
        QueryParser::new().with_vocabulary(vocab).parse(text)?
    } else if let Some(path) = &args.file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read query {}", path.display()))?;
        QueryParser::new().with_vocabulary(vocab).parse(&text)?
    } else if let Some(album) = &args.album_artist {
        CatalogQuery::album_artist_name(vocab, album)
    } else if let Some(artist) = &args.tracks_by {
        CatalogQuery::tracks_by_artist(vocab, artist)
    } else if let Some(feature) = args.top {
        CatalogQuery::top_tracks_by_feature(vocab, feature, args.limit)
    } else if let Some(album) = &args.track_listing {
        CatalogQuery::track_listing(vocab, album)
    } else {
        bail!("no query given (use --sparql, --file, --album-artist, --tracks-by, --top or --track-listing)");
    };

    Ok(query)
}

fn print_report(report: &BuildReport, format: &str) -> Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(report)?),
        "yaml" => print!("{}", serde_yaml::to_string(report)?),
        _ => {
            println!("\n{:<24} {:>10}", "STEP", "COUNT");
            println!("{}", "-".repeat(35));
            println!("{:<24} {:>10}", "schema statements", report.schema_statements);
            println!("{:<24} {:>10}", "records mapped", report.mapping.records);
            println!("{:<24} {:>10}", "statements added", report.mapping.statements_added);
            println!("{:<24} {:>10}", "ambiguous values", report.mapping.ambiguous_values);
            println!("{:<24} {:>10}", "total statements", report.total_statements);
            if let Some(path) = &report.exported_to {
                println!("\nExported to {}", path.display());
            }
            println!();
        }
    }
    Ok(())
}

fn print_rows(query: &PreparedQuery, rows: &[Binding], format: &str) -> Result<()> {
    let columns = query.projection();
    let records: Vec<BTreeMap<&str, &str>> = rows
        .iter()
        .map(|row| row.iter().map(|(var, term)| (var, term.value())).collect())
        .collect();

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&records)?),
        "yaml" => print!("{}", serde_yaml::to_string(&records)?),
        _ => {
            let widths: Vec<usize> = columns
                .iter()
                .map(|c| {
                    records
                        .iter()
                        .filter_map(|r| r.get(c.as_str()).map(|v| v.chars().count()))
                        .chain(std::iter::once(c.len()))
                        .max()
                        .unwrap_or(0)
                        .min(60)
                })
                .collect();

            let header: Vec<String> = columns
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{:<w$}", c.to_uppercase(), w = *w))
                .collect();
            println!("\n{}", header.join("  "));
            println!("{}", "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));

            for record in &records {
                let cells: Vec<String> = columns
                    .iter()
                    .zip(&widths)
                    .map(|(c, w)| format!("{:<w$}", record.get(c.as_str()).copied().unwrap_or(""), w = *w))
                    .collect();
                println!("{}", cells.join("  "));
            }
            println!("\n{} row(s)\n", records.len());
        }
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Stats<'a> {
    statements: usize,
    subjects: usize,
    classes: BTreeMap<&'a str, usize>,
    predicates: BTreeMap<&'a str, usize>,
}

fn print_stats(store: &TripleStore, vocabulary: VocabularyKind, format: &str) -> Result<()> {
    let vocab = vocabulary.vocabulary();
    let classes = [&vocab.track_class, &vocab.artist_class, &vocab.album_class]
        .into_iter()
        .map(|class| (class.as_str(), instances_of(store, &vocab.rdf_type, class).len()))
        .collect();
    let predicates = store
        .predicate_counts()
        .into_iter()
        .map(|(p, n)| (p.as_str(), n))
        .collect();

    let stats = Stats {
        statements: store.len(),
        subjects: store.subject_count(),
        classes,
        predicates,
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&stats)?),
        "yaml" => print!("{}", serde_yaml::to_string(&stats)?),
        _ => {
            println!("\nStatements: {}", stats.statements);
            println!("Subjects:   {}", stats.subjects);
            println!("\n{:<60} {:>10}", "CLASS", "INSTANCES");
            println!("{}", "-".repeat(71));
            for (class, count) in &stats.classes {
                println!("{:<60} {:>10}", class, count);
            }
            println!("\n{:<60} {:>10}", "PREDICATE", "STATEMENTS");
            println!("{}", "-".repeat(71));
            for (predicate, count) in &stats.predicates {
                println!("{:<60} {:>10}", predicate, count);
            }
            println!();
        }
    }
    Ok(())
}
