//! casebook: synthetic clinical vignette generator
//!
//! Builds a ground-truth profile per diagnosis from an ontology snapshot and
//! samples it into prevalence-weighted patient records.
//!
//! Usage:
//!   casebook generate --seed 42 -n 20 > corpus.json
//!   casebook generate --ontology snomed.json --config casebook.toml --output corpus.json
//!   casebook truths --seed 42

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use casebook_config::{GeneratorConfig, PrevalenceTable};
use casebook_contracts::{
    error::{CasebookError, CasebookResult},
    record::export_records,
};
use casebook_core::{CorpusDriver, ExplicitTruth, FailurePolicy, RangePolicy};
use casebook_ontology::{CachingOntology, InMemoryOntology, OntologySnapshot};
use casebook_ref_snomed::{fixture, seeds};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Fake but plausible clinical vignettes from an ontology.
#[derive(Parser)]
#[command(
    name = "casebook",
    about = "Synthetic clinical vignette generator",
    long_about = "Walks an ontology's finding-site relationships to build a ground truth per\n\
                  diagnosis, then samples prevalence-weighted patient records as JSON."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate records and write them as a pretty-printed JSON array.
    Generate {
        #[command(flatten)]
        source: SourceArgs,
        /// Write the corpus here instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Build truths only and print one line per truth.
    Truths {
        #[command(flatten)]
        source: SourceArgs,
    },
}

/// Where the ontology and settings come from, plus overrides.
#[derive(Args)]
struct SourceArgs {
    /// Generator settings (TOML). Defaults to the bundled reference settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Ontology snapshot (JSON). Defaults to the bundled SNOMED CT subset.
    #[arg(long)]
    ontology: Option<PathBuf>,
    /// Number of diagnoses to draw, with replacement.
    #[arg(short = 'n', long)]
    diagnoses: Option<usize>,
    /// Multiplier applied to prevalence buckets.
    #[arg(long)]
    scale: Option<u32>,
    /// Seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,
    /// Use legacy index draws, which never pick the last element.
    #[arg(long)]
    legacy_ranges: bool,
    /// Skip diagnoses whose lookups fail instead of aborting.
    #[arg(long)]
    skip_failures: bool,
    /// Leave out the built-in seed truths.
    #[arg(long)]
    no_seeds: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Structured logging goes to stderr; stdout carries only the corpus.
    // Set RUST_LOG=debug for per-diagnosis output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate { source, output } => run_generate(&source, output),
        Command::Truths { source } => run_truths(&source),
    };

    if let Err(e) = result {
        eprintln!("casebook error: {}", e);
        std::process::exit(1);
    }
}

// ── Command dispatch ──────────────────────────────────────────────────────────

fn run_generate(source: &SourceArgs, output: Option<PathBuf>) -> CasebookResult<()> {
    let config = load_config(source)?;
    let ontology = load_ontology(source)?;
    let prevalence = PrevalenceTable::from_config(&config.prevalence);
    let driver = CorpusDriver::new(&ontology, &prevalence, config.driver_settings());
    let mut rng = make_rng(config.seed);

    let corpus = driver.generate(&seed_truths(&config), &mut rng)?;
    let json = export_records(&corpus.records)?;

    match output {
        Some(path) => {
            std::fs::write(&path, json).map_err(|e| CasebookError::SerializationError {
                reason: format!("failed to write corpus to '{}': {}", path.display(), e),
            })?;
            info!(path = %path.display(), records = corpus.records.len(), "corpus written");
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn run_truths(source: &SourceArgs) -> CasebookResult<()> {
    let config = load_config(source)?;
    let ontology = load_ontology(source)?;
    let prevalence = PrevalenceTable::from_config(&config.prevalence);
    let driver = CorpusDriver::new(&ontology, &prevalence, config.driver_settings());
    let mut rng = make_rng(config.seed);

    let catalog = driver.build_truths(&seed_truths(&config), &mut rng)?;
    for truth in &catalog.truths {
        println!("{}", truth);
    }
    println!();
    println!(
        "{} truths ({} seeded, {} discovered); {} diagnoses without findings, {} failed",
        catalog.truths.len(),
        catalog.report.seed_truths,
        catalog.report.truths_built,
        catalog.report.diagnoses_without_findings,
        catalog.report.diagnoses_failed,
    );
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Settings from `--config` (or the bundled reference), with flags on top.
fn load_config(source: &SourceArgs) -> CasebookResult<GeneratorConfig> {
    let mut config = match &source.config {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => fixture::reference_config()?,
    };

    if source.diagnoses.is_some() {
        config.diagnosis_limit = source.diagnoses;
    }
    if let Some(scale) = source.scale {
        config.scale = scale;
    }
    if source.seed.is_some() {
        config.seed = source.seed;
    }
    if source.legacy_ranges {
        config.range_policy = RangePolicy::Legacy;
    }
    if source.skip_failures {
        config.failure_policy = FailurePolicy::Skip;
    }
    if source.no_seeds {
        config.include_seed_truths = false;
    }
    config.validate()?;
    Ok(config)
}

fn load_ontology(source: &SourceArgs) -> CasebookResult<CachingOntology<InMemoryOntology>> {
    let snapshot = match &source.ontology {
        Some(path) => OntologySnapshot::from_file(path)?,
        None => fixture::snapshot()?,
    };
    Ok(CachingOntology::new(InMemoryOntology::from_snapshot(&snapshot)?))
}

/// Built-in seeds (unless disabled) followed by any declared in config.
fn seed_truths(config: &GeneratorConfig) -> Vec<ExplicitTruth> {
    let mut truths = if config.include_seed_truths {
        seeds::reference_seeds()
    } else {
        Vec::new()
    };
    truths.extend(config.seed_truths.iter().cloned());
    truths
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
