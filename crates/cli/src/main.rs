use anyhow::{bail, Context as AnyhowContext, Result};
use bills_graph::{RelationGraphBuilder, RelationStats};
use bills_meta::{
    write_bill_meta_files, write_json_atomic, write_outputs, BillMetaFilesReport,
    DataFileScanner, ExtractionPipeline, OutputSummary, PipelineStats,
};
use bills_similarity::{collect_word_samples, compare_bills, compare_documents};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use crate::config::FileConfig;

mod config;

#[derive(Parser)]
#[command(name = "bills")]
#[command(about = "Bill metadata, related-bill graph and text similarity", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,

    /// TOML config file (defaults to ./bills.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract data.json metadata, relate bills by title and write the JSON outputs
    Meta(MetaArgs),

    /// Compare bill versions (e.g. 116hr1500rh) by their document.xml text
    Compare(CompareArgs),

    /// Compare documents given by path
    #[command(name = "compare-files")]
    CompareFiles(CompareFilesArgs),

    /// Write a random sample of tokenized words from every document.xml
    #[command(name = "word-sample")]
    WordSample(WordSampleArgs),
}

#[derive(Args)]
struct MetaArgs {
    /// Congress data directory (containing <congress>/bills/...)
    #[arg(long)]
    data_dir: PathBuf,

    /// Directory for the aggregate JSON files
    #[arg(long, default_value = ".")]
    output: PathBuf,

    /// Extractions in flight at once (overrides config and env)
    #[arg(long)]
    concurrency: Option<usize>,

    /// Also write billMeta.json next to every data.json
    #[arg(long)]
    per_bill: bool,
}

#[derive(Args)]
struct CompareArgs {
    /// Congress data directory
    #[arg(long)]
    data_dir: PathBuf,

    /// Comma-separated bill numbers with versions
    #[arg(long, value_delimiter = ',', required = true)]
    bills: Vec<String>,
}

#[derive(Args)]
struct CompareFilesArgs {
    /// Documents to compare
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

#[derive(Args)]
struct WordSampleArgs {
    /// Congress data directory
    #[arg(long)]
    data_dir: PathBuf,

    /// JSON file for the sampled word list
    #[arg(long, default_value = "wordSampleList.json")]
    output: PathBuf,

    /// Share of each document's words to sample
    #[arg(long)]
    fraction: Option<f64>,

    /// Maximum number of words kept
    #[arg(long)]
    max_words: Option<usize>,

    /// RNG seed for a reproducible sample
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Serialize)]
struct MetaSummary {
    stats: PipelineStats,
    relations: RelationStats,
    outputs: OutputSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    per_bill: Option<BillMetaFilesReport>,
}

#[derive(Serialize)]
struct WordSampleSummary {
    documents: usize,
    skipped: Vec<PathBuf>,
    words: usize,
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = FileConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Meta(args) => run_meta(args, config).await?,
        Commands::Compare(args) => run_compare(args, config).await?,
        Commands::CompareFiles(args) => run_compare_files(args, config).await?,
        Commands::WordSample(args) => run_word_sample(args, config).await?,
    }

    Ok(())
}

/// Extract, relate and write metadata for a congress data directory
async fn run_meta(args: MetaArgs, mut config: FileConfig) -> Result<()> {
    if !args.data_dir.is_dir() {
        bail!("Data directory not found: {}", args.data_dir.display());
    }
    if let Some(concurrency) = args.concurrency {
        config.pipeline.concurrency = concurrency;
        config.validate()?;
    }

    let paths = DataFileScanner::new(&args.data_dir).scan_data_json();
    let outcome = ExtractionPipeline::new(config.pipeline)
        .run(paths)
        .await
        .context("Extraction failed")?;

    let relations = RelationGraphBuilder::new(&outcome.store)
        .apply_titles()
        .apply_main_titles()
        .build();

    let outputs = write_outputs(&outcome.store, &args.output)
        .await
        .with_context(|| format!("Failed to write outputs to {}", args.output.display()))?;

    let per_bill = if args.per_bill {
        Some(write_bill_meta_files(&outcome.store, &args.data_dir).await)
    } else {
        None
    };

    let summary = MetaSummary {
        stats: outcome.stats,
        relations,
        outputs,
        per_bill,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Compare bill versions found under the data directory
async fn run_compare(args: CompareArgs, config: FileConfig) -> Result<()> {
    let matrix = compare_bills(&args.data_dir, &args.bills, &config.similarity)
        .await
        .context("Comparison failed")?;
    println!("{}", serde_json::to_string_pretty(&matrix)?);
    Ok(())
}

/// Compare documents given by path
async fn run_compare_files(args: CompareFilesArgs, config: FileConfig) -> Result<()> {
    let matrix = compare_documents(&args.paths, &config.similarity)
        .await
        .context("Comparison failed")?;
    println!("{}", serde_json::to_string_pretty(&matrix)?);
    Ok(())
}

/// Sample words from every bill document under the data directory
async fn run_word_sample(args: WordSampleArgs, mut config: FileConfig) -> Result<()> {
    if !args.data_dir.is_dir() {
        bail!("Data directory not found: {}", args.data_dir.display());
    }
    let sampling = &mut config.similarity.word_sample;
    if let Some(fraction) = args.fraction {
        sampling.fraction = fraction;
    }
    if let Some(max_words) = args.max_words {
        sampling.max_words = max_words;
    }
    if args.seed.is_some() {
        sampling.seed = args.seed;
    }
    config.validate()?;

    let paths = DataFileScanner::new(&args.data_dir).scan_documents();
    let sample = collect_word_samples(
        &paths,
        &config.similarity.tokenizer,
        &config.similarity.word_sample,
    )
    .await
    .context("Word sampling failed")?;

    write_json_atomic(&args.output, &sample.words)
        .await
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    let summary = WordSampleSummary {
        documents: sample.documents,
        skipped: sample.skipped,
        words: sample.words.len(),
        output: args.output,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
