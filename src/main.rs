//! @ai:module:intent CLI for the speech-to-text benchmark harness
//! @ai:module:layer presentation

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stt_bench::{
    backend::{HttpBackend, MockBackend, WhisperCliBackend},
    catalog::ReferenceCatalog,
    config::{BackendKind, BenchmarkConfig, CorpusFilter, ModelConfig},
    corpus::{CorpusItem, CorpusLoader, CorpusLoaderTrait},
    record::{RunOutcome, Skip},
    report::ReportGenerator,
    runner::{BatchDriver, BenchmarkContext},
};

#[derive(Parser)]
#[command(name = "stt-bench")]
#[command(about = "Benchmark harness for speech-to-text and translation models")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the benchmark over the corpus
    Run {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Filter by sample names (comma-separated)
        #[arg(long)]
        samples: Option<String>,

        /// Filter by languages (comma-separated)
        #[arg(long)]
        langs: Option<String>,

        /// Also translate each transcription to the target language
        #[arg(long)]
        translate: bool,

        /// Run against mock backends instead of real models
        #[arg(long)]
        dry_run: bool,

        /// Output directory for results
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Re-render the markdown report from a saved CSV table
    Report {
        /// Path to a results.csv produced by a previous run
        #[arg(short, long)]
        results: PathBuf,

        /// Output path for the regenerated markdown
        #[arg(short, long, default_value = "results.md")]
        output: PathBuf,
    },

    /// List corpus items
    List {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Filter by sample name
        #[arg(long)]
        sample: Option<String>,

        /// Filter by language
        #[arg(long)]
        lang: Option<String>,
    },

    /// Validate corpus naming and golden expectations
    Validate {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "benchmark.toml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("stt_bench=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            samples,
            langs,
            translate,
            dry_run,
            output,
        } => {
            run_benchmarks(RunArgs {
                config,
                samples,
                langs,
                translate,
                dry_run,
                output,
            })
            .await
        }
        Commands::Report { results, output } => regenerate_report(results, output),
        Commands::List {
            config,
            sample,
            lang,
        } => list_items(config, sample, lang),
        Commands::Validate { config } => validate(config),
        Commands::Init { output } => init_config(output),
    }
}

struct RunArgs {
    config: Option<PathBuf>,
    samples: Option<String>,
    langs: Option<String>,
    translate: bool,
    dry_run: bool,
    output: Option<PathBuf>,
}

/// @ai:intent Run every configured model over the corpus and report
/// @ai:effects network, fs:write
async fn run_benchmarks(args: RunArgs) -> Result<()> {
    let mut config = load_or_default_config(args.config)?;

    if args.translate {
        config.run.translate = true;
    }
    if args.dry_run {
        config.run.dry_run = true;
    }
    if args.samples.is_some() || args.langs.is_some() {
        config.run.filter = build_filter(args.samples, args.langs);
    }

    tracing::info!("Loading corpus from {}", config.paths.corpus_dir.display());

    let loader = build_loader(&config)?;
    let items = loader.load_filtered(&config.paths.corpus_dir, &config.run.filter)?;

    if items.is_empty() {
        tracing::warn!("No corpus items match the filter criteria");
        return Ok(());
    }

    tracing::info!(
        "Found {} items for {} models",
        items.len(),
        config.models.len()
    );

    let timestamp = chrono::Utc::now().format("%Y-%m-%d_%H-%M-%S");
    let output_dir = args
        .output
        .unwrap_or_else(|| config.paths.results_dir.clone())
        .join(timestamp.to_string());
    std::fs::create_dir_all(&output_dir)?;
    tracing::info!("Output directory: {}", output_dir.display());

    let driver = if config.run.translate {
        BatchDriver::new().with_translation(&config.run.target_lang)
    } else {
        BatchDriver::new()
    };

    let mut outcome = RunOutcome::new();

    for model in &config.models {
        run_one_model(model, config.run.dry_run, &driver, &items, &mut outcome).await;
    }

    let catalog = load_catalog(&config)?;
    let reporter = ReportGenerator::new();
    reporter.generate_all(&outcome, &catalog, &output_dir)?;

    print_summary(&config.models, &outcome);

    Ok(())
}

/// @ai:intent One model's sub-run: load the backend, drive every item
///
/// A backend that fails to load skips every item in the sub-run; it
/// never aborts the batch, so later models still get their turn.
/// @ai:effects network, io
async fn run_one_model(
    model: &ModelConfig,
    dry_run: bool,
    driver: &BatchDriver,
    items: &[CorpusItem],
    outcome: &mut RunOutcome,
) {
    tracing::info!("Starting sub-run for model {}", model.id);

    let kind = if dry_run { BackendKind::Mock } else { model.backend };

    let result = match kind {
        BackendKind::WhisperCli => {
            let ctx = BenchmarkContext::create(&model.id, || {
                let mut backend = WhisperCliBackend::new(&model.id);
                if let Some(command) = &model.command {
                    backend = backend.with_command(command);
                }
                Ok(backend)
            });
            match ctx {
                Ok(ctx) => {
                    driver.run_model(&ctx, items, outcome).await;
                    Ok(())
                }
                Err(e) => Err(e.to_string()),
            }
        }
        BackendKind::Http => match &model.endpoint {
            Some(endpoint) => {
                let ctx =
                    BenchmarkContext::create(&model.id, || HttpBackend::new(endpoint, &model.id));
                match ctx {
                    Ok(ctx) => {
                        driver.run_model(&ctx, items, outcome).await;
                        Ok(())
                    }
                    Err(e) => Err(e.to_string()),
                }
            }
            None => Err("http backend configured without an endpoint".to_string()),
        },
        BackendKind::Mock => {
            let ctx = BenchmarkContext::create(&model.id, || {
                Ok(MockBackend::new("mock transcription", "en"))
            });
            match ctx {
                Ok(ctx) => {
                    driver.run_model(&ctx, items, outcome).await;
                    Ok(())
                }
                Err(e) => Err(e.to_string()),
            }
        }
    };

    if let Err(reason) = result {
        tracing::warn!("Model {} failed to load: {}", model.id, reason);
        for item in items {
            outcome.push_skip(Skip {
                model: model.id.clone(),
                item_id: item.id.clone(),
                reason: reason.clone(),
            });
        }
    }
}

/// @ai:intent Re-render the markdown report from an existing CSV table
/// @ai:effects fs:read, fs:write
fn regenerate_report(results: PathBuf, output: PathBuf) -> Result<()> {
    let reporter = ReportGenerator::new();
    reporter.regenerate_from_csv(&results, &ReferenceCatalog::default(), &output)?;

    println!("Report written to {}", output.display());
    Ok(())
}

/// @ai:intent List corpus items matching optional filters
/// @ai:effects fs:read
fn list_items(config: Option<PathBuf>, sample: Option<String>, lang: Option<String>) -> Result<()> {
    let config = load_or_default_config(config)?;
    let loader = build_loader(&config)?;

    let filter = CorpusFilter {
        samples: sample.map(|s| vec![s]),
        langs: lang.map(|l| vec![l]),
    };

    let items = loader.load_filtered(&config.paths.corpus_dir, &filter)?;

    println!("Corpus items ({}):", items.len());
    println!();
    println!("{:<30} {:<15} {:<6} {:<8}", "ID", "Sample", "Lang", "Golden");
    println!("{}", "-".repeat(62));

    for item in &items {
        println!(
            "{:<30} {:<15} {:<6} {:<8}",
            item.id,
            item.sample_name().unwrap_or("-"),
            item.lang_suffix().map(|l| l.as_str()).unwrap_or("-"),
            if item.expect.is_some() { "yes" } else { "no" }
        );
    }

    Ok(())
}

/// @ai:intent Validate that the corpus loads and item names parse
/// @ai:effects fs:read
fn validate(config: Option<PathBuf>) -> Result<()> {
    let config = load_or_default_config(config)?;
    let loader = build_loader(&config)?;
    let items = loader.load_all(&config.paths.corpus_dir)?;

    let mut nonconforming = 0;

    for item in &items {
        if item.sample_name().is_none() {
            println!("  ? {} does not follow <sample>-<lang>.<ext> naming", item.id);
            nonconforming += 1;
        }
    }

    println!("Corpus validation passed!");
    println!("Total items: {}", items.len());
    println!(
        "With golden text: {}",
        items.iter().filter(|i| i.expect.is_some()).count()
    );
    if nonconforming > 0 {
        println!("Nonconforming names: {nonconforming}");
    }

    Ok(())
}

/// @ai:intent Initialize default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = BenchmarkConfig::default();
    config.save(&output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Load configuration or use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<BenchmarkConfig> {
    match path {
        Some(p) => BenchmarkConfig::load(&p),
        None => {
            let default_path = PathBuf::from("benchmark.toml");

            if default_path.exists() {
                BenchmarkConfig::load(&default_path)
            } else {
                Ok(BenchmarkConfig::default())
            }
        }
    }
}

/// @ai:intent Build a corpus loader, with the manifest when configured
/// @ai:effects fs:read
fn build_loader(config: &BenchmarkConfig) -> Result<CorpusLoader> {
    match &config.paths.expectations_file {
        Some(path) => Ok(CorpusLoader::with_manifest(path)?),
        None => Ok(CorpusLoader::new()),
    }
}

/// @ai:intent Load the phrase catalog, falling back to the built-in one
/// @ai:effects fs:read
fn load_catalog(config: &BenchmarkConfig) -> Result<ReferenceCatalog> {
    match &config.paths.catalog_file {
        Some(path) => ReferenceCatalog::load(path),
        None => Ok(ReferenceCatalog::default()),
    }
}

/// @ai:intent Build filter from CLI arguments
/// @ai:effects pure
fn build_filter(samples: Option<String>, langs: Option<String>) -> CorpusFilter {
    CorpusFilter {
        samples: samples.map(|s| s.split(',').map(|v| v.trim().to_string()).collect()),
        langs: langs.map(|s| s.split(',').map(|v| v.trim().to_string()).collect()),
    }
}

/// @ai:intent Print per-model summary to console
/// @ai:effects io
fn print_summary(models: &[ModelConfig], outcome: &RunOutcome) {
    println!();
    println!("Benchmark Results");
    println!("=================");
    println!();
    println!("{:<20} {:>10} {:>10}", "Model", "Recorded", "Skipped");
    println!("{}", "-".repeat(42));

    for model in models {
        let recorded = outcome.records().filter(|r| r.model() == model.id).count();
        let skipped = outcome.skips().filter(|s| s.model == model.id).count();
        println!("{:<20} {:>10} {:>10}", model.id, recorded, skipped);
    }

    println!();
    println!(
        "Total: {} recorded, {} skipped",
        outcome.record_count(),
        outcome.skip_count()
    );

    for skip in outcome.skips() {
        println!("  skipped {} × {}: {}", skip.model, skip.item_id, skip.reason);
    }

    println!();
}
