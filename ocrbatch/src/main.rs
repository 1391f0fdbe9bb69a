use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ocrbatch::config::Config;
use ocrbatch::ocr::OcrProvider;
use ocrbatch::processing::{PatternResolver, ProcessingPipeline, RunOptions};
use ocrbatch::storage::{FileStore, LocalFileStore};

#[derive(Parser)]
#[command(name = "ocrbatch")]
#[command(about = "Process PDF files using the Mistral AI OCR API")]
#[command(after_help = "Environment Variables:\n  MISTRAL_API_KEY         Required API key for Mistral AI\n\n\
Examples:\n  ocrbatch sample.pdf\n  ocrbatch --output results.json \"docs/*.pdf\"\n  ocrbatch -o custom.json file1.pdf file2.pdf")]
struct Args {
    /// PDF file(s) to process. Supports glob patterns like "*.pdf"
    #[arg(value_name = "FILES")]
    patterns: Vec<String>,

    /// Output file name for the combined result
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Directory to write results into (default: current directory)
    #[arg(short = 'd', long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Only process the first matching file
    #[arg(long)]
    single: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    init_tracing();

    let config = Config::from_env();

    let ocr = OcrProvider::new(&config.ocr)?;

    if args.patterns.is_empty() {
        anyhow::bail!(
            "No input files specified. Please provide at least one PDF file or pattern. Use --help for usage information."
        );
    }

    let files: Arc<dyn FileStore> = Arc::new(LocalFileStore::new());

    let inputs = PatternResolver::new(files.clone())
        .resolve(&args.patterns)
        .await;
    if inputs.is_empty() {
        anyhow::bail!("No PDF files found matching the provided patterns.");
    }
    tracing::info!("Found {} PDF file(s) to process.", inputs.len());

    let mut options = RunOptions::from(&config.output);
    if let Some(output) = args.output {
        options.combined_file_name = output;
    }
    if let Some(dir) = args.output_dir {
        options.output_dir = dir;
    }
    options.single_file_mode |= args.single;

    let pipeline = ProcessingPipeline::new(Arc::new(ocr), files);
    let summary = pipeline.run(&inputs, &options).await?;

    for failure in &summary.failures {
        tracing::warn!("Skipped {}: {}", failure.source_path, failure.reason);
    }
    tracing::info!(
        "Processed {} file(s): {} succeeded, {} failed",
        summary.processed,
        summary.succeeded,
        summary.failures.len()
    );

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ocrbatch=info".into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
