// Policy Mermaid - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/policy-mermaid policy.yaml
// ```
//
// Or embed the diagram in markdown:
//
// ```console
// $ ./target/release/policy-mermaid --markdown policy/*.yaml > docs/policy.md
// ```

use anyhow::Context;
use clap::Parser;
use policy_mermaid::pipeline::{DiagramPipeline, LoggingConfig};
use policy_mermaid::policy::default_policy_document;
use policy_mermaid::types::{CliArgs, DiagramConfig};
use std::process;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        match DiagramConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    if args.print_default_policy {
        match serde_yaml::to_string(default_policy_document()) {
            Ok(yaml) => {
                print!("{}", yaml);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default policy document: {}", e);
                process::exit(1);
            }
        }
    }

    // Keep the file logging guard alive until the process exits
    let _log_guard = match init_logging(&args) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(args) {
        error!("{:#}", e);
        process::exit(1);
    }
}

/// Initialize logging based on CLI flags
fn init_logging(
    args: &CliArgs,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>, policy_mermaid::pipeline::LoggingError>
{
    let mut logging = if args.debug {
        LoggingConfig::new()
            .with_level(tracing::Level::DEBUG)
            .with_span_events()
    } else if args.verbose {
        LoggingConfig::new().with_level(tracing::Level::INFO)
    } else {
        // Default: warnings and errors only
        LoggingConfig::new()
    };

    if args.json_logs {
        logging = logging.with_json_format();
    }
    if let Some(dir) = &args.log_dir {
        logging = logging.with_file_logging(dir.clone());
    }

    logging.init()
}

/// Resolve configuration and run the pipeline
fn run(args: CliArgs) -> anyhow::Result<()> {
    let dry_run = args.dry_run;

    // Load configuration from CLI arguments and optional config file
    let config = DiagramConfig::from_cli_args(args).context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    info!(
        fragments = config.files.len(),
        output_format = %config.output_format,
        "Configuration loaded and validated successfully"
    );

    let pipeline = DiagramPipeline::new(config)?;

    // Handle dry run mode
    if dry_run {
        let prepared = pipeline.prepare()?;
        eprintln!("Policy loaded successfully!");
        eprintln!("Dry run mode - diagram will not be rendered.");
        eprintln!("{}", prepared.statistics.summary());
        return Ok(());
    }

    let statistics = pipeline.run_to_destination()?;
    info!("Rendered diagram: {}", statistics);

    Ok(())
}
