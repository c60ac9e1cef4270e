// shopping-tag-pdf: Generate printable QR code sheets for shopping tags

use clap::Parser;
use shopping_tag_pdf::{generate_sheet, load_tags, plan_sheet, AppError, LayoutConfig, PageSize};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Overrides the -v verbosity when set, e.g. `SHOPPING_TAGS_LOG=debug`
const LOG_ENV_VAR: &str = "SHOPPING_TAGS_LOG";

// ============================================================================
// CLI
// ============================================================================

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate printable QR code sheets for shopping tags")]
struct Args {
    /// Tag list (YAML or JSON with a `tags` list of `{ name }` records)
    #[arg(short, long, default_value = "tags.yaml")]
    input: PathBuf,

    /// Output PDF, overwritten if it exists
    #[arg(short, long, default_value = "shopping_tags.pdf")]
    output: PathBuf,

    /// Paper size
    #[arg(short, long, value_enum, default_value = "a4")]
    page_size: PageSize,

    /// Outer page margin in mm
    #[arg(short, long, default_value = "20")]
    margin: f32,

    /// Print the layout plan as JSON instead of writing a PDF
    #[arg(long)]
    dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let args = Args::parse();

    init_logging(args.verbose)?;

    let config = LayoutConfig::for_page_size(args.page_size).with_margin(args.margin);

    if args.dry_run {
        let tags = load_tags(&args.input)?;
        let plan = plan_sheet(&tags, &config)?;
        let json = serde_json::to_string_pretty(&plan)
            .map_err(|e| AppError::RenderError(e.to_string()))?;
        println!("{}", json);
        return Ok(());
    }

    generate_sheet(&args.input, &args.output, &config)?;

    println!("✓ PDF created: {}", args.output.display());

    Ok(())
}

fn init_logging(verbose: u8) -> Result<(), AppError> {
    let filter = match std::env::var(LOG_ENV_VAR) {
        Ok(directives) => EnvFilter::try_new(&directives).map_err(|e| {
            AppError::ConfigError(format!("log filter {}='{}': {}", LOG_ENV_VAR, directives, e))
        })?,
        Err(_) => EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    Ok(())
}
