//! geo-data-dict: build a data dictionary from a geospatial source

use std::path::PathBuf;

use clap::Parser;
use geo_data_dictionary::cli::commands::generate::{GenerateArgs, handle_generate};
use tracing_subscriber::EnvFilter;

/// Create an online data dictionary from a geospatial data source.
#[derive(Parser, Debug)]
#[command(name = "geo-data-dict", version)]
struct Cli {
    /// Create a yaml file representing the structure of this geospatial file.
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    /// Do not create the reStructuredText document after the yaml file.
    #[arg(long = "no_rst")]
    no_rst: bool,

    /// Create a reStructuredText file from the supplied yaml file.
    #[arg(long = "rst_only", conflicts_with = "file")]
    rst_only: Option<PathBuf>,

    /// Directory the template is loaded from.
    #[arg(long)]
    template_dir: Option<PathBuf>,

    /// Template name inside the template directory.
    #[arg(long)]
    template: Option<String>,

    /// Directory output files are written to.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let args = GenerateArgs {
        file: cli.file,
        rst_only: cli.rst_only,
        no_rst: cli.no_rst,
        template_dir: cli.template_dir,
        template: cli.template,
        output_dir: cli.output_dir,
        config_file: cli.config,
        verbose: cli.verbose > 0,
    };

    if let Err(e) = handle_generate(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
