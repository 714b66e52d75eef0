//! Schemagen CLI - JSON Schema generation for Helm values.yaml

use clap::Parser;
use std::path::PathBuf;

mod commands;
mod error;
mod exit_codes;

const AFTER_HELP: &str = "\
Directives (double-hash comments, one per line):
  ## @schemaEnum <dotted.key> <a,b,c>
  ## @schemaRegex <dotted.key> <pattern>
  ## @schemaMinimum <dotted.key> <integer>
  ## @schemaMaximum <dotted.key> <integer>

Examples:
  $ schemagen values.yaml    # generate schema json";

#[derive(Parser)]
#[command(name = "schemagen")]
#[command(author = "Schemagen Contributors")]
#[command(version)]
#[command(about = "Generate JSON Schema for Helm values yaml", long_about = None)]
#[command(after_help = AFTER_HELP)]
struct Cli {
    /// Values yaml file to generate the schema for
    #[arg(value_name = "VALUES_YAML_FILE")]
    files: Vec<PathBuf>,

    /// Enable debug output
    #[arg(long)]
    debug: bool,
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    // clap exits with 2 on bad flags, which is our annotation error code
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            std::process::exit(exit_codes::USAGE_ERROR);
        }
        Err(err) => err.exit(),
    };

    // Set debug level
    if cli.debug {
        // SAFETY: We're the only thread at this point (start of main)
        unsafe { std::env::set_var("RUST_BACKTRACE", "1") };
    }
    init_tracing(cli.debug);

    if let Err(err) = run(&cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn run(cli: &Cli) -> error::Result<()> {
    let values_path = commands::generate::values_file(&cli.files)?;
    commands::generate::run(values_path)
}

/// Log to stderr so that stdout carries nothing but the schema
fn init_tracing(debug: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = if debug {
        "schemagen=debug,schemagen_core=debug"
    } else {
        "schemagen=warn,schemagen_core=warn"
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
