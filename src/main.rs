use std::fs;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use oraddl::{GenerateOptions, Scope, generate_for_scope};

/// Oracle DDL forward engineering - render a delta document to an alter script
#[derive(Parser)]
#[command(name = "oraddl")]
#[command(about = "Render a schema delta document to an Oracle alter script")]
struct Cli {
    /// Path to the delta document (JSON)
    input: String,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    output: Option<String>,

    /// Target Oracle version, e.g. 19c or 21c
    #[arg(long, env = "ORADDL_DB_VERSION")]
    db_version: Option<String>,

    /// Script granularity: model, view or container
    #[arg(short = 's', long, default_value = "model")]
    scope: String,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)))
        .try_init()
        .ok();

    let scope = Scope::from_str(&cli.scope).unwrap_or_else(|| {
        eprintln!("Invalid scope: {}", cli.scope);
        process::exit(1);
    });

    let input = match fs::read_to_string(&cli.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {}: {}", cli.input, e);
            process::exit(1);
        }
    };

    let options = GenerateOptions {
        db_version: cli.db_version,
    };
    let script = match generate_for_scope(scope, &input, &options) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match cli.output {
        Some(path) => {
            if let Err(e) = fs::write(&path, &script) {
                eprintln!("Failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
        None => println!("{}", script),
    }
}
