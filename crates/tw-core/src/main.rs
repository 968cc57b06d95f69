//! Threshwatch CLI - offline boards document checking.
//!
//! `tw-core check` exercises exactly the load path the monitoring process
//! runs at startup and on an operator-triggered reload: resolve the
//! document source, rebuild the registry, and report what got registered.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::json;

use tw_config::DocumentSource;
use tw_core::{logging, RegistryHandle};

/// Board sensor threshold registry tools.
#[derive(Parser)]
#[command(name = "tw-core")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands.
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Boards document path (default: THRESHWATCH_BOARDS, then the builtin document)
    #[arg(long, global = true)]
    boards: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Errors only
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the boards document and summarize the resulting registry
    Check,

    /// Load the boards document and print every registered threshold
    Dump,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.global.verbose, cli.global.quiet);

    let source = DocumentSource::resolve(cli.global.boards.as_deref());
    let handle = RegistryHandle::new();

    // Failures are logged by the store; the exit code is the verdict.
    let Ok(stats) = handle.rebuild(&source) else {
        return ExitCode::FAILURE;
    };

    let registry = handle.snapshot();

    match cli.command {
        Commands::Check => match cli.global.format {
            OutputFormat::Text => {
                println!("source:  {source}");
                println!("parts:   {}", stats.parts);
                println!("sensors: {}", stats.sensors);
            }
            OutputFormat::Json => {
                let payload = json!({
                    "source": source.to_string(),
                    "parts": stats.parts,
                    "sensors": stats.sensors,
                });
                print_json(&payload);
            }
        },
        Commands::Dump => match cli.global.format {
            OutputFormat::Text => {
                for board in registry.iter() {
                    println!("{}", board.part_number);
                    for sensor in board.sensors() {
                        let t = &sensor.expected;
                        println!(
                            "  {:<24} lolo={} low={} high={} hihi={}",
                            sensor.name, t.low_low, t.low, t.high, t.high_high
                        );
                    }
                }
            }
            OutputFormat::Json => {
                let payload =
                    serde_json::to_value(&*registry).expect("registry serializes to JSON");
                print_json(&payload);
            }
        },
    }

    ExitCode::SUCCESS
}

fn print_json(payload: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(payload).expect("JSON value serializes")
    );
}
