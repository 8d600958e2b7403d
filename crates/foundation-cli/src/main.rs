use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "foundation-cli", version, about = "Foundation habit tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pyramid layout inspection
    Layout {
        #[command(subcommand)]
        action: commands::layout::LayoutAction,
    },
    /// Interactive in-memory tracking session (commands on stdin)
    Session(commands::session::SessionArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("FOUNDATION_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Layout { action } => commands::layout::run(action),
        Commands::Session(args) => commands::session::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
