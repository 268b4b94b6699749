//! tokengate CLI binary entry point.

use tokengate::cli::{commands, Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();

    let result = match &cli.command {
        Commands::Url(args) => commands::handle_url(args),
        Commands::Strip(args) => commands::handle_strip(args),
        Commands::Check(args) => commands::handle_check(args),
        Commands::Refresh(args) => commands::handle_refresh(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
