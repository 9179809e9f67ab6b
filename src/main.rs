use clap::Parser;
use tierlift::cli::{Cli, run};
use tierlift::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = logging::init(&cli.log_level, cli.log_format) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli.command).await {
        tracing::error!(error = %e, "command failed");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
