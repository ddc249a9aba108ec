use clap::Parser;
use pve_usage::{Cli, ReportResult, UsageReporter};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ReportResult<()> {
    // logs go to stderr so they never end up inside the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let reporter = UsageReporter::builder().build();

    reporter
        .generate(
            &cli.target(),
            &mut std::io::stdout(),
            console::colors_enabled(),
        )
        .await
}
