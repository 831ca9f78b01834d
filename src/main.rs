use anyhow::Result;
use clap::Parser;
use oppmap::cli::{Cli, Commands};
use oppmap::commands::{analyze, init, report};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            calculator,
            input,
            format,
            output,
            seed,
            illustrative,
        } => analyze::handle_analyze(analyze::AnalyzeConfig {
            calculator,
            input,
            format,
            output,
            seed,
            illustrative,
        }),
        Commands::Report {
            region,
            objective,
            profile,
            plan,
            partners,
            offline,
            format,
            output,
            seed,
        } => {
            report::handle_report(report::ReportConfig {
                region,
                objective,
                profile,
                plan,
                partners,
                offline,
                format,
                output,
                seed,
            })
            .await
        }
        Commands::Init { force } => init::init_config(force),
    }
}
