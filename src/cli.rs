use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "oppmap")]
#[command(about = "Market opportunity and investment intelligence analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a single composite-index calculator over a JSON input file
    Analyze {
        /// Which calculator to run
        #[arg(value_enum)]
        calculator: CalculatorKind,

        /// JSON file with the calculator's input fields (defaults apply
        /// for anything missing)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Seed for stochastic calculators (monte-carlo, illustrative synergy)
        #[arg(long)]
        seed: Option<u64>,

        /// Use illustrative (synthesized) drivers for the synergy calculator
        #[arg(long)]
        illustrative: bool,
    },

    /// Run the full diagnose → simulate → architect pipeline and assemble
    /// the intelligence report
    Report {
        /// Target region name
        #[arg(long)]
        region: String,

        /// Entry objective, e.g. "establish regional distribution"
        #[arg(long)]
        objective: String,

        /// JSON file with 0-100 region ratings (infrastructure, ...)
        #[arg(long)]
        profile: Option<PathBuf>,

        /// JSON file with the investment plan (initial_investment, ...)
        #[arg(long)]
        plan: Option<PathBuf>,

        /// JSON file with a partner array; bundled directory otherwise
        #[arg(long)]
        partners: Option<PathBuf>,

        /// Skip all external collaborators (fixture data, offline narrative)
        #[arg(long)]
        offline: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "markup")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Seed for the simulation stage
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Write a commented default oppmap.toml to the current directory
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CalculatorKind {
    /// Regional Competitiveness Index
    Competitiveness,
    /// Discounted return-on-investment analysis
    Roi,
    /// Break-even horizon with year-by-year projections
    TimeToProfit,
    /// Partner-ecosystem synergy
    Synergy,
    /// Weighted risk index
    Risk,
    /// Monte-Carlo outcome sensitivity
    MonteCarlo,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Terminal,
    /// Pretty-printed JSON
    Json,
    /// Nested tagged markup
    Markup,
}
