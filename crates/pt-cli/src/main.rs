//! pagetools CLI
//!
//! Manifest navigation and build-to-build manifest diffs from the terminal.

mod compare;
mod local_diff;
mod nav;
mod output;

use clap::{Parser, Subcommand};

use compare::CompareOptions;
use local_diff::LocalDiffOptions;
use nav::NavOptions;

#[derive(Parser)]
#[command(name = "pt-cli")]
#[command(about = "pagetools manifest navigator and diff tools")]
struct Cli {
    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show previous/next/build page targets for a manifest URL
    Nav {
        /// Manifest URL (.../<build>/artifact/manifest.xml)
        #[arg(short, long)]
        url: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Fetch two build manifests and write a side-by-side diff page
    Compare {
        /// Manifest URL of the current build
        #[arg(short, long)]
        url: String,

        /// Build number to compare with
        #[arg(short, long)]
        target: String,

        /// Output HTML file (default: diff-<current>-vs-<target>.html)
        #[arg(short, long)]
        output: Option<String>,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diff two local manifest files into an HTML page
    Diff {
        /// Old manifest file
        old: String,

        /// New manifest file
        new: String,

        /// Output HTML file
        #[arg(short, long, default_value = "diff.html")]
        output: String,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Nav { url, json } => nav::run_nav(NavOptions { url, json }),
        Commands::Compare {
            url,
            target,
            output,
            timeout_secs,
            json,
        } => compare::run_compare(CompareOptions {
            url,
            target,
            output,
            timeout_secs,
            json,
        }),
        Commands::Diff { old, new, output, json } => {
            local_diff::run_local_diff(LocalDiffOptions { old, new, output, json })
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
