use anyhow::Context;
use clap::Parser;
use clap_complete::Shell;
use gcp_cli::cmd::vs::{VsArgs, VsContext};
use gcp_cli::prompt::FuzzyChooser;
use gcp_core::config::Config;
use gcp_core::paths;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "vs",
    about = "Open a workspace directory in the editor, most recently used first",
    version
)]
struct Cli {
    /// Place to open (default: prompt, ranked by history)
    place: Option<String>,

    /// Directory inside the place (default: prompt, ranked by history)
    dir: Option<String>,

    /// Print the resolved directory instead of opening it
    #[arg(long, short = 'p')]
    print: bool,

    /// Print the ranked candidates and exit
    #[arg(long, short = 'l')]
    list: bool,

    /// Output as JSON
    #[arg(long, short = 'j')]
    json: bool,

    /// Config file (default: ~/.config/gcp-tools/config.yaml)
    #[arg(long, env = "VS_CONFIG")]
    config: Option<PathBuf>,

    /// Show debug output
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        gcp_cli::cmd::completion::run::<Cli>(shell);
        return;
    }

    gcp_cli::init_tracing(cli.verbose);
    gcp_cli::exit_on_error(run(cli));
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let home = paths::home_dir()?;
    let config_path = Config::resolve_path(cli.config.as_deref(), &home);
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config {}", config_path.display()))?;
    for w in config.validate() {
        tracing::warn!(level = ?w.level, "{}", w.message);
    }

    let ctx = VsContext { home, config };
    let args = VsArgs {
        place: cli.place,
        dir: cli.dir,
        print: cli.print,
        list: cli.list,
        json: cli.json,
    };
    gcp_cli::cmd::vs::run(&ctx, args, &mut FuzzyChooser)
}
