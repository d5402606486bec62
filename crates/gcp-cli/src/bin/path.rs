use clap::Parser;
use clap_complete::Shell;
use gcp_cli::cmd::path::PathArgs;

#[derive(Parser)]
#[command(
    name = "path",
    about = "List $PATH entries with executable counts",
    version
)]
struct Cli {
    /// Show duplicate path entries
    #[arg(short = 'd')]
    dupes: bool,

    /// Show executables shadowed by an earlier entry
    #[arg(short = 'f')]
    shadows: bool,

    /// Output as JSON
    #[arg(long, short = 'j')]
    json: bool,

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

    let path_var = std::env::var("PATH").unwrap_or_default();
    let home = gcp_core::paths::home_dir().ok();
    let args = PathArgs {
        dupes: cli.dupes,
        shadows: cli.shadows,
        json: cli.json,
    };
    gcp_cli::exit_on_error(gcp_cli::cmd::path::run(&path_var, home.as_deref(), args));
}
