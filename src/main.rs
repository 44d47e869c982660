use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;

use cmd::{ParseArgs, TypesArgs};
use loom::{log_debug, utils};

/// Loom - classify generator arguments.
///
/// Tokens are split into a model name (first plain token), positional args
/// (later plain tokens) and typed params (KEY:TYPE, split on the first colon).
///
///   loom parse model user name:string
///   loom parse --line 'model post "title:string"' --json
///   loom --path weave parse --args-file fields.yaml model post
///   loom types
///
/// Global flags / env:
///   -v / -vv        Increase verbosity (logs go to stderr)
///   -q / --quiet    Errors only
///   -p / --path     Base path results are keyed by (or LOOM_PATH env, default "loom")
#[derive(Parser, Debug)]
#[command(
    name = "loom",
    version,
    author,
    about = "Loom - classify generator arguments into model, args and typed params",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Base path the classification is stored under
    #[arg(short = 'p', long = "path", global = true, value_name = "PATH")]
    path: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify tokens into model name, args and params
    Parse(ParseArgs),

    /// List recognized param types
    Types(TypesArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    // Flag > LOOM_PATH env > default
    let base_path = match cmd::source::resolve_path(cli.path.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Invalid base path: {e}");
            std::process::exit(2);
        }
    };
    log_debug!("base path: {base_path}");

    match cli.command {
        Commands::Parse(args) => cmd::execute_parse(args, &base_path),
        Commands::Types(args) => cmd::execute_types(args),
    }
}
