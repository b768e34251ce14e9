mod args;
mod audit;
mod check;
mod debug;
mod error;
mod get;
mod new;

use clap::Parser;
use proc_exit::WithCodeResultExt as _;

use crate::error::Result;

fn main() {
    human_panic::setup_panic!();
    let result = run();
    proc_exit::exit(result);
}

fn run() -> proc_exit::ExitResult {
    let cli = Cli::parse();

    cli.color.write_global();
    let colored_stderr = anstream::AutoStream::choice(&std::io::stderr())
        != anstream::ColorChoice::Never;
    args::init_logging(cli.verbose.log_level_filter(), colored_stderr);

    cli.command.run().with_code(proc_exit::Code::FAILURE)?;

    Ok(())
}

/// Load and check the configuration of a generated blog
#[derive(Debug, clap::Parser)]
#[command(name = "blogconf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    color: colorchoice_clap::Color,

    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::Subcommand)]
enum Command {
    Init(new::InitArgs),
    Check(check::CheckArgs),
    Get(get::GetArgs),
    AuditFeeds(audit::AuditArgs),
    #[command(subcommand)]
    Debug(debug::DebugCommands),
}

impl Command {
    fn run(&self) -> Result<()> {
        match self {
            Self::Init(cmd) => cmd.run(),
            Self::Check(cmd) => cmd.run(),
            Self::Get(cmd) => cmd.run(),
            Self::AuditFeeds(cmd) => cmd.run(),
            Self::Debug(cmd) => cmd.run(),
        }
    }
}

#[test]
fn verify_app() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
