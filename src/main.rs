use anyhow::Result;
use clap::Parser;
use gemrm::commands::{self, Config, UninstallArgs};
use gemrm::runtime::{ConsoleUi, RealRuntime};
use gemrm::uninstall::HookRegistry;
use std::path::PathBuf;

/// gemrm - remove installed packages
///
/// Uninstalls packages from a gem-style install directory, checking that no
/// installed package still depends on what is removed.
///
/// Examples:
///   gemrm uninstall rake              # Uninstall rake, asking which version if several
///   gemrm uninstall rake -v '< 13'    # Uninstall versions of rake older than 13
///   gemrm list                        # Show installed packages
#[derive(Parser, Debug)]
#[command(author, version = env!("GEMRM_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Install directory (overrides defaults; also via GEM_HOME)
    #[arg(
        long = "install-dir",
        short = 'i',
        env = "GEM_HOME",
        value_name = "DIR",
        global = true
    )]
    pub install_dir: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Uninstall a package
    Uninstall(UninstallCli),

    /// List installed packages
    List(ListCli),
}

#[derive(clap::Args, Debug)]
pub struct UninstallCli {
    /// Name of the package to uninstall
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Version requirement to match, e.g. "1.0" or ">= 2, < 3"
    #[arg(short = 'v', long = "version", value_name = "REQ")]
    pub version: Option<String>,

    /// Uninstall all matching versions without asking
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Ignore dependency requirements while uninstalling
    #[arg(short = 'I', long)]
    pub ignore_dependencies: bool,

    /// Remove executables without confirmation
    #[arg(short = 'x', long, conflicts_with = "no_executables")]
    pub executables: bool,

    /// Keep executables without asking
    #[arg(long)]
    pub no_executables: bool,

    /// Directory to remove executables from
    #[arg(short = 'n', long = "bindir", value_name = "DIR")]
    pub bin_dir: Option<PathBuf>,

    /// Apply GEMRM_EXEC_FORMAT to executable names
    #[arg(long)]
    pub format_executable: bool,

    /// Also uninstall from the per-user install directory
    #[arg(long)]
    pub user_install: bool,
}

#[derive(clap::Args, Debug)]
pub struct ListCli {
    /// Only list packages with this name
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Include the per-user install directory
    #[arg(long)]
    pub user_install: bool,
}

impl From<UninstallCli> for UninstallArgs {
    fn from(cli: UninstallCli) -> Self {
        Self {
            name: cli.name,
            version: cli.version,
            all: cli.all,
            ignore_dependencies: cli.ignore_dependencies,
            executables: cli.executables,
            no_executables: cli.no_executables,
            bin_dir: cli.bin_dir,
            format_executable: cli.format_executable,
            user_install: cli.user_install,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;
    let config = Config::load(&runtime, cli.install_dir)?;

    match cli.command {
        Commands::Uninstall(args) => {
            let hooks = HookRegistry::new();
            commands::uninstall(&runtime, &ConsoleUi, &hooks, args.into(), &config)?
        }
        Commands::List(args) => commands::list(
            &runtime,
            args.name.as_deref(),
            args.user_install,
            &config,
            &mut std::io::stdout(),
        )?,
    }
    Ok(())
}
