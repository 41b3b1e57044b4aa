//! goext command-line interface
//!
//! Builds Go packages into Python extension modules with gopy

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process;

/// Display an error with optional backtrace information
fn display_error(err: &anyhow::Error, backtrace_enabled: bool) {
    eprintln!("error: {err}");

    // Show error chain
    let mut source = err.source();
    while let Some(err) = source {
        eprintln!("caused by: {err}");
        source = err.source();
    }

    if backtrace_enabled {
        let backtrace = err.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            eprintln!("\nBacktrace:");
            eprintln!("{backtrace}");
        }
    }
}

#[derive(Parser)]
#[command(name = "goext")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build Go packages into Python extension modules", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that touches the toolchain
#[derive(Args, Debug, Clone)]
pub(crate) struct ToolchainArgs {
    /// Go executable to use
    #[arg(long, env = "GOEXT_GO")]
    pub(crate) go_command: Option<String>,

    /// Python interpreter the extensions are built for
    #[arg(long, env = "GOEXT_PYTHON")]
    pub(crate) python: Option<String>,

    /// Path to a goext.toml to use instead of the project's
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Echo every command and show its output
    #[arg(long)]
    pub(crate) verbose: bool,

    /// Print the commands that would run without running them
    #[arg(short = 'n', long)]
    pub(crate) dry_run: bool,

    /// Print debug information
    #[arg(long)]
    pub(crate) debug: bool,

    /// Show a backtrace on errors (needs `RUST_BACKTRACE=1`)
    #[arg(long)]
    pub(crate) backtrace: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build every configured extension
    Build {
        #[command(flatten)]
        toolchain: ToolchainArgs,

        /// Also generate bindings into the package source directories
        #[arg(short, long)]
        inplace: bool,

        /// Rebuild even when artifacts are up to date
        #[arg(short, long)]
        force: bool,

        /// Directory for built extension modules (default: build/lib)
        #[arg(short, long)]
        build_lib: Option<PathBuf>,
    },

    /// Generate bindings for Go packages without compiling them
    Generate {
        #[command(flatten)]
        toolchain: ToolchainArgs,

        /// Logical module name of the extension (e.g. mypkg.go)
        #[arg(long)]
        name: String,

        /// Directory to write the generated files to
        #[arg(short, long)]
        output: PathBuf,

        /// Go packages to bind
        #[arg(required = true)]
        packages: Vec<String>,
    },

    /// Install gopy and goimports with `go install` if missing
    InstallTools {
        #[command(flatten)]
        toolchain: ToolchainArgs,
    },

    /// Report whether go, gopy and goimports can be found
    CheckTools {
        #[command(flatten)]
        toolchain: ToolchainArgs,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let (debug, backtrace) = match &cli.command {
        Commands::Build { toolchain, .. }
        | Commands::Generate { toolchain, .. }
        | Commands::InstallTools { toolchain }
        | Commands::CheckTools { toolchain } => (toolchain.debug, toolchain.backtrace),
        Commands::Completion { .. } => (false, false),
    };

    goext::init_debug(debug);

    let result = match cli.command {
        Commands::Build {
            toolchain,
            inplace,
            force,
            build_lib,
        } => commands::build::run(
            &toolchain,
            &commands::build::BuildOptions {
                inplace,
                force,
                build_lib,
            },
        ),
        Commands::Generate {
            toolchain,
            name,
            output,
            packages,
        } => commands::generate::run(&toolchain, &name, &output, &packages),
        Commands::InstallTools { toolchain } => commands::tools::install(&toolchain),
        Commands::CheckTools { toolchain } => commands::tools::check(&toolchain),
        Commands::Completion { shell } => commands::completion::run(shell),
    };

    if let Err(e) = result {
        display_error(&e, backtrace);
        process::exit(1);
    }
}

mod commands;
