mod cmd;
mod output;
mod prompt;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, scaffold::ScaffoldArgs};
use output::Style;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "vtdd",
    about = "Test-first scaffolding for Vue 3 components: requirements in, red tests out",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .vtdd/, .git/ or package.json)
    #[arg(long, global = true, env = "VTDD_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write vtdd config and Vitest setup files into the project
    Init,

    /// Interactively collect requirements, open an issue, and optionally scaffold
    Issue,

    /// Generate a test file from a JSON requirements payload (batch mode)
    ///
    /// The test file is printed between TEST_CONTENT_START and TEST_CONTENT_END
    /// lines on stdout; the summary goes to stderr.
    Generate {
        component_name: Option<String>,
        requirements_json: Option<String>,
        issue_number: Option<String>,
        issue_title: Option<String>,
        /// Read requirements from an issue body written by `vtdd issue`
        #[arg(long, value_name = "FILE")]
        from_issue: Option<PathBuf>,
    },

    /// Write a component and its red test file into the components directory
    Scaffold(ScaffoldArgs),

    /// Check a test file for the structural markers of a TDD scaffold
    Check {
        file: PathBuf,
        /// Component name (default: file name up to the first '.')
        #[arg(long)]
        component: Option<String>,
    },

    /// Inspect or validate the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::Level::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let style = Style::detect(cli.no_color);
    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Issue => cmd::issue::run(&root, style),
        Commands::Generate {
            component_name,
            requirements_json,
            issue_number,
            issue_title,
            from_issue,
        } => cmd::generate::run(
            cmd::generate::GenerateArgs {
                component_name,
                requirements_json,
                issue_number,
                issue_title,
                from_issue,
            },
            style,
            cli.json,
        ),
        Commands::Scaffold(args) => cmd::scaffold::run(&root, args, style, cli.json),
        Commands::Check { file, component } => {
            cmd::check::run(&file, component.as_deref(), style, cli.json)
        }
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("{} {e:#}", style.error("error:"));
        std::process::exit(1);
    }
}
