//! dogshell: post events, comments, metrics, tags, and dashboards from the terminal.

mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use commands::comment::CommentCommands;
use commands::dashboard::DashboardCommands;
use commands::event::EventCommands;
use commands::metric::MetricCommands;
use commands::search::SearchCommands;
use commands::tag::TagCommands;
use commands::{CommandError, Context};
use dog_lib::report::report;
use dog_lib::{Client, Credentials, Error, DEFAULT_API_HOST, DEFAULT_TIMEOUT_SECS};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dog")]
#[command(version, about = "dogshell: talk to the monitoring API from the command line", long_about = None)]
struct Cli {
    /// INI file with a [Connection] section holding apikey and appkey (default ~/.dogrc)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// API key; together with --application-key, the config file is not read
    #[arg(long = "api-key", value_name = "KEY")]
    api_key: Option<String>,

    /// Application key
    #[arg(long = "application-key", value_name = "KEY")]
    app_key: Option<String>,

    /// API base URL
    #[arg(long, env = "DATADOG_HOST", default_value = DEFAULT_API_HOST)]
    api_host: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Output format: plain (key/value lines), pretty (indented), raw (JSON)
    #[arg(short, long, default_value = "plain", value_enum)]
    output: OutputFormatArg,

    /// Shortcut for --output pretty
    #[arg(long, conflicts_with_all = ["raw", "output"])]
    pretty: bool,

    /// Shortcut for --output raw
    #[arg(long, conflicts_with = "output")]
    raw: bool,

    /// Show timestamps in UTC instead of the local timezone
    #[arg(long)]
    utc: bool,

    /// Log requests and responses to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormatArg {
    Plain,
    Pretty,
    Raw,
}

#[derive(Subcommand)]
enum Commands {
    /// Post, update, show, and delete comments
    Comment {
        #[command(subcommand)]
        command: CommentCommands,
    },
    /// Post, show, and stream events
    Event {
        #[command(subcommand)]
        command: EventCommands,
    },
    /// Submit metric points
    Metric {
        #[command(subcommand)]
        command: MetricCommands,
    },
    /// Search hosts and metrics
    Search {
        #[command(subcommand)]
        command: SearchCommands,
    },
    /// Manage host tags
    Tag {
        #[command(subcommand)]
        command: TagCommands,
    },
    /// Create, push, pull, and delete dashboards
    Dashboard {
        #[command(subcommand)]
        command: DashboardCommands,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let creds = match Credentials::resolve(
        cli.config.as_deref(),
        cli.api_key.as_deref(),
        cli.app_key.as_deref(),
    ) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = match Client::with_options(&creds, &cli.api_host, Duration::from_secs(cli.timeout))
    {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let format = if cli.pretty {
        output::OutputFormat::Pretty
    } else if cli.raw {
        output::OutputFormat::Raw
    } else {
        match cli.output {
            OutputFormatArg::Plain => output::OutputFormat::Plain,
            OutputFormatArg::Pretty => output::OutputFormat::Pretty,
            OutputFormatArg::Raw => output::OutputFormat::Raw,
        }
    };
    let ctx = Context {
        client: &client,
        format,
        use_utc: cli.utc,
    };

    match run(&ctx, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_failure(e);
            ExitCode::FAILURE
        }
    }
}

async fn run(ctx: &Context<'_>, cmd: Commands) -> Result<(), CommandError> {
    match cmd {
        Commands::Comment { command } => commands::comment::run(ctx, command).await,
        Commands::Event { command } => commands::event::run(ctx, command).await,
        Commands::Metric { command } => commands::metric::run(ctx, command).await,
        Commands::Search { command } => commands::search::run(ctx, command).await,
        Commands::Tag { command } => commands::tag::run(ctx, command).await,
        Commands::Dashboard { command } => commands::dashboard::run(ctx, command).await,
    }
}

fn print_failure(err: CommandError) {
    let mut stderr = io::stderr().lock();
    match err {
        CommandError::Reported => {}
        CommandError::Lib(Error::Api(e)) if !e.errors.is_empty() => {
            report(&e.errors, "ERROR: ", &mut stderr);
        }
        CommandError::Lib(e) => {
            report(&[e.to_string()], "Error: ", &mut stderr);
        }
        CommandError::Usage(msg) => {
            report(&[msg], "Error: ", &mut stderr);
        }
    }
}

/// Logs go to stderr; `-v` forces debug, otherwise `RUST_LOG` (default: errors only).
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("dog=debug,dog_lib=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
