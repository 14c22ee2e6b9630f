//! sis-driver - drive SIS logic synthesis sessions from the command line.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sis_driver::config::{ConfigLoader, SisConfig};
use sis_driver::report::CommandReport;
use sis_driver::session::Session;

#[derive(Parser)]
#[command(
    name = "sis-driver",
    about = "Drive SIS logic synthesis sessions from the command line",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print results as JSON instead of text.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a single command against a fresh session.
    Exec {
        /// Circuit file to read before executing.
        #[arg(long)]
        input: Option<PathBuf>,
        /// The command line to classify and execute.
        command: Vec<String>,
    },
    /// Run a named workflow on a circuit file.
    Workflow {
        /// Workflow variant, e.g. lgate_area_mcnc or fsm_autoencoding_delay.
        variant: String,
        /// Circuit file to read first.
        file: PathBuf,
    },
    /// Print the statistics of a circuit file.
    Stats {
        /// Circuit file to read first.
        file: PathBuf,
    },
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn load_config(path: Option<PathBuf>) -> SisConfig {
    let loader = match path {
        Some(path) => ConfigLoader::with_path(path),
        None => ConfigLoader::new(),
    };
    match loader.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            std::process::exit(2);
        }
    }
}

fn print_report(report: &CommandReport, json: bool) {
    if json {
        match serde_json::to_string_pretty(report) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => eprintln!("{} {e}", "error:".red().bold()),
        }
        return;
    }

    if let Some(stdout) = report.stdout() {
        println!("{stdout}");
    }
    if let CommandReport::Read(read) = report {
        for warning in &read.warnings {
            println!("{} {warning}", "warning:".yellow().bold());
        }
    }
    for error in report.errors() {
        eprintln!("{} {error}", "error:".red().bold());
    }
    if report.success() {
        println!("{}", "ok".green().bold());
    }
}

/// Start a session, optionally reading an input file first. Returns `None`
/// when a step fails (after printing its errors).
async fn prepared_session(config: SisConfig, input: Option<PathBuf>) -> Option<Session> {
    let mut session = Session::with_config(config);

    let start_res = session.start().await;
    if !start_res.success {
        for error in &start_res.errors {
            eprintln!("{} {error}", "error:".red().bold());
        }
        return None;
    }

    if let Some(input) = input {
        let read_res = session.read_blif(&input).await;
        for warning in &read_res.warnings {
            println!("{} {warning}", "warning:".yellow().bold());
        }
        if !read_res.success {
            for error in &read_res.errors {
                eprintln!("{} {error}", "error:".red().bold());
            }
            let _ = session.stop().await;
            return None;
        }
    }

    Some(session)
}

async fn run_command(
    config: SisConfig,
    input: Option<PathBuf>,
    command: &str,
    json: bool,
) -> ExitCode {
    let Some(mut session) = prepared_session(config, input).await else {
        return ExitCode::FAILURE;
    };

    let report = session.run(command).await;
    print_report(&report, json);

    let _ = session.stop().await;
    if report.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config);

    match cli.command {
        Commands::Exec { input, command } => {
            let command = command.join(" ");
            if command.trim().is_empty() {
                eprintln!("{} no command given", "error:".red().bold());
                return ExitCode::FAILURE;
            }
            run_command(config, input, &command, cli.json).await
        }
        Commands::Workflow { variant, file } => {
            run_command(
                config,
                Some(file),
                &format!("bsis_script {variant}"),
                cli.json,
            )
            .await
        }
        Commands::Stats { file } => run_command(config, Some(file), "print_stats", cli.json).await,
    }
}
