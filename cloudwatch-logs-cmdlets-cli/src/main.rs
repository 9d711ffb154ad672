//! `cwl`: every Amazon CloudWatch Logs operation as a command.

mod commands;
mod input;
mod output;
mod prompt;

use anyhow::{Context, Result};
use clap::{ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser};
use cloudwatch_logs_cmdlets_client::{ClientConfig, LogsClient};
use cloudwatch_logs_cmdlets_core::{
    CmdletError, CmdletRunner, Invocation, OperationCatalog, ParameterBindings,
};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::input::InputError;
use crate::output::{JsonEmitter, OutputFormat};
use crate::prompt::TerminalPrompt;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_USAGE: i32 = 2;
const EXIT_INTERRUPTED: i32 = 130;

#[derive(Parser, Debug)]
#[command(
    name = "cwl",
    author,
    version,
    about = "Run Amazon CloudWatch Logs operations from the command line",
    long_about = "Run Amazon CloudWatch Logs operations from the command line.\n\n\
Each API operation is a command, e.g. Get-CWLLogGroup (alias get-log-group) for \
DescribeLogGroups. Results are written to stdout as JSON, one document per object.\n\
Use `cwl list-operations` to see every command.",
    subcommand_required = true,
    arg_required_else_help = true
)]
struct Cli {
    /// AWS region to send requests to
    #[arg(long, env = "AWS_REGION", global = true)]
    region: Option<String>,

    /// Named profile from the shared AWS config files
    #[arg(long, env = "AWS_PROFILE", global = true)]
    profile: Option<String>,

    /// Send requests to this endpoint instead of the regional one
    #[arg(long, env = "CWL_ENDPOINT_URL", global = true)]
    endpoint_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECONDS", global = true)]
    timeout_secs: Option<u64>,

    /// Output format for emitted objects
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    output: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Read parameters from a JSON object in FILE, or stdin for '-'
    #[arg(long, value_name = "FILE", global = true)]
    input_json: Option<PathBuf>,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        ClientConfig {
            region: self.region.clone(),
            profile: self.profile.clone(),
            endpoint_url: self.endpoint_url.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Cancel `token` on Ctrl-C
fn cancel_on_interrupt(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted; cancelling the in-flight request");
            token.cancel();
        }
    });
}

fn exit_code(error: &anyhow::Error) -> i32 {
    if let Some(cmdlet) = error.downcast_ref::<CmdletError>() {
        return match cmdlet {
            CmdletError::Cancelled => EXIT_INTERRUPTED,
            e if e.is_usage_error() => EXIT_USAGE,
            _ => EXIT_FAILURE,
        };
    }
    if error.downcast_ref::<InputError>().is_some() {
        return EXIT_USAGE;
    }
    EXIT_FAILURE
}

async fn run_operation(
    cli: &Cli,
    catalog: &OperationCatalog,
    name: &str,
    matches: &ArgMatches,
) -> Result<i32> {
    let descriptor = catalog
        .get(name)
        .ok_or_else(|| CmdletError::UnknownOperation(name.to_string()))?;

    let mut bindings = ParameterBindings::new();
    if let Some(path) = &cli.input_json {
        let document = input::read_document(path)?;
        input::bind_document(descriptor, document, &mut bindings);
    }
    commands::bindings_from_matches(descriptor, matches, &mut bindings);
    let options = commands::options_from_matches(descriptor, matches);

    let prepared = Invocation::new(descriptor)
        .with_bindings(bindings)
        .with_options(options)
        .prepare(&TerminalPrompt)
        .with_context(|| format!("{} failed", descriptor.command))?;
    if prepared.declined() {
        eprintln!(
            "{} was not confirmed; nothing was changed. Pass --force to skip confirmation.",
            descriptor.command
        );
        return Ok(EXIT_SUCCESS);
    }

    let client = LogsClient::from_config(&cli.client_config())
        .await
        .context("Failed to configure the CloudWatch Logs client")?;
    log::info!(
        "Running {} ({}) against {}",
        descriptor.command,
        descriptor.operation,
        client.endpoint()
    );

    let cancel = CancellationToken::new();
    cancel_on_interrupt(cancel.clone());

    let runner = CmdletRunner::new(client);
    let mut emitter = JsonEmitter::new(std::io::stdout(), cli.output);
    let report = runner
        .execute(prepared, &mut emitter, &cancel)
        .await
        .with_context(|| format!("{} failed", descriptor.command))?;

    if let Some(token) = &report.next_token {
        eprintln!("More results are available. Continue with --next-token {token}");
    }

    Ok(EXIT_SUCCESS)
}

async fn run(cli: &Cli, catalog: &OperationCatalog, matches: &ArgMatches) -> Result<i32> {
    match matches.subcommand() {
        Some((commands::LIST_OPERATIONS, _)) => {
            print!("{}", commands::operation_table(catalog));
            Ok(EXIT_SUCCESS)
        }
        Some((name, sub_matches)) => run_operation(cli, catalog, name, sub_matches).await,
        None => Err(CmdletError::UnknownOperation(String::new()).into()),
    }
}

#[tokio::main]
async fn main() {
    let catalog = match OperationCatalog::embedded() {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error: failed to load the operation table: {e}");
            process::exit(EXIT_FAILURE);
        }
    };

    let matches = commands::register(Cli::command(), &catalog).get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };
    init_logging(cli.verbose);

    let code = match run(&cli, &catalog, &matches).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_code(&e)
        }
    };
    process::exit(code);
}
