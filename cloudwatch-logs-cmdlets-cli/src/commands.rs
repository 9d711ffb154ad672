//! Command tree generated from the operation table
//!
//! Every operation becomes a subcommand named after its command
//! (`Get-CWLLogGroup`) with a kebab-case alias (`get-log-group`). Each
//! parameter gets a `--flag`; parameters with a declared position are also
//! accepted positionally.

use clap::{Arg, ArgAction, ArgMatches, Command};
use cloudwatch_logs_cmdlets_core::{
    InvocationOptions, OperationCatalog, OperationDescriptor, ParamType, ParameterBindings,
    ParameterDescriptor,
};

pub(crate) const LIST_OPERATIONS: &str = "list-operations";

const SELECT: &str = "select";
const PASS_THRU: &str = "pass-thru";
const FORCE: &str = "force";
const NO_AUTO_ITERATION: &str = "no-auto-iteration";
const NEXT_TOKEN: &str = "next-token";

/// Add `list-operations` and one subcommand per operation to `cli`
pub(crate) fn register(mut cli: Command, catalog: &OperationCatalog) -> Command {
    cli = cli.subcommand(
        Command::new(LIST_OPERATIONS).about("List every available command and its API operation"),
    );
    for descriptor in catalog.operations() {
        cli = cli.subcommand(operation_command(descriptor, catalog.command_prefix()));
    }
    cli
}

fn operation_command(descriptor: &OperationDescriptor, command_prefix: &str) -> Command {
    let mut cmd = Command::new(descriptor.command.clone())
        .visible_alias(descriptor.kebab_name(command_prefix))
        .about(descriptor.description.clone())
        .long_about(format!(
            "{}\n\nAPI operation: {}",
            descriptor.description, descriptor.operation
        ));

    for param in &descriptor.parameters {
        cmd = cmd.arg(named_arg(param));
    }
    for (index, param) in descriptor.positional_parameters().into_iter().enumerate() {
        cmd = cmd.arg(positional_arg(param, index + 1));
    }

    cmd = cmd.arg(
        Arg::new(SELECT)
            .long(SELECT)
            .value_name("EXPR")
            .help("Output selection: '*' for the whole response, a response field name, or '^Parameter'"),
    );
    if let Some(pass_thru) = &descriptor.pass_thru {
        cmd = cmd.arg(
            Arg::new(PASS_THRU)
                .long(PASS_THRU)
                .action(ArgAction::SetTrue)
                .help(format!("Emit the value of {pass_thru} instead of the response")),
        );
    }
    cmd = cmd.arg(
        Arg::new(FORCE)
            .long(FORCE)
            .action(ArgAction::SetTrue)
            .help("Skip the confirmation prompt for operations that change resources"),
    );

    if descriptor.is_paginated() {
        cmd = cmd
            .arg(
                Arg::new(NO_AUTO_ITERATION)
                    .long(NO_AUTO_ITERATION)
                    .action(ArgAction::SetTrue)
                    .help("Fetch a single page and report the next token instead of following it"),
            )
            .arg(
                Arg::new(NEXT_TOKEN)
                    .long(NEXT_TOKEN)
                    .value_name("TOKEN")
                    .help("Start from this continuation token and fetch a single page"),
            );
    }

    cmd
}

fn named_arg(param: &ParameterDescriptor) -> Arg {
    let flag = param.flag_name();
    let arg = Arg::new(param.name.clone())
        .long(flag.clone())
        .help(param_help(param));

    match param.param_type {
        ParamType::Boolean => arg
            .value_name("BOOL")
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true"),
        ParamType::StringList => arg
            .value_name(value_name(&flag))
            .action(ArgAction::Append),
        ParamType::StringMap => arg.value_name("KEY=VALUE").action(ArgAction::Append),
        ParamType::Json => arg.value_name("JSON"),
        _ => arg.value_name(value_name(&flag)),
    }
}

fn positional_arg(param: &ParameterDescriptor, index: usize) -> Arg {
    let arg = Arg::new(positional_id(param))
        .index(index)
        .value_name(param.name.clone())
        .conflicts_with(param.name.clone())
        .help(format!("Same as --{}", param.flag_name()));

    if param.param_type.is_multi_valued() {
        arg.action(ArgAction::Append)
    } else {
        arg
    }
}

fn positional_id(param: &ParameterDescriptor) -> String {
    format!("{}:pos", param.name)
}

fn value_name(flag: &str) -> String {
    flag.to_uppercase().replace('-', "_")
}

fn param_help(param: &ParameterDescriptor) -> String {
    let mut help = param.description.clone();
    if param.required {
        help.push_str(" [required]");
    }
    if param.param_type == ParamType::Timestamp {
        help.push_str(" (epoch milliseconds or RFC 3339)");
    }
    help
}

/// Parameter values given on the command line, keyed by parameter name
pub(crate) fn bindings_from_matches(
    descriptor: &OperationDescriptor,
    matches: &ArgMatches,
    bindings: &mut ParameterBindings,
) {
    for param in &descriptor.parameters {
        let values = matches
            .get_many::<String>(&param.name)
            .or_else(|| {
                param
                    .position
                    .and_then(|_| matches.get_many::<String>(&positional_id(param)))
            });

        if let Some(values) = values {
            bindings.bind_text(&param.name, values.cloned());
        }
    }
}

/// Universal flags shared by every operation command
pub(crate) fn options_from_matches(
    descriptor: &OperationDescriptor,
    matches: &ArgMatches,
) -> InvocationOptions {
    let flag = |id: &str| matches.try_get_one::<bool>(id).ok().flatten().copied().unwrap_or(false);
    let value = |id: &str| {
        matches
            .try_get_one::<String>(id)
            .ok()
            .flatten()
            .cloned()
    };

    InvocationOptions {
        select: value(SELECT),
        pass_thru: descriptor.pass_thru.is_some() && flag(PASS_THRU),
        force: flag(FORCE),
        no_auto_iteration: flag(NO_AUTO_ITERATION),
        next_token: value(NEXT_TOKEN),
    }
}

/// One line per operation: command, alias and API operation
pub(crate) fn operation_table(catalog: &OperationCatalog) -> String {
    let rows: Vec<(String, String, &str)> = catalog
        .operations()
        .iter()
        .map(|d| {
            (
                d.command.clone(),
                d.kebab_name(catalog.command_prefix()),
                d.operation.as_str(),
            )
        })
        .collect();

    let command_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(0);
    let alias_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(0);

    let mut table = String::new();
    for (command, alias, operation) in rows {
        table.push_str(&format!(
            "{command:<command_width$}  {alias:<alias_width$}  {operation}\n"
        ));
    }
    table
}
