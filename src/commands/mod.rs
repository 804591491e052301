//! CLI command definitions and argument parsing.
//!
//! This module defines the CLI commands and their arguments using the clap
//! builder API. Each group of commands lives in its own file.

use clap::{ArgMatches, Command};

pub mod file;
pub mod params;
pub mod transfer;

pub use params::{
    COMMAND_ACCESS, COMMAND_COPY, COMMAND_ID, COMMAND_MOVE, COMMAND_PUT, COMMAND_RENAME,
    COMMAND_RESTORE, COMMAND_SEND, COMMAND_TRASH, PARAMETER_CONFIG, PARAMETER_PASSWORD,
    PARAMETER_USER, PARAMETER_VERBOSE,
};

/// Build the complete command tree.
pub fn cli_command() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(params::verbose_parameter())
        .arg(params::user_parameter())
        .arg(params::password_parameter())
        .arg(params::config_parameter())
        .subcommand(transfer::put_command())
        .subcommand(file::trash_command())
        .subcommand(file::restore_command())
        .subcommand(file::rename_command())
        .subcommand(file::move_command())
        .subcommand(file::copy_command())
        .subcommand(file::send_command())
        .subcommand(file::id_command())
        .subcommand(file::access_command())
}

/// Parse the process arguments, exiting with usage information on error.
pub fn create_cli_commands() -> ArgMatches {
    cli_command().get_matches()
}
