//! Shared command parameters for all CLI commands.
//!
//! This module defines the parameter names and argument builders reused by
//! the command modules.

use clap::{Arg, ArgAction};
use std::{path::PathBuf, str::FromStr};
use strum::IntoEnumIterator;

use crate::model::AccessLevel;

// Transfer commands
pub const COMMAND_PUT: &str = "put";

// File commands
pub const COMMAND_TRASH: &str = "trash";
pub const COMMAND_RESTORE: &str = "restore";
pub const COMMAND_RENAME: &str = "rename";
pub const COMMAND_MOVE: &str = "move";
pub const COMMAND_COPY: &str = "copy";
pub const COMMAND_SEND: &str = "send";
pub const COMMAND_ID: &str = "id";
pub const COMMAND_ACCESS: &str = "access";

// Global parameter names
pub const PARAMETER_VERBOSE: &str = "verbose";
pub const PARAMETER_USER: &str = "user";
pub const PARAMETER_PASSWORD: &str = "password";
pub const PARAMETER_CONFIG: &str = "config";

// Parameter names
pub const PARAMETER_LOCAL_FILE: &str = "local_file";
pub const PARAMETER_REMOTE_DIR: &str = "remote_dir";
pub const PARAMETER_FILE: &str = "file";
pub const PARAMETER_NEW_NAME: &str = "new_name";
pub const PARAMETER_DESTINATION: &str = "dst_folder";
pub const PARAMETER_NAME: &str = "name";
pub const PARAMETER_OVERWRITE: &str = "overwrite";
pub const PARAMETER_TO: &str = "to";
pub const PARAMETER_SUBJECT: &str = "subject";
pub const PARAMETER_BODY: &str = "body";
pub const PARAMETER_PATH: &str = "path";
pub const PARAMETER_LEVEL: &str = "level";

/// Verbosity counter: 0 = errors, 1 = warnings, 2 = info, 3 = debug.
pub fn verbose_parameter() -> Arg {
    Arg::new(PARAMETER_VERBOSE)
        .short('v')
        .action(ArgAction::Count)
        .global(true)
        .help("Log level (-v warnings, -vv info, -vvv debug; errors are always shown)")
}

pub fn user_parameter() -> Arg {
    Arg::new(PARAMETER_USER)
        .short('u')
        .long(PARAMETER_USER)
        .num_args(1)
        .required(false)
        .global(true)
        .help("Username (e-mail address)")
}

pub fn password_parameter() -> Arg {
    Arg::new(PARAMETER_PASSWORD)
        .short('p')
        .long(PARAMETER_PASSWORD)
        .num_args(1)
        .required(false)
        .global(true)
        .help("Password")
}

/// Explicit configuration file, bypassing the default search.
pub fn config_parameter() -> Arg {
    Arg::new(PARAMETER_CONFIG)
        .long(PARAMETER_CONFIG)
        .num_args(1)
        .required(false)
        .global(true)
        .help("Configuration file (defaults to ~/.odcli or /etc/opendrive-cli.conf)")
        .value_parser(clap::value_parser!(PathBuf))
}

/// A remote file given by ID or by path.
pub fn file_parameter() -> Arg {
    Arg::new(PARAMETER_FILE)
        .required(true)
        .help("Remote file (ID or path)")
}

/// A remote folder given by ID or by path.
pub fn destination_parameter() -> Arg {
    Arg::new(PARAMETER_DESTINATION)
        .required(true)
        .help("Destination folder (ID or path)")
}

pub fn name_parameter() -> Arg {
    Arg::new(PARAMETER_NAME)
        .long(PARAMETER_NAME)
        .num_args(1)
        .required(false)
        .help("New file name at the destination")
}

pub fn overwrite_parameter() -> Arg {
    Arg::new(PARAMETER_OVERWRITE)
        .long(PARAMETER_OVERWRITE)
        .action(ArgAction::SetTrue)
        .help("Overwrite an existing file at the destination")
}

pub fn access_level_parameter() -> Arg {
    Arg::new(PARAMETER_LEVEL)
        .required(true)
        .help("Access level: private, public or hidden")
        .value_parser(parse_access_level)
}

fn parse_access_level(value: &str) -> Result<AccessLevel, String> {
    AccessLevel::from_str(value).map_err(|_| {
        let names: Vec<String> = AccessLevel::iter().map(|l| l.to_string()).collect();
        format!("expected one of {}", names.join(", "))
    })
}
