//! File command definitions.
//!
//! This module defines CLI commands that act on a single remote file.

use crate::commands::params::{
    access_level_parameter, destination_parameter, file_parameter, name_parameter,
    overwrite_parameter, COMMAND_ACCESS, COMMAND_COPY, COMMAND_ID, COMMAND_MOVE, COMMAND_RENAME,
    COMMAND_RESTORE, COMMAND_SEND, COMMAND_TRASH, PARAMETER_BODY, PARAMETER_NEW_NAME,
    PARAMETER_PATH, PARAMETER_SUBJECT, PARAMETER_TO,
};
use clap::{Arg, ArgAction, Command};

pub fn trash_command() -> Command {
    Command::new(COMMAND_TRASH)
        .about("Move a file to the trash")
        .arg(file_parameter())
}

pub fn restore_command() -> Command {
    Command::new(COMMAND_RESTORE)
        .about("Restore a file from the trash")
        .arg(file_parameter())
}

pub fn rename_command() -> Command {
    Command::new(COMMAND_RENAME)
        .about("Rename a file")
        .arg(file_parameter())
        .arg(
            Arg::new(PARAMETER_NEW_NAME)
                .required(true)
                .help("New file name"),
        )
}

pub fn move_command() -> Command {
    Command::new(COMMAND_MOVE)
        .about("Move a file into another folder")
        .visible_alias("mv")
        .arg(file_parameter())
        .arg(destination_parameter())
        .arg(name_parameter())
        .arg(overwrite_parameter())
}

pub fn copy_command() -> Command {
    Command::new(COMMAND_COPY)
        .about("Copy a file into another folder")
        .visible_alias("cp")
        .arg(file_parameter())
        .arg(destination_parameter())
        .arg(name_parameter())
        .arg(overwrite_parameter())
}

pub fn send_command() -> Command {
    Command::new(COMMAND_SEND)
        .about("Send a link to a file by e-mail")
        .arg(file_parameter())
        .arg(
            Arg::new(PARAMETER_TO)
                .long(PARAMETER_TO)
                .num_args(1)
                .required(true)
                .action(ArgAction::Append)
                .help("Recipient e-mail address (repeatable)"),
        )
        .arg(
            Arg::new(PARAMETER_SUBJECT)
                .long(PARAMETER_SUBJECT)
                .num_args(1)
                .help("Message subject"),
        )
        .arg(
            Arg::new(PARAMETER_BODY)
                .long(PARAMETER_BODY)
                .num_args(1)
                .help("Message body"),
        )
}

pub fn id_command() -> Command {
    Command::new(COMMAND_ID)
        .about("Print the ID of a file or folder given by path")
        .arg(
            Arg::new(PARAMETER_PATH)
                .required(true)
                .help("Remote path"),
        )
}

pub fn access_command() -> Command {
    Command::new(COMMAND_ACCESS)
        .about("Change who can see a file")
        .arg(file_parameter())
        .arg(access_level_parameter())
}
