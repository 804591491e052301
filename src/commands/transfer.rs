//! Transfer command definitions.

use crate::commands::params::{COMMAND_PUT, PARAMETER_LOCAL_FILE, PARAMETER_REMOTE_DIR};
use clap::{Arg, Command};
use std::path::PathBuf;

/// Create the upload command.
pub fn put_command() -> Command {
    Command::new(COMMAND_PUT)
        .about("Upload a file")
        .arg(
            Arg::new(PARAMETER_LOCAL_FILE)
                .required(true)
                .help("Local file to upload")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(PARAMETER_REMOTE_DIR)
                .required(true)
                .help("Remote directory (ID or path)"),
        )
}
