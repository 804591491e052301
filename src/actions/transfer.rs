use clap::ArgMatches;
use std::path::PathBuf;
use tracing::trace;

use crate::{
    actions::check,
    commands::params::{COMMAND_PUT, PARAMETER_LOCAL_FILE, PARAMETER_REMOTE_DIR},
    error::CliError,
    file_ops::FileOperations,
    http_utils::Transport,
    model::FileReference,
    upload::UploadOptions,
};

/// Upload a local file to a remote directory given by ID or path.
pub fn put<T: Transport>(
    files: &FileOperations<'_, T>,
    sub_matches: &ArgMatches,
) -> Result<(), CliError> {
    trace!("Executing \"put\" command...");

    let local_file = sub_matches
        .get_one::<PathBuf>(PARAMETER_LOCAL_FILE)
        .ok_or_else(|| CliError::MissingRequiredArgument(PARAMETER_LOCAL_FILE.to_string()))?;
    let remote_dir = sub_matches
        .get_one::<String>(PARAMETER_REMOTE_DIR)
        .map(|dir| FileReference::parse(dir))
        .ok_or_else(|| CliError::MissingRequiredArgument(PARAMETER_REMOTE_DIR.to_string()))?;

    check(
        COMMAND_PUT,
        files.put(local_file, &remote_dir, &UploadOptions::default()),
    )
}
