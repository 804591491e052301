use clap::ArgMatches;
use tracing::trace;

use crate::{
    actions::check,
    commands::params::{
        COMMAND_ACCESS, COMMAND_COPY, COMMAND_ID, COMMAND_MOVE, COMMAND_RENAME, COMMAND_RESTORE,
        COMMAND_SEND, COMMAND_TRASH, PARAMETER_BODY, PARAMETER_DESTINATION, PARAMETER_FILE,
        PARAMETER_LEVEL, PARAMETER_NAME, PARAMETER_NEW_NAME, PARAMETER_OVERWRITE, PARAMETER_PATH,
        PARAMETER_SUBJECT, PARAMETER_TO,
    },
    error::CliError,
    file_ops::FileOperations,
    http_utils::Transport,
    model::{AccessLevel, FileReference},
};

fn required<'m>(sub_matches: &'m ArgMatches, name: &str) -> Result<&'m str, CliError> {
    sub_matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| CliError::MissingRequiredArgument(name.to_string()))
}

/// Read an ID-or-path argument and turn it into an ID.
pub(crate) fn resolve_argument<T: Transport>(
    files: &FileOperations<'_, T>,
    sub_matches: &ArgMatches,
    name: &str,
) -> Result<String, CliError> {
    let reference = FileReference::parse(required(sub_matches, name)?);
    files
        .resolve(&reference)
        .ok_or_else(|| CliError::UnresolvedReference(reference.to_string()))
}

pub fn trash<T: Transport>(
    files: &FileOperations<'_, T>,
    sub_matches: &ArgMatches,
) -> Result<(), CliError> {
    trace!("Executing \"trash\" command...");
    let file_id = resolve_argument(files, sub_matches, PARAMETER_FILE)?;
    check(COMMAND_TRASH, files.trash(&file_id))
}

pub fn restore<T: Transport>(
    files: &FileOperations<'_, T>,
    sub_matches: &ArgMatches,
) -> Result<(), CliError> {
    trace!("Executing \"restore\" command...");
    let file_id = resolve_argument(files, sub_matches, PARAMETER_FILE)?;
    check(COMMAND_RESTORE, files.restore(&file_id))
}

pub fn rename<T: Transport>(
    files: &FileOperations<'_, T>,
    sub_matches: &ArgMatches,
) -> Result<(), CliError> {
    trace!("Executing \"rename\" command...");
    let file_id = resolve_argument(files, sub_matches, PARAMETER_FILE)?;
    let new_name = required(sub_matches, PARAMETER_NEW_NAME)?;
    check(COMMAND_RENAME, files.rename(&file_id, new_name))
}

pub fn move_or_copy<T: Transport>(
    files: &FileOperations<'_, T>,
    sub_matches: &ArgMatches,
    move_file: bool,
) -> Result<(), CliError> {
    let command = if move_file { COMMAND_MOVE } else { COMMAND_COPY };
    trace!("Executing \"{}\" command...", command);

    let file_id = resolve_argument(files, sub_matches, PARAMETER_FILE)?;
    let folder_id = resolve_argument(files, sub_matches, PARAMETER_DESTINATION)?;
    let new_name = sub_matches.get_one::<String>(PARAMETER_NAME).map(String::as_str);
    let overwrite = sub_matches.get_flag(PARAMETER_OVERWRITE);

    check(
        command,
        files.move_or_copy(&file_id, &folder_id, move_file, overwrite, new_name),
    )
}

pub fn send<T: Transport>(
    files: &FileOperations<'_, T>,
    sub_matches: &ArgMatches,
) -> Result<(), CliError> {
    trace!("Executing \"send\" command...");
    let file_id = resolve_argument(files, sub_matches, PARAMETER_FILE)?;
    let recipients: Vec<&str> = sub_matches
        .get_many::<String>(PARAMETER_TO)
        .map(|values| values.map(String::as_str).collect())
        .unwrap_or_default();
    if recipients.is_empty() {
        return Err(CliError::MissingRequiredArgument(PARAMETER_TO.to_string()));
    }
    let subject = sub_matches.get_one::<String>(PARAMETER_SUBJECT).map(String::as_str);
    let body = sub_matches.get_one::<String>(PARAMETER_BODY).map(String::as_str);

    check(
        COMMAND_SEND,
        files.send_by_email(&file_id, &recipients.join(","), subject, body),
    )
}

/// Print the ID behind a path on standard output.
pub fn id<T: Transport>(
    files: &FileOperations<'_, T>,
    sub_matches: &ArgMatches,
) -> Result<(), CliError> {
    trace!("Executing \"id\" command...");
    let path = required(sub_matches, PARAMETER_PATH)?;
    match files.id_by_path(path) {
        Some(file_id) => {
            println!("{}", file_id);
            Ok(())
        }
        None => Err(CliError::OperationFailed(COMMAND_ID.to_string())),
    }
}

pub fn access<T: Transport>(
    files: &FileOperations<'_, T>,
    sub_matches: &ArgMatches,
) -> Result<(), CliError> {
    trace!("Executing \"access\" command...");
    let file_id = resolve_argument(files, sub_matches, PARAMETER_FILE)?;
    let level = sub_matches
        .get_one::<AccessLevel>(PARAMETER_LEVEL)
        .copied()
        .ok_or_else(|| CliError::MissingRequiredArgument(PARAMETER_LEVEL.to_string()))?;
    check(COMMAND_ACCESS, files.set_access(&file_id, level))
}
