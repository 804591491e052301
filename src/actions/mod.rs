//! Command execution.
//!
//! Turns parsed arguments into a logged-in [`SessionManager`] and runs the
//! requested verb against it.

use clap::ArgMatches;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::{
    commands::{
        params::{
            COMMAND_ACCESS, COMMAND_COPY, COMMAND_ID, COMMAND_MOVE, COMMAND_PUT, COMMAND_RENAME,
            COMMAND_RESTORE, COMMAND_SEND, COMMAND_TRASH,
        },
        PARAMETER_CONFIG, PARAMETER_PASSWORD, PARAMETER_USER,
    },
    configuration::Configuration,
    error::CliError,
    http_utils::{HttpRequestConfig, Transport},
    session::SessionManager,
};

pub mod files;
pub mod transfer;

/// Load the configuration named by `--config`, or search the default locations.
pub fn load_configuration(matches: &ArgMatches) -> Result<Configuration, CliError> {
    let configuration = match matches.get_one::<PathBuf>(PARAMETER_CONFIG) {
        Some(path) => Configuration::load_from_file(path)?,
        None => Configuration::load_default()?,
    };
    Ok(configuration)
}

/// Resolve credentials, log in, run the verb and log out again.
pub fn execute_command(matches: &ArgMatches) -> Result<(), CliError> {
    let configuration = load_configuration(matches)?;
    let credentials = configuration.resolve_credentials(
        matches.get_one::<String>(PARAMETER_USER).map(String::as_str),
        matches.get_one::<String>(PARAMETER_PASSWORD).map(String::as_str),
    )?;
    info!("Using username {}", credentials.username);

    let mut session = SessionManager::new(
        HttpRequestConfig::from_configuration(&configuration),
        credentials,
    )?;
    if !session.login() {
        return Err(CliError::LoginFailed);
    }

    let result = dispatch(&session, matches);
    session.logout();
    result
}

/// Run the subcommand in `matches` on an already logged-in session.
pub fn dispatch<T: Transport>(
    session: &SessionManager<T>,
    matches: &ArgMatches,
) -> Result<(), CliError> {
    let files = session.files();
    match matches.subcommand() {
        Some((COMMAND_PUT, sub_matches)) => transfer::put(&files, sub_matches),
        Some((COMMAND_TRASH, sub_matches)) => files::trash(&files, sub_matches),
        Some((COMMAND_RESTORE, sub_matches)) => files::restore(&files, sub_matches),
        Some((COMMAND_RENAME, sub_matches)) => files::rename(&files, sub_matches),
        Some((COMMAND_MOVE, sub_matches)) => files::move_or_copy(&files, sub_matches, true),
        Some((COMMAND_COPY, sub_matches)) => files::move_or_copy(&files, sub_matches, false),
        Some((COMMAND_SEND, sub_matches)) => files::send(&files, sub_matches),
        Some((COMMAND_ID, sub_matches)) => files::id(&files, sub_matches),
        Some((COMMAND_ACCESS, sub_matches)) => files::access(&files, sub_matches),
        Some((name, _)) => Err(CliError::UnsupportedSubcommand(name.to_string())),
        None => Err(CliError::UnsupportedSubcommand(String::from("unknown"))),
    }
}

/// Map an operation's success flag onto the CLI result.
pub(crate) fn check(operation: &str, succeeded: bool) -> Result<(), CliError> {
    if succeeded {
        debug!("{} succeeded", operation);
        Ok(())
    } else {
        Err(CliError::OperationFailed(operation.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cli_command;
    use crate::configuration::Credentials;
    use crate::file_ops::{ENDPOINT_ID_BY_PATH, ENDPOINT_MOVE_COPY, ENDPOINT_RENAME, ENDPOINT_TRASH};
    use crate::http_utils::testing::MockTransport;
    use crate::session::{ENDPOINT_LOGIN, ENDPOINT_SESSION_EXISTS};
    use serde_json::json;

    fn logged_in() -> SessionManager<MockTransport> {
        let mut session = SessionManager::with_transport(
            MockTransport::new(),
            MockTransport::base_url(),
            Credentials {
                username: "alice".to_string(),
                password: "secret".to_string(),
            },
        );
        session
            .transport()
            .respond(ENDPOINT_LOGIN, 200, r#"{"SessionID":"tok"}"#)
            .respond(ENDPOINT_SESSION_EXISTS, 200, r#"{"result":true}"#);
        assert!(session.login());
        session
    }

    fn run(session: &SessionManager<MockTransport>, args: &[&str]) -> Result<(), CliError> {
        let mut argv = vec!["odcli"];
        argv.extend_from_slice(args);
        let matches = cli_command().try_get_matches_from(argv).unwrap();
        dispatch(session, &matches)
    }

    #[test]
    fn test_dispatch_rename() {
        let session = logged_in();
        session.transport().respond(ENDPOINT_RENAME, 200, "{}");

        assert!(run(&session, &["rename", "123", "new.txt"]).is_ok());
        assert_eq!(
            session.transport().requests_to(ENDPOINT_RENAME)[0].body,
            json!({"session_id": "tok", "file_id": "123", "new_file_name": "new.txt"})
        );
    }

    #[test]
    fn test_dispatch_resolves_paths() {
        let session = logged_in();
        session
            .transport()
            .respond(ENDPOINT_ID_BY_PATH, 200, r#"{"FileId":"77"}"#)
            .respond(ENDPOINT_TRASH, 200, "{}");

        assert!(run(&session, &["trash", "/Documents/old.txt"]).is_ok());
        assert_eq!(
            session.transport().requests_to(ENDPOINT_TRASH)[0].body["file_id"],
            "77"
        );
    }

    #[test]
    fn test_dispatch_unresolved_path_fails() {
        let session = logged_in();
        session
            .transport()
            .respond(ENDPOINT_ID_BY_PATH, 404, "not found");

        assert!(matches!(
            run(&session, &["trash", "/missing.txt"]),
            Err(CliError::UnresolvedReference(_))
        ));
        assert!(session.transport().requests_to(ENDPOINT_TRASH).is_empty());
    }

    #[test]
    fn test_dispatch_copy() {
        let session = logged_in();
        session.transport().respond(ENDPOINT_MOVE_COPY, 200, "{}");

        assert!(run(&session, &["copy", "1", "2", "--overwrite"]).is_ok());
        let body = &session.transport().requests_to(ENDPOINT_MOVE_COPY)[0].body;
        assert_eq!(body["move"], "false");
        assert_eq!(body["overwrite_if_exists"], "true");
    }

    #[test]
    fn test_dispatch_operation_failure() {
        let session = logged_in();
        session.transport().respond(ENDPOINT_TRASH, 500, "boom");

        assert!(matches!(
            run(&session, &["trash", "1"]),
            Err(CliError::OperationFailed(_))
        ));
    }
}
