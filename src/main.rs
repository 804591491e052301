use odcli::{
    actions::execute_command,
    commands::{create_cli_commands, PARAMETER_VERBOSE},
    exit_codes::OdExitCode,
    logging::{self, LogLevel},
};
use tracing::{debug, error, info};

/// Main entry point for the program
fn main() {
    let matches = create_cli_commands();

    // Intialize the logging subsystem
    logging::init(LogLevel::from_verbosity(matches.get_count(PARAMETER_VERBOSE)));
    debug!("Starting OpenDrive client");

    match execute_command(&matches) {
        Ok(()) => {
            info!("{}", OdExitCode::Success.message());
            std::process::exit(OdExitCode::Success.code());
        }
        Err(e) => {
            error!("{}", e);
            error!("{}", e.exit_code().message());
            std::process::exit(e.exit_code().code());
        }
    }
}
