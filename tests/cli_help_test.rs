#[cfg(test)]
mod cli_help_tests {
    use assert_cmd::prelude::*;
    use std::process::Command;

    #[test]
    fn test_cli_help_output() {
        let mut cmd = Command::cargo_bin("odcli").unwrap();

        let assert_result = cmd.arg("--help").assert().success();
        let output = assert_result.get_output();
        let help_output = String::from_utf8_lossy(&output.stdout);

        assert!(help_output.contains("Usage:"));
        assert!(help_output.contains("Options:"));
        assert!(help_output.contains("Commands:"));

        for command in [
            "put", "trash", "restore", "rename", "move", "copy", "send", "id", "access",
        ] {
            assert!(
                help_output.contains(command),
                "help is missing command {}",
                command
            );
        }

        assert!(help_output.contains("--user"));
        assert!(help_output.contains("--password"));
        assert!(help_output.contains("-h, --help"));
        assert!(help_output.contains("-V, --version"));
    }

    #[test]
    fn test_put_help_output() {
        let mut cmd = Command::cargo_bin("odcli").unwrap();
        let assert_result = cmd.args(["put", "--help"]).assert().success();
        let help_output = String::from_utf8_lossy(&assert_result.get_output().stdout).to_string();

        assert!(help_output.contains("<local_file>"));
        assert!(help_output.contains("<remote_dir>"));
    }

    #[test]
    fn test_missing_subcommand_is_usage_error() {
        let mut cmd = Command::cargo_bin("odcli").unwrap();
        cmd.assert().failure();
    }
}
