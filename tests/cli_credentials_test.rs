#[cfg(test)]
mod cli_credentials_tests {
    use assert_cmd::prelude::*;
    use predicates::prelude::*;
    use std::io::Write;
    use std::path::Path;
    use std::process::Command;

    const UNREACHABLE: &str =
        "[global]\nuser = alice@example.com\npassword = secret\napi_url = http://127.0.0.1:1/api/v1/";

    // HOME points at an empty directory so a real ~/.odcli is never read
    fn odcli(config: &Path) -> Command {
        let home = config.parent().unwrap_or(config).join("home");
        let mut cmd = Command::cargo_bin("odcli").unwrap();
        cmd.env("ODCLI_CONFIG", config)
            .env("HOME", home)
            .env_remove("RUST_LOG");
        cmd
    }

    fn unreachable_config() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", UNREACHABLE).unwrap();
        file
    }

    #[test]
    fn test_missing_credentials_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("absent.conf");

        odcli(&config)
            .args(["trash", "123"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Username or password not set"));
    }

    #[test]
    fn test_missing_password_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("absent.conf");

        odcli(&config)
            .args(["-u", "alice@example.com", "trash", "123"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Username or password not set"));
    }

    #[test]
    fn test_config_user_without_password() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[global]\nuser = alice@example.com").unwrap();

        odcli(file.path())
            .args(["id", "/Documents"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Username or password not set"));
    }

    #[test]
    fn test_login_failure_exit_code() {
        // nothing listens on port 1, so the login request is refused
        let file = unreachable_config();

        odcli(file.path())
            .args(["rename", "123", "new.txt"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Login failed"));
    }

    #[test]
    fn test_explicit_config_flag() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.conf");

        // --config names a file that cannot be read
        odcli(&missing)
            .arg("--config")
            .arg(&missing)
            .args(["trash", "123"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("failed to load configuration data"));
    }

    #[test]
    fn test_errors_only_on_stderr_by_default() {
        let file = unreachable_config();

        odcli(file.path())
            .args(["trash", "123"])
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Login failed"))
            .stderr(predicate::str::contains("Using username").not());
    }

    #[test]
    fn test_verbose_events_on_stdout() {
        let file = unreachable_config();

        odcli(file.path())
            .args(["-vv", "trash", "123"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("Using username alice@example.com"))
            .stdout(predicate::str::contains("Login failed").not())
            .stderr(predicate::str::contains("Login failed"));
    }

    #[test]
    fn test_missing_env_config_falls_back_to_home() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("home");
        std::fs::create_dir(&home).unwrap();
        std::fs::write(home.join(".odcli"), UNREACHABLE).unwrap();

        // credentials come from ~/.odcli, so the run gets as far as the login
        odcli(&dir.path().join("absent.conf"))
            .args(["trash", "123"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Login failed"));
    }
}
