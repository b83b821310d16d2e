use assert_cmd::Command;

#[test]
fn settings_subcommand_prints_resolved_configuration() {
    let output = Command::cargo_bin("gametracker-cli")
        .unwrap()
        .arg("settings")
        .env("GAMETRACKER_ENV", "staging")
        .env("GAMETRACKER_CONFIG_DIR", std::env::temp_dir().join("gametracker-cli-no-config"))
        .env("PORT", "4321")
        .env_remove("MONGODB_URI")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Staging"));
    assert!(stdout.contains("port: 4321"));
}

#[test]
fn unknown_environment_fails_fast() {
    Command::cargo_bin("gametracker-cli")
        .unwrap()
        .arg("settings")
        .env("GAMETRACKER_ENV", "qa")
        .assert()
        .failure();
}
