#![allow(deprecated)] // TODO: cargo_bin → cargo_bin_cmd! へ移行

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn stack() -> Command {
    let mut cmd = Command::cargo_bin("stack").unwrap();
    cmd.env_remove("STACKFLOW_CONFIG_PATH")
        .env_remove("STACKFLOW_STACK_NAME")
        .env_remove("STACKFLOW_REGION");
    cmd
}

/// CLIヘルプが正しく表示されることを確認
#[test]
fn test_cli_help() {
    stack()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("共有ストレージスタック"))
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("outputs"));
}

/// バージョン表示が正しく動作することを確認
#[test]
fn test_cli_version() {
    stack()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stackflow"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// deployコマンドのヘルプが正しく表示されることを確認
#[test]
fn test_deploy_help() {
    stack()
        .arg("deploy")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--stack-name"))
        .stdout(predicate::str::contains("--region"))
        .stdout(predicate::str::contains("--timeout"));
}

/// outputsコマンドのヘルプに --json が含まれることを確認
#[test]
fn test_outputs_help() {
    stack()
        .arg("outputs")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--json"));
}

/// 0秒のタイムアウトは拒否される
#[test]
fn test_deploy_rejects_zero_timeout() {
    stack()
        .args(["deploy", "--timeout", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--timeout"));
}

/// 不明なサブコマンドはエラー
#[test]
fn test_unknown_subcommand() {
    stack().arg("destroy").assert().failure();
}

/// 指定された設定ファイルが存在しない場合はAWSに接続する前に失敗する
#[test]
fn test_missing_config_path() {
    let temp_dir = tempfile::tempdir().unwrap();
    let missing = temp_dir.path().join("missing.yaml");

    stack()
        .arg("plan")
        .env("STACKFLOW_CONFIG_PATH", &missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("設定ファイルが見つかりません"));
}

/// 不正な設定ファイルは解析エラーになる
#[test]
fn test_invalid_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("stackflow.yaml"), "stack: devbox\n").unwrap();

    stack()
        .arg("outputs")
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("設定ファイルの解析に失敗しました"));
}
