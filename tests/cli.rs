//! Integration tests for the `matrix-calc` binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn calc() -> Command {
    Command::cargo_bin("matrix-calc").unwrap()
}

#[test]
fn add_prints_result_table() {
    calc()
        .args(["add", "-a", "1 2; 3 4", "-b", "5 6; 7 8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Результат (2x2):"))
        .stdout(predicate::str::contains("12"));
}

#[test]
fn multiply_lists_steps_in_order() {
    let output = calc()
        .args(["multiply", "-a", "1 2; 3 4", "-b", "5 6; 7 8", "--steps"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let first = stdout
        .find("C(1, 1) += A(1, 1) * B(1, 1) = 1 * 5 = 5; 0 -> 5")
        .unwrap();
    let last = stdout
        .find("C(2, 2) += A(2, 2) * B(2, 2) = 4 * 8 = 32; 18 -> 50")
        .unwrap();
    assert!(first < last);
    assert!(stdout.contains("   8. "));
    assert!(!stdout.contains("   9. "));
}

#[test]
fn json_output_carries_result() {
    calc()
        .args(["--format", "json", "inverse", "-a", "2 0; 0 2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"operation\": \"inverse\""))
        .stdout(predicate::str::contains("0.5"));
}

#[test]
fn determinant_explains_substitution() {
    calc()
        .args(["determinant", "-a", "1 2; 3 4", "--explain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 * 4) - (2 * 3) = -2"))
        .stdout(predicate::str::contains("det(A) = -2"));
}

#[test]
fn matrix_can_be_read_from_file() {
    let dir = std::env::temp_dir().join(format!("matrix-calc-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("a.txt");
    std::fs::write(&path, "1 2 3\n4 5 6\n").unwrap();

    calc()
        .args(["transpose", "--matrix-a-file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Результат (3x2):"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn mismatched_shapes_fail() {
    calc()
        .args(["add", "-a", "1 2", "-b", "1; 2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot add a 1x2 matrix and a 2x1 matrix"));
}

#[test]
fn singular_inverse_fails() {
    calc()
        .args(["inverse", "-a", "1 2; 2 4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("singular"));
}

#[test]
fn empty_matrix_fails() {
    calc()
        .args(["transpose", "-a", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("matrix A is empty"));
}

#[test]
fn elimination_lists_row_operations() {
    calc()
        .args(["eliminate", "-a", "0 1; 1 1", "--steps"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R1 <-> R2"));
}

#[test]
fn demo_runs_all_operations() {
    calc()
        .args(["demo", "--size", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Демонстрация завершена."));
}

#[test]
fn demo_rejects_unsupported_size() {
    calc().args(["demo", "--size", "5"]).assert().failure();
}
