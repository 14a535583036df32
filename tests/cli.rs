use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn auto_mode_collects_bonuses_on_the_way() {
    let mut cmd = Command::cargo_bin("gridbot").unwrap();
    cmd.args(["--map", "tests/maps/corridor.txt", "--mode", "auto", "--plain", "--once"]);

    cmd.assert()
        .success()
        .stdout(str::contains(". . . . . R\nScore: 20"))
        .stdout(str::contains("Reached the goal! Final score: 20"));
}

#[test]
fn auto_mode_reports_unreachable_goal() {
    let mut cmd = Command::cargo_bin("gridbot").unwrap();
    cmd.args(["--map", "tests/maps/walled.txt", "--mode", "auto", "--plain", "--once"]);

    cmd.assert()
        .success()
        .stdout(str::contains("No path from (0, 0) to (4, 2). Final score: 0"));
}

#[test]
fn manual_mode_reads_moves_from_lines() {
    let mut cmd = Command::cargo_bin("gridbot").unwrap();
    cmd.args(["--map", "tests/maps/corridor.txt", "--mode", "manual", "--plain", "--once"])
        .write_stdin("dd\nddd\n");

    cmd.assert()
        .success()
        .stdout(str::contains("Reached the goal! Final score: 20"));
}

#[test]
fn manual_mode_quits_on_request() {
    let mut cmd = Command::cargo_bin("gridbot").unwrap();
    cmd.args(["--map", "tests/maps/corridor.txt", "--mode", "manual", "--plain", "--once"])
        .write_stdin("dd\nquit\n");

    cmd.assert()
        .success()
        .stdout(str::contains("Game aborted. Final score: 10"));
}

#[test]
fn prompts_for_missing_settings() {
    let mut cmd = Command::cargo_bin("gridbot").unwrap();
    cmd.args(["--seed", "7", "--plain"]).write_stdin("6\n5\n0\n0\na\nn\n");

    cmd.assert()
        .success()
        .stdout(str::contains("Width of the grid: "))
        .stdout(str::contains("Choose the mode: (m)anual or (a)utomatic: "))
        .stdout(str::contains("Reached the goal! Final score: 0"))
        .stdout(str::contains("Play again? (y/n): "));
}

#[test]
fn plays_again_until_declined() {
    let mut cmd = Command::cargo_bin("gridbot").unwrap();
    cmd.args(["--map", "tests/maps/corridor.txt", "--mode", "auto", "--plain"])
        .write_stdin("y\nn\n");

    cmd.assert()
        .success()
        .stdout(str::contains("Reached the goal! Final score: 20").count(2))
        .stdout(str::contains("Play again? (y/n): ").count(2));
}

#[test]
fn over_dense_settings_fail() {
    let mut cmd = Command::cargo_bin("gridbot").unwrap();
    cmd.args([
        "--width", "2", "--height", "2", "--obstacles", "100", "--bonuses", "0", "--mode",
        "auto", "--plain", "--once",
    ]);

    cmd.assert()
        .failure()
        .stderr(str::contains("Failed to generate grid."));
}

#[test]
fn huge_settings_fail_cleanly() {
    let mut cmd = Command::cargo_bin("gridbot").unwrap();
    cmd.args([
        "--width", "4294967296", "--height", "4294967296", "--obstacles", "0", "--bonuses", "0",
        "--mode", "auto", "--plain", "--once",
    ]);

    cmd.assert()
        .failure()
        .stderr(str::contains("Failed to generate grid."))
        .stderr(str::contains("Invalid grid size(4294967296 x 4294967296)"));
}

#[test]
fn bad_map_fails() {
    let mut cmd = Command::cargo_bin("gridbot").unwrap();
    cmd.args(["--map", "tests/maps/bad_row.txt", "--mode", "auto", "--plain", "--once"]);

    cmd.assert()
        .failure()
        .stderr(str::contains("Failed to load map from given file"));
}
