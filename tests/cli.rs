use assert_cmd::prelude::*;
use assert_fs::{prelude::*, TempDir};
use std::process::Command;

// We check the --help output in order to confirm that the clap cli is setup correctly.
// Any arguments that are incorrectly will cause clap to panic regardless of the arguments or
// options provided.
// Calling help does not require any application logic so if this tests fails then we know it
// is to do with the clap cli setup code.
#[test]
fn check_clap_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("bookfetch")?;

    cmd.arg("--help");
    cmd.assert().success();

    Ok(())
}

// None of the following reach the network, they stop at validation or at the input file.

#[test]
fn no_title_and_no_input_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let mut cmd = Command::cargo_bin("bookfetch")?;

    cmd.current_dir(dir.path());
    cmd.assert().code(2);

    Ok(())
}

#[test]
fn covers_dir_needs_input_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("bookfetch")?;

    cmd.args(["Dune", "--covers-dir", "covers"]);
    cmd.assert().code(2);

    Ok(())
}

#[test]
fn show_candidates_not_supported_in_batch() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let titles = dir.child("titles.txt");
    titles.write_str("Dune\n")?;

    let mut cmd = Command::cargo_bin("bookfetch")?;
    cmd.arg("--input-file")
        .arg(titles.path())
        .args(["--show-candidates", "3"]);
    cmd.assert().code(2);

    Ok(())
}

#[test]
fn missing_input_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    let mut cmd = Command::cargo_bin("bookfetch")?;
    cmd.arg("--input-file").arg(dir.child("missing.txt").path());
    cmd.assert().code(2);

    Ok(())
}

#[test]
fn input_file_without_titles() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let titles = dir.child("titles.txt");
    titles.write_str("# nothing to see\n\n   \n")?;

    let mut cmd = Command::cargo_bin("bookfetch")?;
    cmd.arg("--input-file").arg(titles.path());
    cmd.assert().code(1);

    Ok(())
}

#[test]
fn standard_preset_is_used_without_arguments() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    dir.child("titles.txt").write_str("# only comments\n")?;

    let mut cmd = Command::cargo_bin("bookfetch")?;
    cmd.current_dir(dir.path());
    // titles.txt is picked up as the input file, which has no titles
    cmd.assert().code(1);

    Ok(())
}
