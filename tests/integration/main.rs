// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod directivity;
mod geometry;
mod image;
mod library;
mod pattern;

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
    process::Output,
    str::from_utf8,
};

use assert_cmd::{output::OutputError, Command};

fn farfield() -> Command {
    Command::cargo_bin("farfield").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

fn make_file_in_dir<T: AsRef<Path>, U: AsRef<Path>>(filename: T, dir: U) -> (PathBuf, File) {
    let path = dir.as_ref().join(filename);
    let f = File::create(&path).expect("couldn't make file");
    (path, f)
}

/// Write a HEALPix map (or any other array) with one value per line.
fn write_column<T: AsRef<Path>, U: AsRef<Path>>(filename: T, dir: U, values: &[f64]) -> PathBuf {
    let (path, mut f) = make_file_in_dir(filename, dir);
    for v in values {
        writeln!(f, "{v:e}").unwrap();
    }
    path
}

/// Read the tab-separated output of a subcommand.
fn read_tsv(file: &Path) -> Vec<Vec<f64>> {
    std::fs::read_to_string(file)
        .unwrap()
        .lines()
        .map(|line| line.split('\t').map(|v| v.parse().unwrap()).collect())
        .collect()
}

/// Find the number after `prefix` in a subcommand's (log) output.
fn find_value(stdout: &str, prefix: &str) -> f64 {
    let start = stdout
        .find(prefix)
        .unwrap_or_else(|| panic!("'{prefix}' isn't in the output:\n{stdout}"))
        + prefix.len();
    stdout[start..]
        .split_whitespace()
        .next()
        .unwrap()
        .parse()
        .unwrap()
}
