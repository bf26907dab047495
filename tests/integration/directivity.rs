// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use tempfile::TempDir;

use crate::{farfield, find_value, get_cmd_output, make_file_in_dir};

#[test]
fn test_two_element_directivity() {
    #[rustfmt::skip]
    let cmd = farfield()
        .args([
            "directivity",
            "--weights", "1", "1",
            "--spacing", "0.5",
        ])
        .ok();
    assert!(cmd.is_ok(), "directivity failed: {}", get_cmd_output(cmd).1);
    let (stdout, _) = get_cmd_output(cmd);
    let d = find_value(&stdout, "Analytical directivity: ");
    assert_abs_diff_eq!(d, 2.0, epsilon = 1e-6);
}

#[test]
fn test_numerical_directivity_agrees() {
    #[rustfmt::skip]
    let cmd = farfield()
        .args([
            "directivity",
            "--num-elements", "4",
            "-d", "0.5",
            "--numerical",
        ])
        .ok();
    assert!(cmd.is_ok(), "directivity failed: {}", get_cmd_output(cmd).1);
    let (stdout, _) = get_cmd_output(cmd);
    let analytical = find_value(&stdout, "Analytical directivity: ");
    let numerical = find_value(&stdout, "Numerical directivity (1° grid): ");
    assert_abs_diff_eq!(analytical, 4.0, epsilon = 1e-6);
    assert_relative_eq!(numerical, analytical, max_relative = 0.01);
}

#[test]
fn test_isotropic_pattern_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let (pattern_file, mut f) = make_file_in_dir("isotropic.txt", tmp_dir.path());
    // A 2 degree grid: 180 phi rows and 91 theta columns.
    for _ in 0..180 {
        writeln!(f, "{}", vec!["1.0"; 91].join(" ")).unwrap();
    }
    drop(f);

    #[rustfmt::skip]
    let cmd = farfield()
        .args([
            "directivity",
            "--pattern-file", &format!("{}", pattern_file.display()),
            "--step", "2",
        ])
        .ok();
    assert!(cmd.is_ok(), "directivity failed: {}", get_cmd_output(cmd).1);
    let (stdout, _) = get_cmd_output(cmd);
    let d = find_value(&stdout, "isotropic.txt: ");
    assert_abs_diff_eq!(d, 1.0, epsilon = 0.01);
}

#[test]
fn test_pattern_file_must_cover_the_sphere() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let (pattern_file, mut f) = make_file_in_dir("pattern.txt", tmp_dir.path());
    for _ in 0..10 {
        writeln!(f, "1 1 1").unwrap();
    }
    drop(f);

    #[rustfmt::skip]
    let cmd = farfield()
        .args([
            "directivity",
            "--pattern-file", &format!("{}", pattern_file.display()),
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("needs 360x181"), "{stderr}");
}

#[test]
fn test_bad_spacing() {
    let cmd = farfield()
        .args(["directivity", "--num-elements", "3", "--spacing", "0"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("spacing"), "{stderr}");
}
