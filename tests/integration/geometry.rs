// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use tempfile::TempDir;

use crate::{farfield, get_cmd_output, read_tsv};

#[test]
fn test_hexagonal_geometry() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("positions.tsv");

    #[rustfmt::skip]
    let cmd = farfield()
        .args([
            "geometry",
            "--layout", "hex",
            "--nx", "5",
            "--dx", "0.9",
            "--output", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "geometry failed: {}", get_cmd_output(cmd).1);

    let positions = read_tsv(&output);
    assert_eq!(positions.len(), 5 * 3 + 4 * 2);
    assert!(positions.iter().all(|p| p.len() == 2));
    assert_abs_diff_eq!(positions[0][0], 0.0);
    assert_abs_diff_eq!(positions[0][1], 0.0);
    // The first element of the inner sublattice.
    assert_abs_diff_eq!(positions[15][0], 0.45, epsilon = 1e-12);
    assert_abs_diff_eq!(positions[15][1], 0.45 * 3_f64.sqrt(), epsilon = 1e-12);
}

#[test]
fn test_rectangular_geometry_is_x_fastest() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("positions.tsv");

    #[rustfmt::skip]
    let cmd = farfield()
        .args([
            "geometry",
            "--nx", "2",
            "--ny", "3",
            "--dy", "0.7",
            "-o", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "geometry failed: {}", get_cmd_output(cmd).1);

    let positions = read_tsv(&output);
    assert_eq!(positions.len(), 6);
    assert_abs_diff_eq!(positions[1][0], 0.5);
    assert_abs_diff_eq!(positions[1][1], 0.0);
    assert_abs_diff_eq!(positions[2][0], 0.0);
    assert_abs_diff_eq!(positions[2][1], 0.7);
}

#[test]
fn test_bad_geometry() {
    let cmd = farfield()
        .args(["geometry", "--layout", "circular"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Unrecognised array layout"), "{stderr}");

    let cmd = farfield().args(["geometry", "--nx", "0"]).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.starts_with("Error:"), "{stderr}");
}
